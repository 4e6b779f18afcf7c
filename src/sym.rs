// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::{fmt, marker};

use crate::sig::Signature;

/// A typed function pointer borrowed from a [`Plugin`](crate::Plugin).
///
/// The function is only reachable through [`call`](Sym::call), so it cannot be called
/// once the `Plugin` is unloaded or dropped. Obtained through
/// [`Plugin::symbol`](crate::Plugin::symbol).
///
/// ```compile_fail
/// use std::ffi::c_int;
/// use tinyplug::{Plugin, Sym};
///
/// type Answer = extern "C" fn() -> c_int;
///
/// let answer: Sym<'_, Answer> = {
///     let mut plugin = Plugin::open("./libanswer.so").unwrap();
///     plugin.bind("answer").unwrap();
///     unsafe { plugin.symbol::<Answer>("answer") }.unwrap()
/// };
/// ```
///
/// ```compile_fail
/// use std::ffi::c_int;
/// use tinyplug::Plugin;
///
/// type Answer = extern "C" fn() -> c_int;
///
/// let mut plugin = Plugin::open("./libanswer.so").unwrap();
/// plugin.bind("answer").unwrap();
/// let answer = unsafe { plugin.symbol::<Answer>("answer") }.unwrap();
/// plugin.unload();
/// unsafe { answer.call(()) };
/// ```
#[derive(Clone, Copy)]
pub struct Sym<'a, F: Signature> {
	func: F,
	_marker: marker::PhantomData<&'a ()>,
}

impl<'a, F: Signature> Sym<'a, F> {
	#[inline]
	pub(crate) fn new(func: F) -> Self {
		Self {
			func,
			_marker: marker::PhantomData,
		}
	}

	/// Calls the function with `args`.
	///
	/// # Safety
	/// Same contract as [`Plugin::invoke`](crate::Plugin::invoke).
	#[inline]
	pub unsafe fn call(&self, args: F::Args) -> F::Output {
		self.func.call(args)
	}
}

impl<F: Signature> fmt::Debug for Sym<'_, F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Sym")
			.field(&std::any::type_name::<F>())
			.finish()
	}
}
