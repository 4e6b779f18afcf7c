// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::ffi::{CStr, OsStr};
use std::io;
use std::ptr::NonNull;

use crate::SymAddr;

mod sys;

/// The OS capability a [`Plugin`](crate::Plugin) is built on.
///
/// [`System`] is the platform loader and the default. Implement `Loader` yourself
/// to put something else behind a `Plugin`, such as a fake library in tests.
///
/// # Safety
///
/// A handle returned by [`open`](Loader::open) or [`this`](Loader::this) must stay
/// valid until it is passed to [`close`](Loader::close), and every address returned
/// by [`sym`](Loader::sym) must stay valid for at least that long.
pub unsafe trait Loader: Sized {
	/// Attempts to open a shared library.
	unsafe fn open(path: &OsStr, options: &LoadOptions) -> io::Result<Self>;
	/// Attempts to open the running program image.
	unsafe fn this() -> io::Result<Self>;
	/// Resolves `symbol` against this handle. Never returns a null address.
	unsafe fn sym(&self, symbol: &CStr) -> io::Result<SymAddr>;
	/// Releases the handle.
	unsafe fn close(self) -> io::Result<()>;
}

/// Symbol relocation policy requested from the dynamic linker.
///
/// Only meaningful on unix, it is ignored on windows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
	/// `RTLD_NOW`: resolve every undefined symbol while loading.
	#[default]
	Now,
	/// `RTLD_LAZY`: resolve function references on first call.
	Lazy,
}

/// Whether the library's symbols are made available to libraries loaded later.
///
/// Only meaningful on unix, it is ignored on windows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	/// `RTLD_LOCAL`
	#[default]
	Local,
	/// `RTLD_GLOBAL`
	Global,
}

/// Options handed to the OS loader by [`Plugin::load`](crate::Plugin::load).
///
/// # Examples
///
/// ```
/// use tinyplug::{Binding, LoadOptions, Plugin};
///
/// let options = LoadOptions::new().binding(Binding::Lazy);
/// let plugin: Plugin = Plugin::with_options(options);
/// assert!(!plugin.is_loaded());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
	pub binding: Binding,
	pub visibility: Visibility,
	/// Windows only: search the application directory, `System32` and user added
	/// directories (`LOAD_LIBRARY_SEARCH_DEFAULT_DIRS | LOAD_LIBRARY_SAFE_CURRENT_DIRS`)
	/// instead of the standard search order. Relative paths are not allowed when set.
	pub restrict_search: bool,
}

impl LoadOptions {
	#[inline]
	pub const fn new() -> Self {
		Self {
			binding: Binding::Now,
			visibility: Visibility::Local,
			restrict_search: false,
		}
	}

	#[inline]
	pub const fn binding(mut self, binding: Binding) -> Self {
		self.binding = binding;
		self
	}

	#[inline]
	pub const fn visibility(mut self, visibility: Visibility) -> Self {
		self.visibility = visibility;
		self
	}

	#[inline]
	pub const fn restrict_search(mut self, restrict: bool) -> Self {
		self.restrict_search = restrict;
		self
	}
}

/// The platform loader: `dlopen` family on unix, `LoadLibraryExW` family on windows.
///
/// Holds a reference counted OS handle; [`close`](Loader::close) gives the count back.
#[derive(Debug)]
pub struct System(NonNull<std::ffi::c_void>);
