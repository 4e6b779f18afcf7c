// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Function signatures a bound symbol can be called through.
use std::any::{self, TypeId};
use std::mem;

use crate::sealed::Sealed;
use crate::SymAddr;

/// A function pointer type an untyped symbol address can be reinterpreted as.
///
/// Implemented for `extern "C" fn(A, ..) -> R` and `unsafe extern "C" fn(A, ..) -> R`
/// with up to ten arguments. `Args` is the tuple of argument types, so a call
/// through `extern "C" fn(i32, f64) -> u8` takes `(i32, f64)`.
///
/// Nothing checks that the real function has this signature. Getting it wrong is
/// undefined behavior, not an error.
pub unsafe trait Signature: Copy + 'static + Sealed {
	type Args;
	type Output;

	#[doc(hidden)]
	unsafe fn from_addr(addr: SymAddr) -> Self;

	#[doc(hidden)]
	unsafe fn call(self, args: Self::Args) -> Self::Output;
}

// Function pointers and data pointers share a size on every supported target.
trait AssertSize: Sized {
	const ASSERT_SIZE: () = assert!(mem::size_of::<Self>() == mem::size_of::<SymAddr>());
}
impl<F: Signature> AssertSize for F {}

macro_rules! impl_signature {
	($($arg:ident),*) => {
		impl_signature!(@abi [extern "C" fn($($arg),*) -> R] $($arg),*);
		impl_signature!(@abi [unsafe extern "C" fn($($arg),*) -> R] $($arg),*);
	};
	(@abi [$($fn_ty:tt)*] $($arg:ident),*) => {
		impl<R: 'static, $($arg: 'static),*> Sealed for $($fn_ty)* {}

		unsafe impl<R: 'static, $($arg: 'static),*> Signature for $($fn_ty)* {
			type Args = ($($arg,)*);
			type Output = R;

			#[inline]
			unsafe fn from_addr(addr: SymAddr) -> Self {
				#[allow(clippy::let_unit_value)]
				let _ = <Self as AssertSize>::ASSERT_SIZE;
				mem::transmute_copy::<SymAddr, Self>(&addr)
			}

			#[inline]
			#[allow(non_snake_case)]
			unsafe fn call(self, ($($arg,)*): Self::Args) -> R {
				(self)($($arg),*)
			}
		}
	};
}

impl_signature!();
impl_signature!(A);
impl_signature!(A, B);
impl_signature!(A, B, C);
impl_signature!(A, B, C, D);
impl_signature!(A, B, C, D, E);
impl_signature!(A, B, C, D, E, G);
impl_signature!(A, B, C, D, E, G, H);
impl_signature!(A, B, C, D, E, G, H, I);
impl_signature!(A, B, C, D, E, G, H, I, J);
impl_signature!(A, B, C, D, E, G, H, I, J, K);

/// The signature a symbol was bound with, checked again when it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureTag {
	id: TypeId,
	name: &'static str,
}

impl SignatureTag {
	#[inline]
	pub fn of<F: Signature>() -> Self {
		Self {
			id: TypeId::of::<F>(),
			name: any::type_name::<F>(),
		}
	}

	/// The Rust spelling of the signature, for messages only.
	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn matches<F: Signature>(&self) -> bool {
		self.id == TypeId::of::<F>()
	}
}
