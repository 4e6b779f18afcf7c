// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::any;
use std::ptr::NonNull;

use super::*;
use crate::sig::Signature;
use crate::sym::Sym;
use crate::table::SymbolKind;

impl<L: Loader> Plugin<L> {
	/// Calls the bound function `name` as an `F` with `args`, and returns what it returns.
	///
	/// `F` is a function pointer type such as `extern "C" fn(c_int) -> c_int`, and `args`
	/// is the tuple of its arguments: `()`, `(x,)`, `(x, y)` and so on.
	///
	/// # Safety
	///
	/// The library only stores an address. The caller asserts that the function behind
	/// `name` really has the signature `F`: same argument types, same return type,
	/// same calling convention. Nothing verifies this unless the symbol was bound with
	/// [`bind_as`](Plugin::bind_as), and a mismatch is undefined behavior. The function
	/// itself must also be sound to call with `args`.
	///
	/// # Errors
	/// - [`Error::UnboundSymbol`] if `name` is not bound as a function. Nothing is called.
	/// - [`Error::SignatureMismatch`] if `name` was bound with a signature other than `F`.
	///   Nothing is called.
	///
	/// # Examples
	///
	/// ```no_run
	/// use std::ffi::c_double;
	/// use tinyplug::Plugin;
	///
	/// let mut libm = Plugin::open("libm.so.6")?;
	/// libm.bind("floor")?;
	/// let floor = unsafe { libm.invoke::<extern "C" fn(c_double) -> c_double>("floor", (10.6,))? };
	/// assert_eq!(floor, 10.0);
	/// # Ok::<(), tinyplug::Error>(())
	/// ```
	pub unsafe fn invoke<F: Signature>(&self, name: &str, args: F::Args) -> Result<F::Output> {
		let func = self.function::<F>(name)?;
		Ok(func.call(args))
	}

	/// Returns the bound function `name` as an `F`, borrowed from this `Plugin`.
	///
	/// Useful for calling the same function many times without a lookup per call.
	///
	/// # Safety
	/// Same contract as [`invoke`](Plugin::invoke), for every call made through the result.
	///
	/// # Errors
	/// Same as [`invoke`](Plugin::invoke).
	pub unsafe fn symbol<F: Signature>(&self, name: &str) -> Result<Sym<'_, F>> {
		self.function::<F>(name).map(Sym::new)
	}

	unsafe fn function<F: Signature>(&self, name: &str) -> Result<F> {
		let entry = match self.table.get(name) {
			Some(entry) if entry.kind == SymbolKind::Function => entry,
			_ => {
				diag!(warn, symbol = name, "attempted to call a function that is not bound");
				return Err(Error::UnboundSymbol {
					symbol: name.to_owned(),
				});
			}
		};
		if let Some(tag) = entry.tag.filter(|tag| !tag.matches::<F>()) {
			diag!(warn, symbol = name, bound = tag.name(), "signature mismatch");
			return Err(Error::SignatureMismatch {
				symbol: name.to_owned(),
				bound: tag.name(),
				requested: any::type_name::<F>(),
			});
		}
		Ok(F::from_addr(entry.addr))
	}

	/// Returns the address of the bound variable `name` as a `*mut T`.
	///
	/// The pointer is only valid while the library stays loaded.
	///
	/// # Errors
	/// Returns [`Error::UnboundSymbol`] if `name` is not bound as a variable.
	pub fn var_ptr<T>(&self, name: &str) -> Result<NonNull<T>> {
		match self.table.get(name) {
			Some(entry) if entry.kind == SymbolKind::Variable => Ok(entry.addr.cast()),
			_ => Err(Error::UnboundSymbol {
				symbol: name.to_owned(),
			}),
		}
	}

	/// Reads the bound variable `name` as a `T`.
	///
	/// # Safety
	/// The caller asserts that the variable really is a properly aligned, initialized `T`.
	///
	/// # Errors
	/// Same as [`var_ptr`](Plugin::var_ptr).
	pub unsafe fn var<T: Copy>(&self, name: &str) -> Result<T> {
		self.var_ptr::<T>(name).map(|ptr| ptr.as_ptr().read())
	}
}
