// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use super::*;
use crate::error::BindFailures;
use crate::iter::Names;
use crate::sig::{Signature, SignatureTag};
use crate::table::{Entry, SymbolKind};

impl<L: Loader> Plugin<L> {
	/// Resolves the function `name` in the loaded library and caches its address.
	///
	/// Binding a name that is already bound succeeds without resolving it again. A
	/// failed bind leaves no trace, so [`is_bound`](Plugin::is_bound) keeps
	/// reporting `false` for it.
	///
	/// # Errors
	/// - [`Error::NotLoaded`] if no library is loaded.
	/// - [`Error::InvalidSymbolName`] if `name` is empty or contains a NUL byte.
	/// - [`Error::SymbolNotFound`] if the library does not export `name`.
	pub fn bind(&mut self, name: &str) -> Result<()> {
		self.resolve(name, SymbolKind::Function, None)
	}

	/// Like [`bind`](Plugin::bind), and records `F` as the symbol's signature.
	///
	/// Later calls through [`invoke`](Plugin::invoke) or [`symbol`](Plugin::symbol)
	/// with any other signature fail with [`Error::SignatureMismatch`] instead of
	/// calling the function. Binding an already bound name again replaces its
	/// signature.
	///
	/// # Examples
	///
	/// ```no_run
	/// use std::ffi::c_int;
	/// use tinyplug::{Error, Plugin};
	///
	/// type Add = extern "C" fn(c_int, c_int) -> c_int;
	///
	/// let mut plugin = Plugin::open("./libmath.so")?;
	/// plugin.bind_as::<Add>("add")?;
	///
	/// let wrong = unsafe { plugin.invoke::<extern "C" fn() -> c_int>("add", ()) };
	/// assert!(matches!(wrong, Err(Error::SignatureMismatch { .. })));
	/// # Ok::<(), tinyplug::Error>(())
	/// ```
	pub fn bind_as<F: Signature>(&mut self, name: &str) -> Result<()> {
		self.resolve(name, SymbolKind::Function, Some(SignatureTag::of::<F>()))
	}

	/// Resolves the data symbol `name` and caches its address.
	///
	/// Variables are read with [`var_ptr`](Plugin::var_ptr) and [`var`](Plugin::var)
	/// and cannot be invoked.
	///
	/// # Errors
	/// Same as [`bind`](Plugin::bind).
	pub fn bind_variable(&mut self, name: &str) -> Result<()> {
		self.resolve(name, SymbolKind::Variable, None)
	}

	/// Binds every function in `names`.
	///
	/// Each name is bound independently; a failure does not stop the rest. Returns how
	/// many names are bound afterwards.
	///
	/// # Errors
	/// Returns [`BindFailures`] listing every name that failed along with its error.
	pub fn bind_all<I, S>(&mut self, names: I) -> Result<usize, BindFailures>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut bound = 0;
		let mut failed = Vec::new();
		for name in names {
			let name = name.as_ref();
			match self.bind(name) {
				Ok(()) => bound += 1,
				Err(err) => failed.push((name.to_owned(), err)),
			}
		}
		if failed.is_empty() {
			Ok(bound)
		} else {
			Err(BindFailures::from(failed))
		}
	}

	fn resolve(&mut self, name: &str, kind: SymbolKind, tag: Option<SignatureTag>) -> Result<()> {
		let Some(ref handle) = self.handle else {
			diag!(warn, symbol = name, "cannot bind symbol, no library is loaded");
			return Err(Error::NotLoaded {
				symbol: name.to_owned(),
			});
		};
		if let Some(entry) = self.table.get_mut(name).filter(|entry| entry.kind == kind) {
			if tag.is_some() {
				entry.tag = tag;
			}
			return Ok(());
		}
		let c_name = Self::symbol_name(name)?;
		match unsafe { handle.sym(&c_name) } {
			Ok(addr) => {
				self.table.insert(name, Entry { addr, kind, tag });
				Ok(())
			}
			Err(source) => {
				diag!(warn, symbol = name, error = %source, "failed to bind symbol");
				Err(Error::SymbolNotFound {
					symbol: name.to_owned(),
					source,
				})
			}
		}
	}

	/// Whether `name` is bound, as a function or a variable, in the current load.
	#[inline]
	pub fn is_bound(&self, name: &str) -> bool {
		self.table.get(name).is_some()
	}

	#[inline]
	pub fn is_function_bound(&self, name: &str) -> bool {
		self.table.contains(name, SymbolKind::Function)
	}

	#[inline]
	pub fn is_variable_bound(&self, name: &str) -> bool {
		self.table.contains(name, SymbolKind::Variable)
	}

	/// What `name` was bound as, or [`None`] if it is not bound.
	#[inline]
	pub fn kind(&self, name: &str) -> Option<SymbolKind> {
		self.table.get(name).map(|entry| entry.kind)
	}

	/// Number of bound symbols.
	#[inline]
	pub fn len(&self) -> usize {
		self.table.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.table.len() == 0
	}

	#[inline]
	pub fn function_count(&self) -> usize {
		self.table.count(SymbolKind::Function)
	}

	#[inline]
	pub fn variable_count(&self) -> usize {
		self.table.count(SymbolKind::Variable)
	}

	/// Iterates over the bound names.
	#[inline]
	pub fn names(&self) -> Names<'_> {
		Names {
			inner: self.table.keys(),
		}
	}

	/// Forgets every bound symbol but keeps the library loaded.
	#[inline]
	pub fn clear_symbols(&mut self) {
		self.table.clear()
	}
}
