// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::{fmt, io, marker};

use crate::error::Error;
use crate::load::{LoadOptions, Loader, System};
use crate::table::SymbolTable;
use crate::Result;

mod bind;
mod invoke;

/// A shared library loaded at run-time together with the symbols bound from it.
///
/// A `Plugin` starts out unloaded. [`load`](Plugin::load) opens a library,
/// [`bind`](Plugin::bind) resolves and caches symbols from it, and
/// [`invoke`](Plugin::invoke) calls a bound function through a declared signature.
/// The library is released by [`unload`](Plugin::unload) or when the `Plugin` is
/// dropped, whichever comes first, and every cached symbol is forgotten with it.
///
/// Loading a library runs its static initializers in this process, and unloading
/// runs its finalizers.
///
/// `Plugin` is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::c_int;
/// use tinyplug::Plugin;
///
/// let mut plugin = Plugin::new();
/// plugin.load("./libanswer.so")?;
/// plugin.bind("answer")?;
/// assert!(plugin.is_bound("answer"));
///
/// let answer = unsafe { plugin.invoke::<extern "C" fn() -> c_int>("answer", ())? };
/// assert_eq!(answer, 42);
///
/// plugin.unload();
/// assert!(!plugin.is_bound("answer"));
/// # Ok::<(), tinyplug::Error>(())
/// ```
pub struct Plugin<L: Loader = System> {
	// library handle, `None` while unloaded
	handle: Option<L>,
	path: Option<PathBuf>,
	options: LoadOptions,
	table: SymbolTable,
	_not_send: marker::PhantomData<*const ()>,
}

impl Plugin<System> {
	/// Constructs an unloaded `Plugin` on the platform loader, using the default [`LoadOptions`].
	#[inline]
	pub fn new() -> Self {
		Self::with_options(LoadOptions::new())
	}

	/// Constructs a `Plugin` and loads the library at `path`.
	///
	/// # Errors
	/// Returns [`Error::LoadFailed`] if the library cannot be loaded.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
		let mut plugin = Self::new();
		plugin.load(path)?;
		Ok(plugin)
	}

	/// Constructs a `Plugin` over the running program image.
	///
	/// # Errors
	/// Returns [`Error::LoadFailed`] if the OS refuses a handle to the program.
	pub fn this() -> Result<Self> {
		let mut plugin = Self::new();
		plugin.load_this()?;
		Ok(plugin)
	}
}

impl<L: Loader> Plugin<L> {
	/// Constructs an unloaded `Plugin` that hands `options` to the loader.
	#[inline]
	pub fn with_options(options: LoadOptions) -> Self {
		Self {
			handle: None,
			path: None,
			options,
			table: SymbolTable::default(),
			_not_send: marker::PhantomData,
		}
	}

	/// Loads the shared library at `path`.
	///
	/// The path is handed to the OS loader unchanged, so a bare file name goes through
	/// the platform's library search order.
	///
	/// # Errors
	/// Returns [`Error::AlreadyLoaded`] without touching the current library if one is
	/// loaded, or [`Error::LoadFailed`] if the OS loader fails or `path` is empty. The
	/// `Plugin` stays unloaded after a failure.
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let path = path.as_ref();
		if self.handle.is_some() {
			diag!(warn, path = %path.display(), "a library is already loaded");
			return Err(Error::AlreadyLoaded);
		}
		let opened = if path.as_os_str().is_empty() {
			Err(io::Error::new(io::ErrorKind::InvalidInput, "library path is empty"))
		} else {
			unsafe { L::open(path.as_os_str(), &self.options) }
		};
		self.attach(opened, path.to_owned())
	}

	/// Loads the running program image, which exposes every symbol already linked
	/// into this process.
	///
	/// # Errors
	/// Same as [`load`](Plugin::load).
	pub fn load_this(&mut self) -> Result<()> {
		if self.handle.is_some() {
			diag!(warn, "a library is already loaded");
			return Err(Error::AlreadyLoaded);
		}
		let opened = unsafe { L::this() };
		self.attach(opened, PathBuf::new())
	}

	fn attach(&mut self, opened: io::Result<L>, path: PathBuf) -> Result<()> {
		match opened {
			Ok(handle) => {
				self.table.clear();
				self.handle = Some(handle);
				self.path = Some(path);
				Ok(())
			}
			Err(source) => {
				diag!(warn, path = %path.display(), error = %source, "failed to load library");
				Err(Error::LoadFailed { path, source })
			}
		}
	}

	/// Releases the library and forgets every bound symbol.
	///
	/// Returns `false` if nothing was loaded, in which case nothing happens. A failure
	/// reported by the OS while releasing is not surfaced; the handle is gone either way.
	#[cfg_attr(not(feature = "diagnostics"), allow(unused_variables))]
	pub fn unload(&mut self) -> bool {
		// the handle is taken out before release, so it can never be released twice
		let Some(handle) = self.handle.take() else {
			return false;
		};
		self.table.clear();
		let path = self.path.take();
		if let Err(err) = unsafe { handle.close() } {
			diag!(warn, path = ?path, error = %err, "failed to release library");
		}
		true
	}

	#[inline]
	pub fn is_loaded(&self) -> bool {
		self.handle.is_some()
	}

	/// The path the current library was loaded from.
	///
	/// Returns [`None`] while unloaded, and an empty path for [`this`](Plugin::this).
	#[inline]
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	#[inline]
	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	fn symbol_name(name: &str) -> Result<CString> {
		if name.is_empty() {
			return Err(Error::InvalidSymbolName {
				symbol: name.to_owned(),
			});
		}
		CString::new(name).map_err(|_| Error::InvalidSymbolName {
			symbol: name.to_owned(),
		})
	}
}

impl<L: Loader> Default for Plugin<L> {
	fn default() -> Self {
		Self::with_options(LoadOptions::new())
	}
}

impl<L: Loader> Drop for Plugin<L> {
	fn drop(&mut self) {
		self.unload();
	}
}

impl<L: Loader> fmt::Debug for Plugin<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Plugin")
			.field("loaded", &self.is_loaded())
			.field("path", &self.path)
			.field("options", &self.options)
			.field("symbols", &self.table.len())
			.finish()
	}
}
