// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason

use super::*;
use crate::os::imp;

unsafe impl Loader for System {
	/// If successful, increments the reference count of the shared library.
	unsafe fn open(path: &OsStr, options: &LoadOptions) -> io::Result<Self> {
		imp::dylib_open(path, options).map(Self)
	}

	/// Increments the reference count of the running program image.
	unsafe fn this() -> io::Result<Self> {
		imp::dylib_this().map(Self)
	}

	unsafe fn sym(&self, symbol: &CStr) -> io::Result<SymAddr> {
		imp::dylib_symbol(self.0, symbol)
	}

	/// Decrements the reference count. When it hits zero the library is unloaded.
	///
	/// # Errors
	/// May error depending on system call.
	unsafe fn close(self) -> io::Result<()> {
		imp::dylib_close(self.0)
	}
}
