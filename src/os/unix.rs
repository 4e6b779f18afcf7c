// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use super::Handle;
use crate::load::{Binding, LoadOptions, Visibility};
use std::os::unix::ffi::OsStrExt;
use std::{ffi, io, ptr};

#[cfg(not(any(target_os = "linux", target_os = "macos", target_env = "gnu")))]
use std::sync;

// `dlerror` is thread-local on these targets; elsewhere reading it races with other threads.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_env = "gnu")))]
#[inline]
fn dylib_guard<'a>() -> sync::MutexGuard<'a, ()> {
	static LOCK: sync::Mutex<()> = sync::Mutex::new(());
	LOCK.lock().unwrap_or_else(sync::PoisonError::into_inner)
}

#[cfg(any(target_os = "linux", target_os = "macos", target_env = "gnu"))]
#[inline(always)]
fn dylib_guard() {}

unsafe fn dylib_error() -> io::Error {
	let msg = libc::dlerror();
	if msg.is_null() {
		io::Error::new(io::ErrorKind::Other, "unknown dynamic linker error")
	} else {
		let e = ffi::CStr::from_ptr(msg).to_string_lossy().into_owned();
		io::Error::new(io::ErrorKind::Other, e)
	}
}

unsafe fn map_result<F>(f: F) -> io::Result<Handle>
where
	F: FnOnce() -> *mut ffi::c_void,
{
	let _lock = dylib_guard();
	let _ = libc::dlerror(); // clear existing errors
	match Handle::new(f()) {
		Some(handle) => Ok(handle),
		None => Err(dylib_error()),
	}
}

fn open_flags(options: &LoadOptions) -> ffi::c_int {
	let binding = match options.binding {
		Binding::Now => libc::RTLD_NOW,
		Binding::Lazy => libc::RTLD_LAZY,
	};
	let visibility = match options.visibility {
		Visibility::Local => libc::RTLD_LOCAL,
		Visibility::Global => libc::RTLD_GLOBAL,
	};
	binding | visibility
}

pub(crate) unsafe fn dylib_open(path: &ffi::OsStr, options: &LoadOptions) -> io::Result<Handle> {
	let c_str = ffi::CString::new(path.as_bytes())?;
	map_result(|| libc::dlopen(c_str.as_ptr(), open_flags(options)))
}

pub(crate) unsafe fn dylib_this() -> io::Result<Handle> {
	map_result(|| libc::dlopen(ptr::null(), libc::RTLD_NOW))
}

pub(crate) unsafe fn dylib_close(lib_handle: Handle) -> io::Result<()> {
	let _lock = dylib_guard();
	let _ = libc::dlerror(); // clear existing errors
	if libc::dlclose(lib_handle.as_ptr()) != 0 {
		Err(dylib_error())
	} else {
		Ok(())
	}
}

pub(crate) unsafe fn dylib_symbol(lib_handle: Handle, name: &ffi::CStr) -> io::Result<Handle> {
	map_result(|| libc::dlsym(lib_handle.as_ptr(), name.as_ptr()))
}
