// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::os::windows::ffi::OsStrExt;
use std::{ffi, io, ptr};

use super::Handle;
use crate::load::LoadOptions;

mod c;

fn to_wide(path: &ffi::OsStr) -> Vec<u16> {
	path.encode_wide().chain(std::iter::once(0u16)).collect()
}

#[inline]
fn or_last_error(raw: *mut ffi::c_void) -> io::Result<Handle> {
	Handle::new(raw).ok_or_else(io::Error::last_os_error)
}

#[inline]
pub(crate) unsafe fn dylib_open(path: &ffi::OsStr, options: &LoadOptions) -> io::Result<Handle> {
	let wide_str: Vec<u16> = to_wide(path);
	let flags = if options.restrict_search {
		c::LOAD_LIBRARY_SEARCH_DEFAULT_DIRS | c::LOAD_LIBRARY_SAFE_CURRENT_DIRS
	} else {
		0
	};
	or_last_error(c::LoadLibraryExW(wide_str.as_ptr(), ptr::null_mut(), flags))
}

#[inline]
pub(crate) unsafe fn dylib_this() -> io::Result<Handle> {
	let mut handle: c::HMODULE = ptr::null_mut();
	if c::GetModuleHandleExW(0, ptr::null(), &mut handle) == 0 {
		Err(io::Error::last_os_error())
	} else {
		or_last_error(handle)
	}
}

#[inline]
pub(crate) unsafe fn dylib_close(lib_handle: Handle) -> io::Result<()> {
	if c::FreeLibrary(lib_handle.as_ptr()) == 0 {
		Err(io::Error::last_os_error())
	} else {
		Ok(())
	}
}

#[inline]
pub(crate) unsafe fn dylib_symbol(lib_handle: Handle, name: &ffi::CStr) -> io::Result<Handle> {
	or_last_error(c::GetProcAddress(lib_handle.as_ptr(), name.as_ptr()))
}
