// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#![allow(clippy::upper_case_acronyms)]
#![allow(non_snake_case)]

use std::ffi;
pub use std::os::windows::raw::HANDLE;

pub type HMODULE = HANDLE;
pub type PCWSTR = *const u16;
pub type PCSTR = *const ffi::c_char;
pub type BOOL = i32;
pub type DWORD = u32;

pub const LOAD_LIBRARY_SEARCH_DEFAULT_DIRS: DWORD = 0x00001000;
pub const LOAD_LIBRARY_SAFE_CURRENT_DIRS: DWORD = 0x00002000;

#[link(name = "kernel32")]
extern "system" {
	pub fn LoadLibraryExW(lplibfilename: PCWSTR, hfile: HANDLE, dwflags: DWORD) -> HMODULE;
	pub fn GetModuleHandleExW(dwflags: DWORD, lpmodulename: PCWSTR, phmodule: *mut HMODULE) -> BOOL;
	pub fn GetProcAddress(hmodule: HMODULE, lpprocname: PCSTR) -> *mut ffi::c_void;
	pub fn FreeLibrary(hlibmodule: HMODULE) -> BOOL;
}
