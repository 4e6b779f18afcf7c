#![cfg(windows)]

use std::ffi::{c_char, c_int};

use tinyplug::*;

// `extern "system"` and `extern "C"` only coincide off 32-bit x86
#[cfg(not(target_arch = "x86"))]
#[test]
fn test_kernel32() {
	let mut kernel32 = Plugin::open("Kernel32.dll").unwrap();
	kernel32.bind_all(["SetLastError", "GetLastError"]).unwrap();
	unsafe {
		kernel32
			.invoke::<extern "C" fn(u32)>("SetLastError", (53,))
			.unwrap();
		let last = kernel32.invoke::<extern "C" fn() -> u32>("GetLastError", ()).unwrap();
		assert_eq!(last, 53);
	}
}

#[test]
fn test_msvcrt_atoi() {
	let mut msvcrt = Plugin::open("msvcrt.dll").unwrap();
	msvcrt.bind("atoi").unwrap();
	let answer = unsafe { msvcrt.invoke::<unsafe extern "C" fn(*const c_char) -> c_int>("atoi", (b"42\0".as_ptr().cast(),)) }.unwrap();
	assert_eq!(answer, 42);
}

#[test]
fn test_missing_library() {
	let mut plugin = Plugin::new();
	match plugin.load("tinyplug-does-not-exist.dll") {
		Err(Error::LoadFailed { source, .. }) => assert!(source.raw_os_error().is_some()),
		other => panic!("expected `LoadFailed`, got {other:?}"),
	}
	assert!(!plugin.is_loaded());
}

#[test]
fn test_restrict_search() {
	let options = LoadOptions::new().restrict_search(true);
	let mut kernel32: Plugin = Plugin::with_options(options);
	kernel32.load("Kernel32.dll").unwrap();
	assert!(kernel32.bind("GetLastError").is_ok());
}

#[test]
fn test_this() {
	let mut this = Plugin::this().unwrap();
	assert!(this.is_loaded());
	assert!(this.bind("tinyplug_does_not_exist").is_err());
}
