// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#![allow(dead_code)]

// A fake library whose exports are functions and statics of this test binary,
// so calls and releases can be counted.

use std::cell::Cell;
use std::ffi::{c_int, c_void, CStr, OsStr};
use std::io;
use std::ptr::NonNull;

use tinyplug::{LoadOptions, Loader, SymAddr};

pub const FAKE: &str = "libfake.so";
pub const OTHER: &str = "libother.so";

thread_local! {
	static OPENS: Cell<usize> = const { Cell::new(0) };
	static CLOSES: Cell<usize> = const { Cell::new(0) };
	static CALLS: Cell<usize> = const { Cell::new(0) };
}

pub fn opens() -> usize {
	OPENS.with(Cell::get)
}

pub fn closes() -> usize {
	CLOSES.with(Cell::get)
}

pub fn calls() -> usize {
	CALLS.with(Cell::get)
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
	counter.with(|c| c.set(c.get() + 1));
}

pub extern "C" fn answer() -> c_int {
	bump(&CALLS);
	42
}

pub extern "C" fn add(a: c_int, b: c_int) -> c_int {
	bump(&CALLS);
	a + b
}

pub extern "C" fn scale(x: f64, by: c_int) -> f64 {
	bump(&CALLS);
	x * f64::from(by)
}

pub extern "C" fn other() -> c_int {
	bump(&CALLS);
	7
}

pub static COUNTER: c_int = 1234;

#[derive(Debug)]
pub struct Fake {
	other: bool,
}

unsafe impl Loader for Fake {
	unsafe fn open(path: &OsStr, _: &LoadOptions) -> io::Result<Self> {
		let other = if path == OsStr::new(FAKE) {
			false
		} else if path == OsStr::new(OTHER) {
			true
		} else {
			return Err(io::Error::new(io::ErrorKind::NotFound, "no such fake library"));
		};
		bump(&OPENS);
		Ok(Self { other })
	}

	unsafe fn this() -> io::Result<Self> {
		bump(&OPENS);
		Ok(Self { other: false })
	}

	unsafe fn sym(&self, symbol: &CStr) -> io::Result<SymAddr> {
		let addr: *mut c_void = match (self.other, symbol.to_bytes()) {
			(false, b"answer") => answer as *mut c_void,
			(false, b"add") => add as *mut c_void,
			(false, b"scale") => scale as *mut c_void,
			(false, b"counter") => &COUNTER as *const c_int as *mut c_void,
			(true, b"other") => other as *mut c_void,
			_ => std::ptr::null_mut(),
		};
		NonNull::new(addr).ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "undefined symbol"))
	}

	unsafe fn close(self) -> io::Result<()> {
		bump(&CLOSES);
		Ok(())
	}
}

pub type Plugin = tinyplug::Plugin<Fake>;

pub fn loaded() -> Plugin {
	let mut plugin = Plugin::default();
	plugin.load(FAKE).unwrap();
	plugin
}
