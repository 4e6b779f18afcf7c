#![cfg(feature = "macros")]

mod common;

use std::ffi::c_int;

use common::{calls, loaded, Plugin};
use tinyplug::Error;

mod fake {
	use super::*;

	#[tinyplug::bindings(binder = bind_fake)]
	extern "C" {
		pub fn answer() -> c_int;
		pub fn add(a: c_int, b: c_int) -> c_int;
		#[link_name = "scale"]
		pub fn times(x: f64, _: c_int) -> f64;
	}

	#[tinyplug::bindings(binder = bind_broken)]
	extern "C" {
		pub fn answer_again() -> c_int;
		#[link_name = "answer"]
		pub fn answer_alias() -> c_int;
	}

	// a user type named like the loader parameter
	pub type L = c_int;

	#[tinyplug::bindings(binder = bind_shadowed)]
	extern "C" {
		#[link_name = "add"]
		pub fn add_l(a: L, b: L) -> L;
	}

	mod private {
		use super::*;

		#[tinyplug::bindings(binder = bind_private)]
		extern "C" {
			fn answer() -> c_int;
		}

		pub fn answer_twice(plugin: &mut Plugin) -> c_int {
			bind_private(plugin).unwrap();
			unsafe { answer(plugin).unwrap() + answer(plugin).unwrap() }
		}
	}
	pub use private::answer_twice;

	#[tinyplug::bindings]
	extern "C" {
		// `plugin` as a parameter name must not shadow the generated one
		#[link_name = "add"]
		pub fn add_with(plugin: c_int, other: c_int) -> c_int;
	}
}

#[test]
fn test_binder() {
	let mut plugin = loaded();
	assert_eq!(fake::bind_fake(&mut plugin).unwrap(), 3);
	assert!(plugin.is_function_bound("answer"));
	assert!(plugin.is_function_bound("add"));
	assert!(plugin.is_function_bound("scale"));
	assert!(!plugin.is_bound("times"));

	unsafe {
		assert_eq!(fake::answer(&plugin).unwrap(), 42);
		assert_eq!(fake::add(&plugin, 40, 2).unwrap(), 42);
		assert_eq!(fake::times(&plugin, 2.5, 2).unwrap(), 5.0);
	}
	assert_eq!(calls(), 3);
}

#[test]
fn test_binder_partial() {
	let mut plugin = loaded();
	let failures = fake::bind_broken(&mut plugin).unwrap_err();
	assert_eq!(failures.names().collect::<Vec<_>>(), ["answer_again"]);
	assert!(plugin.is_bound("answer"));
	assert_eq!(unsafe { fake::answer_alias(&plugin) }.unwrap(), 42);
}

#[test]
fn test_unbound_wrapper() {
	let plugin = loaded();
	let err = unsafe { fake::answer(&plugin) }.unwrap_err();
	assert!(matches!(err, Error::UnboundSymbol { .. }));
	assert_eq!(calls(), 0);
}

#[test]
fn test_binder_tags_signature() {
	let mut plugin = loaded();
	fake::bind_fake(&mut plugin).unwrap();
	let err = unsafe { plugin.invoke::<extern "C" fn() -> c_int>("add", ()) }.unwrap_err();
	assert!(matches!(err, Error::SignatureMismatch { .. }));
}

#[test]
fn test_param_named_plugin() {
	let mut plugin = loaded();
	fake::bind_fake(&mut plugin).unwrap();
	assert_eq!(unsafe { fake::add_with(&plugin, 1, 2) }.unwrap(), 3);
}

#[test]
fn test_not_loaded() {
	let mut plugin = Plugin::default();
	let failures = fake::bind_fake(&mut plugin).unwrap_err();
	assert_eq!(failures.len(), 3);
}

#[test]
fn test_user_type_named_l() {
	let mut plugin = loaded();
	assert_eq!(fake::bind_shadowed(&mut plugin).unwrap(), 1);
	let sum: fake::L = unsafe { fake::add_l(&plugin, 20, 22) }.unwrap();
	assert_eq!(sum, 42);
}

#[test]
fn test_private_binder() {
	let mut plugin = loaded();
	assert_eq!(fake::answer_twice(&mut plugin), 84);
	assert!(plugin.is_function_bound("answer"));
}
