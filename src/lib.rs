// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
//! Load a shared library at run-time, bind its symbols by name, and call them
//! through a caller-declared function signature.
//!
//! ```no_run
//! use std::ffi::c_int;
//! use tinyplug::Plugin;
//!
//! let mut plugin = Plugin::open("./libanswer.so")?;
//! plugin.bind("answer")?;
//! let answer = unsafe { plugin.invoke::<extern "C" fn() -> c_int>("answer", ())? };
//! assert_eq!(answer, 42);
//! # Ok::<(), tinyplug::Error>(())
//! ```
//!
//! # Safety
//!
//! The address behind a symbol carries no type. [`Plugin::invoke`] and
//! [`Plugin::symbol`] trust the signature the caller names, and calling a
//! function through the wrong signature is undefined behavior. Binding with
//! [`Plugin::bind_as`] records the signature so a later call through a
//! different one is reported as [`Error::SignatureMismatch`] instead.
//!
//! # Threads
//!
//! A [`Plugin`] is neither `Send` nor `Sync`. Loading, binding, calling and
//! unloading all happen on the thread that owns it; share one across threads
//! only through your own synchronization around a wrapper you vouch for.
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<tinyplug::Plugin>();
//! ```
//!
//! # Macros
//!
//! [`bindings`] turns an `extern "C"` block into typed wrappers over a [`Plugin`].
//! The generated binder is as visible as the declared functions.
//!
//! ```compile_fail
//! mod ffi {
//!     #[tinyplug::bindings(binder = bind)]
//!     extern "C" {
//!         fn answer() -> std::ffi::c_int;
//!     }
//! }
//!
//! let mut plugin = tinyplug::Plugin::new();
//! ffi::bind(&mut plugin).unwrap();
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Forwards to `tracing` when the `diagnostics` feature is enabled.
macro_rules! diag {
	($level:ident, $($arg:tt)+) => {
		#[cfg(feature = "diagnostics")]
		::tracing::$level!($($arg)+);
	};
}

pub mod error;
pub mod iter;
pub mod load;
mod os;
mod plugin;
mod sealed;
pub mod sig;
mod sym;
mod table;

pub use error::{BindFailures, Error};
pub use load::{Binding, LoadOptions, Loader, System, Visibility};
pub use plugin::Plugin;
pub use sig::Signature;
pub use sym::Sym;
pub use table::SymbolKind;

#[cfg(feature = "macros")]
#[cfg_attr(docsrs, doc(cfg(feature = "macros")))]
pub use tinyplug_macro::bindings;

/// A resolved, untyped symbol address. Never null.
pub type SymAddr = std::ptr::NonNull<std::ffi::c_void>;

/// The result of a tinyplug operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;
