// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::{io, path::PathBuf};

/// Everything a [`Plugin`](crate::Plugin) operation can report.
///
/// None of these are fatal; the plugin is left in a well defined state after each.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The OS loader refused the path. The plugin stays unloaded.
	#[error("failed to load library `{}`", .path.display())]
	LoadFailed {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	/// A library is already loaded; the call changed nothing.
	#[error("a library is already loaded, unload it first")]
	AlreadyLoaded,
	/// A symbol was bound while no library was loaded.
	#[error("cannot bind `{symbol}`, no library is loaded")]
	NotLoaded { symbol: String },
	/// The loaded library does not export the symbol.
	#[error("symbol `{symbol}` not found")]
	SymbolNotFound {
		symbol: String,
		#[source]
		source: io::Error,
	},
	/// The name cannot be looked up at all: it is empty or holds a NUL byte.
	#[error("`{symbol}` is not a valid symbol name")]
	InvalidSymbolName { symbol: String },
	/// The symbol has not been bound in the current load as what it was used as.
	#[error("symbol `{symbol}` is not bound")]
	UnboundSymbol { symbol: String },
	/// The symbol was bound with a signature different from the one it was called with.
	#[error("`{symbol}` was bound as `{bound}`, not `{requested}`")]
	SignatureMismatch {
		symbol: String,
		bound: &'static str,
		requested: &'static str,
	},
}

impl Error {
	/// The symbol name this error is about, if any.
	pub fn symbol(&self) -> Option<&str> {
		match self {
			Self::NotLoaded { symbol }
			| Self::SymbolNotFound { symbol, .. }
			| Self::InvalidSymbolName { symbol }
			| Self::UnboundSymbol { symbol }
			| Self::SignatureMismatch { symbol, .. } => Some(symbol),
			Self::LoadFailed { .. } | Self::AlreadyLoaded => None,
		}
	}
}

/// Returned by [`Plugin::bind_all`](crate::Plugin::bind_all) when one or more names failed.
///
/// Every name not listed here was bound.
#[derive(Debug, thiserror::Error)]
#[error("{} symbol(s) failed to bind", .failed.len())]
pub struct BindFailures {
	failed: Vec<(String, Error)>,
}

impl BindFailures {
	/// The names that failed, in the order they were attempted.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.failed.iter().map(|(name, _)| name.as_str())
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.failed.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.failed.is_empty()
	}

	#[inline]
	pub fn iter(&self) -> std::slice::Iter<'_, (String, Error)> {
		self.failed.iter()
	}

	pub fn into_inner(self) -> Vec<(String, Error)> {
		self.failed
	}
}

impl From<Vec<(String, Error)>> for BindFailures {
	fn from(failed: Vec<(String, Error)>) -> Self {
		Self { failed }
	}
}

impl<'a> IntoIterator for &'a BindFailures {
	type Item = &'a (String, Error);
	type IntoIter = std::slice::Iter<'a, (String, Error)>;

	fn into_iter(self) -> Self::IntoIter {
		self.failed.iter()
	}
}
