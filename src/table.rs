// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::collections::{hash_map, HashMap};

use crate::sig::SignatureTag;
use crate::SymAddr;

/// What a bound symbol was bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
	Function,
	Variable,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
	pub(crate) addr: SymAddr,
	pub(crate) kind: SymbolKind,
	pub(crate) tag: Option<SignatureTag>,
}

/// Name to address cache for one loaded library.
///
/// Only successful resolutions are stored.
#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
	entries: HashMap<String, Entry>,
}

impl SymbolTable {
	#[inline]
	pub(crate) fn get(&self, name: &str) -> Option<&Entry> {
		self.entries.get(name)
	}

	#[inline]
	pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
		self.entries.get_mut(name)
	}

	/// Inserts or replaces the entry for `name`, returning the replaced one.
	#[inline]
	pub(crate) fn insert(&mut self, name: &str, entry: Entry) -> Option<Entry> {
		self.entries.insert(name.to_owned(), entry)
	}

	#[inline]
	pub(crate) fn contains(&self, name: &str, kind: SymbolKind) -> bool {
		self.get(name).is_some_and(|entry| entry.kind == kind)
	}

	#[inline]
	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	pub(crate) fn count(&self, kind: SymbolKind) -> usize {
		self.entries.values().filter(|entry| entry.kind == kind).count()
	}

	#[inline]
	pub(crate) fn keys(&self) -> hash_map::Keys<'_, String, Entry> {
		self.entries.keys()
	}

	#[inline]
	pub(crate) fn clear(&mut self) {
		self.entries.clear()
	}
}
