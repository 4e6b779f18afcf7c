// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
use std::collections::hash_map;
use std::iter::FusedIterator;

use crate::table::Entry;

/// Iterator over the names bound in a [`Plugin`](crate::Plugin), in no particular order.
///
/// Created by [`Plugin::names`](crate::Plugin::names).
#[derive(Debug, Clone)]
pub struct Names<'a> {
	pub(crate) inner: hash_map::Keys<'a, String, Entry>,
}

impl<'a> Iterator for Names<'a> {
	type Item = &'a str;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(String::as_str)
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl ExactSizeIterator for Names<'_> {}
impl FusedIterator for Names<'_> {}
