//! Boundary-key index underlying [`RangeMap`](crate::RangeMap).

use std::cmp::Ordering;
use std::slice;

use crate::error::{Error, Result};

/// One end of a key range.
///
/// `Open` is the explicit sentinel for an unbounded end: negative infinity
/// in start position, positive infinity in stop position. Being a distinct
/// variant rather than a magic key value, it stays unambiguous even when
/// the key type has its own null-like values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge<K> {
	/// The unbounded end. Sorts before every key.
	Open,
	/// A bounded end at the given key.
	Key(K),
}

impl<K> Edge<K> {
	pub fn as_ref(&self) -> Edge<&K> {
		match self {
			Edge::Open => Edge::Open,
			Edge::Key(key) => Edge::Key(key),
		}
	}

	pub fn key(&self) -> Option<&K> {
		match self {
			Edge::Open => None,
			Edge::Key(key) => Some(key),
		}
	}

	pub fn is_open(&self) -> bool {
		matches!(self, Edge::Open)
	}
}

impl<K> From<K> for Edge<K> {
	fn from(key: K) -> Self {
		Edge::Key(key)
	}
}

/// A strictly ascending sequence of boundary edges with binary-search
/// lookup.
///
/// The first edge is always [`Edge::Open`]; every following edge is a key,
/// and the keys are strictly increasing. Index `i` marks the start of the
/// `i`-th span of a range map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedKeyIndex<K> {
	edges: Vec<Edge<K>>,
}

impl<K> OrderedKeyIndex<K> {
	pub fn new() -> Self {
		OrderedKeyIndex {
			edges: vec![Edge::Open],
		}
	}

	/// Number of edges, counting the leading open edge. Always >= 1.
	pub fn len(&self) -> usize {
		self.edges.len()
	}

	pub fn get(&self, index: usize) -> Option<&Edge<K>> {
		self.edges.get(index)
	}

	/// The edge at `index`. Panics if out of range.
	pub fn edge(&self, index: usize) -> &Edge<K> {
		&self.edges[index]
	}

	pub fn iter(&self) -> slice::Iter<'_, Edge<K>> {
		self.edges.iter()
	}

	pub fn as_slice(&self) -> &[Edge<K>] {
		&self.edges
	}

	/// Drop every boundary, reverting to the single unbounded span.
	pub fn clear(&mut self) {
		self.edges.truncate(1);
	}
}

impl<K: PartialOrd> OrderedKeyIndex<K> {
	/// Index of `key` if present, otherwise of the first edge above it.
	pub fn bisect_key_left(&self, key: &K) -> Result<usize> {
		bisect(&self.edges, key, true)
	}

	/// Index of the first edge strictly above `key`.
	pub fn bisect_key_right(&self, key: &K) -> Result<usize> {
		bisect(&self.edges, key, false)
	}

	/// [`bisect_key_left`](Self::bisect_key_left) extended to open edges:
	/// an open start sorts before every edge.
	pub fn bisect_left(&self, edge: &Edge<K>) -> Result<usize> {
		match edge {
			Edge::Open => Ok(0),
			Edge::Key(key) => self.bisect_key_left(key),
		}
	}

	/// [`bisect_key_right`](Self::bisect_key_right) extended to open edges:
	/// only the leading open edge is not above an open start.
	pub fn bisect_right(&self, edge: &Edge<K>) -> Result<usize> {
		match edge {
			Edge::Open => Ok(1),
			Edge::Key(key) => self.bisect_key_right(key),
		}
	}

	/// Replace `edges[start..stop]` with `replacement`.
	///
	/// The caller is responsible for keeping the sequence strictly
	/// ascending; this is checked in debug builds.
	pub fn splice(&mut self, start: usize, stop: usize, replacement: Vec<Edge<K>>) {
		self.edges.splice(start..stop, replacement);
		debug_assert!(self.is_strictly_ascending());
	}

	fn is_strictly_ascending(&self) -> bool {
		self.edges[0].is_open()
			&& self
				.edges
				.windows(2)
				.all(|pair| pair[0].partial_cmp(&pair[1]) == Some(Ordering::Less))
	}
}

impl<K> Default for OrderedKeyIndex<K> {
	fn default() -> Self {
		Self::new()
	}
}

/// Binary search over `edges[1..]`, which are all bounded keys.
///
/// Invariants: edges below `lo` are < `key` (or <= for a right bisection),
/// edges at `hi` and above are not.
fn bisect<K: PartialOrd>(edges: &[Edge<K>], key: &K, left_most: bool) -> Result<usize> {
	let mut lo = 1;
	let mut hi = edges.len();
	while lo < hi {
		let mid = lo + (hi - lo) / 2;
		let boundary = match &edges[mid] {
			Edge::Key(boundary) => boundary,
			Edge::Open => unreachable!("open edge after the head"),
		};
		let ord = boundary.partial_cmp(key).ok_or(Error::UnorderableKey)?;
		let below = match ord {
			Ordering::Less => true,
			Ordering::Equal => !left_most,
			Ordering::Greater => false,
		};
		if below {
			lo = mid + 1;
		} else {
			hi = mid;
		}
	}
	Ok(lo)
}
