//! Map ranges of orderable keys to values.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::key_index::{Edge, OrderedKeyIndex};

/// A mapping from contiguous, non-overlapping key ranges to values.
///
/// Every range is half-open: `[start, stop)`. Assigning a range splits or
/// merges boundaries as needed, so the map is always in canonical form:
/// boundary keys strictly ascending, no two adjacent spans holding equal
/// values. Either end of an assignment may be [`Edge::Open`], standing for
/// negative (start) or positive (stop) infinity.
///
/// ```
/// use collections_extended::{Edge, RangeMap};
///
/// let mut map = RangeMap::new();
/// map.set(0, 10, "a")?;
/// map.set(5, Edge::Open, "b")?;
/// assert_eq!(map.get(&3)?, Some(&"a"));
/// assert_eq!(map.get(&7)?, Some(&"b"));
/// assert_eq!(map.get(&-1)?, None);
/// # Ok::<(), collections_extended::Error>(())
/// ```
pub struct RangeMap<K, V> {
	index: OrderedKeyIndex<K>,
	values: Vec<Option<V>>,
}

/// One mapped subrange of a [`RangeMap`], as yielded by
/// [`RangeMap::ranges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappedRange<'a, K, V> {
	pub start: Edge<&'a K>,
	pub stop: Edge<&'a K>,
	pub value: &'a V,
}

impl<K: PartialOrd, V> RangeMap<K, V> {
	/// Create a map with the single unbounded span `(-inf, +inf)` unset.
	pub fn new() -> Self {
		RangeMap {
			index: OrderedKeyIndex::new(),
			values: vec![None],
		}
	}

	/// Number of mapped (non-empty) spans.
	pub fn len(&self) -> usize {
		self.values.iter().filter(|value| value.is_some()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.values.iter().all(Option::is_none)
	}

	/// Unset everything.
	pub fn clear(&mut self) {
		self.index.clear();
		self.values.clear();
		self.values.push(None);
	}

	/// Value of the span containing `key`, or `None` if that span is unset.
	pub fn get(&self, key: &K) -> Result<Option<&V>> {
		let loc = self.index.bisect_key_right(key)?;
		Ok(self.values[loc - 1].as_ref())
	}

	pub fn contains_key(&self, key: &K) -> Result<bool> {
		Ok(self.get(key)?.is_some())
	}

	/// Value of the single span containing all of `[start, stop)`.
	///
	/// For the caller that already knows the queried span does not straddle
	/// a boundary. Since adjacent spans never hold equal values, crossing a
	/// boundary always means the answer would be ambiguous, and
	/// [`Error::AmbiguousRange`] is returned.
	pub fn get_range<S, E>(&self, start: S, stop: E) -> Result<Option<&V>>
	where
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		let start = start.into();
		let stop = stop.into();
		check_edges(&start, &stop)?;
		let first = match &start {
			Edge::Open => 0,
			Edge::Key(key) => self.index.bisect_key_right(key)? - 1,
		};
		let last = match &stop {
			Edge::Open => self.index.len() - 1,
			Edge::Key(key) => self.index.bisect_key_left(key)? - 1,
		};
		if first == last {
			Ok(self.values[first].as_ref())
		} else {
			Err(Error::AmbiguousRange)
		}
	}

	/// Start key of the first mapped range.
	///
	/// `None` if the map is empty or unbounded to the left.
	pub fn start(&self) -> Option<&K> {
		if self.values[0].is_none() {
			self.index.get(1).and_then(Edge::key)
		} else {
			None
		}
	}

	/// Stop key of the last mapped range.
	///
	/// `None` if the map is empty or unbounded to the right.
	pub fn end(&self) -> Option<&K> {
		if self.values[self.values.len() - 1].is_none() {
			self.index.get(self.index.len() - 1).and_then(Edge::key)
		} else {
			None
		}
	}

	/// Iterate over the mapped spans in ascending key order.
	///
	/// The iterator is lazy and restartable; call `ranges` again for a
	/// fresh pass.
	pub fn ranges(&self) -> Ranges<'_, K, V> {
		Ranges { map: self, span: 0 }
	}
}

impl<K, V> RangeMap<K, V>
where
	K: Clone + PartialOrd,
	V: Clone + PartialEq,
{
	/// Create a map from `(range start, value)` entries.
	///
	/// Each key starts a range reaching to the next key; the last range is
	/// unbounded to the right.
	pub fn from_mapping<I>(mapping: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Ord,
	{
		let mut entries: Vec<(K, V)> = mapping.into_iter().collect();
		entries.sort_by(|a, b| a.0.cmp(&b.0));
		let mut map = Self::new();
		for (start, value) in entries {
			map.assign(Edge::Key(start), Edge::Open, Some(value))
				.expect("totally ordered keys");
		}
		map
	}

	/// Create a map from `(start, stop, value)` triples.
	///
	/// A triple whose span overlaps an already-mapped point is rejected
	/// with [`Error::Duplicate`]; overlap is never resolved silently.
	/// Construction is atomic: on error nothing is returned.
	pub fn from_triples<I, S, E>(triples: I) -> Result<Self>
	where
		I: IntoIterator<Item = (S, E, V)>,
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		let mut map = Self::new();
		for (start, stop, value) in triples {
			let start = start.into();
			let stop = stop.into();
			check_edges(&start, &stop)?;
			let first = match &start {
				Edge::Open => 0,
				Edge::Key(key) => map.index.bisect_key_right(key)? - 1,
			};
			let stop_loc = match &stop {
				Edge::Open => map.index.len(),
				Edge::Key(key) => map.index.bisect_key_left(key)?,
			};
			if map.values[first..stop_loc].iter().any(|value| value.is_some()) {
				return Err(Error::Duplicate);
			}
			map.assign(start, stop, Some(value))?;
		}
		Ok(map)
	}

	/// Assign `value` to every point of `[start, stop)`.
	///
	/// Boundaries strictly inside the span are removed, new boundaries are
	/// inserted at `start` and `stop` unless they coincide with existing
	/// ones, and adjacent equal-valued spans are merged eagerly. Assigning
	/// the same span twice is idempotent.
	pub fn set<S, E>(&mut self, start: S, stop: E, value: V) -> Result<()>
	where
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		self.assign(start.into(), stop.into(), Some(value))
	}

	/// Unset every point of `[start, stop)`.
	///
	/// Points already unset are left alone; see [`remove`](Self::remove)
	/// for the strict variant.
	pub fn delete<S, E>(&mut self, start: S, stop: E) -> Result<()>
	where
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		self.assign(start.into(), stop.into(), None)
	}

	/// Unset every point of `[start, stop)`, failing with
	/// [`Error::NotFound`] if any of them is not currently mapped.
	pub fn remove<S, E>(&mut self, start: S, stop: E) -> Result<()>
	where
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		let start = start.into();
		let stop = stop.into();
		check_edges(&start, &stop)?;
		let first = match &start {
			Edge::Open => 0,
			Edge::Key(key) => self.index.bisect_key_right(key)? - 1,
		};
		let stop_loc = match &stop {
			Edge::Open => self.index.len(),
			Edge::Key(key) => self.index.bisect_key_left(key)?,
		};
		if self.values[first..stop_loc].iter().any(|value| value.is_none()) {
			return Err(Error::NotFound);
		}
		self.assign(start, stop, None)
	}

	/// Extract the sub-map covering `[start, stop)`, clamping the first and
	/// last mapped ranges to the requested span.
	pub fn slice<S, E>(&self, start: S, stop: E) -> Result<Self>
	where
		S: Into<Edge<K>>,
		E: Into<Edge<K>>,
	{
		let mut out = Self::new();
		for (start, stop, value) in self.clamped_triples(start.into(), stop.into())? {
			out.assign(start, stop, Some(value))?;
		}
		Ok(out)
	}

	fn clamped_triples(
		&self,
		start: Edge<K>,
		stop: Edge<K>,
	) -> Result<Vec<(Edge<K>, Edge<K>, V)>> {
		check_edges(&start, &stop)?;
		let start_loc = self.index.bisect_right(&start)?;
		let stop_loc = match &stop {
			Edge::Open => self.index.len(),
			Edge::Key(key) => self.index.bisect_key_left(key)?,
		};
		let mut edges = Vec::with_capacity(stop_loc - start_loc + 2);
		edges.push(start);
		edges.extend(self.index.as_slice()[start_loc..stop_loc].iter().cloned());
		edges.push(stop);
		let mut slots = Vec::with_capacity(stop_loc - start_loc + 1);
		slots.push(&self.values[start_loc - 1]);
		slots.extend(self.values[start_loc..stop_loc].iter());
		let mut triples = Vec::new();
		for (i, slot) in slots.into_iter().enumerate() {
			if let Some(value) = slot {
				triples.push((edges[i].clone(), edges[i + 1].clone(), value.clone()));
			}
		}
		Ok(triples)
	}

	fn assign(&mut self, start: Edge<K>, stop: Edge<K>, value: Option<V>) -> Result<()> {
		check_edges(&start, &stop)?;
		let mut start = start;
		let mut start_index = self.index.bisect_left(&start)?;
		if !start.is_open() {
			// The span left of `start` already holds the new value: widen
			// the assignment to its start so the two merge.
			if self.values[start_index - 1] == value {
				start_index -= 1;
				start = self.index.edge(start_index).clone();
			}
		}
		let (stop_index, new_edges, new_values) = match stop {
			Edge::Open => (self.index.len(), vec![start], vec![value]),
			Edge::Key(ref key) => {
				let stop_index = self.index.bisect_key_right(key)?;
				// The value that used to occupy `stop` keeps the tail of
				// the split span. When it equals the assigned value there
				// is no tail to keep: the remainder is absorbed, so no
				// `stop` boundary is inserted and the spans merge.
				let tail = self.values[stop_index - 1].clone();
				if tail == value {
					(stop_index, vec![start], vec![value])
				} else {
					(stop_index, vec![start, stop], vec![value, tail])
				}
			}
		};
		self.index.splice(start_index, stop_index, new_edges);
		self.values.splice(start_index..stop_index, new_values);
		debug_assert!(self.is_canonical());
		Ok(())
	}

	fn is_canonical(&self) -> bool {
		self.values.len() == self.index.len()
			&& !self.values.windows(2).any(|pair| pair[0] == pair[1])
	}
}

fn check_edges<K: PartialOrd>(start: &Edge<K>, stop: &Edge<K>) -> Result<()> {
	if let (Edge::Key(start), Edge::Key(stop)) = (start, stop) {
		match stop.partial_cmp(start) {
			None => return Err(Error::UnorderableKey),
			Some(Ordering::Greater) => {}
			Some(_) => return Err(Error::KeyOrder),
		}
	}
	Ok(())
}

impl<K: PartialOrd, V> Default for RangeMap<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Clone, V: Clone> Clone for RangeMap<K, V> {
	fn clone(&self) -> Self {
		RangeMap {
			index: self.index.clone(),
			values: self.values.clone(),
		}
	}
}

impl<K: PartialEq, V: PartialEq> PartialEq for RangeMap<K, V> {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.values == other.values
	}
}

impl<K: Eq, V: Eq> Eq for RangeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RangeMap<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RangeMap(")?;
		for (i, range) in (Ranges { map: self, span: 0 }).enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(
				f,
				"[{:?}, {:?}) -> {:?}",
				range.start, range.stop, range.value
			)?;
		}
		write!(f, ")")
	}
}

/// Iterator over the mapped spans of a [`RangeMap`].
pub struct Ranges<'a, K, V> {
	map: &'a RangeMap<K, V>,
	span: usize,
}

impl<'a, K, V> Iterator for Ranges<'a, K, V> {
	type Item = MappedRange<'a, K, V>;

	fn next(&mut self) -> Option<Self::Item> {
		while self.span < self.map.values.len() {
			let span = self.span;
			self.span += 1;
			if let Some(value) = &self.map.values[span] {
				let start = self.map.index.edge(span).as_ref();
				let stop = match self.map.index.get(span + 1) {
					Some(edge) => edge.as_ref(),
					None => Edge::Open,
				};
				return Some(MappedRange { start, stop, value });
			}
		}
		None
	}
}

impl<'a, K: PartialOrd, V> IntoIterator for &'a RangeMap<K, V> {
	type Item = MappedRange<'a, K, V>;
	type IntoIter = Ranges<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.ranges()
	}
}

impl<'a, K: fmt::Display, V: fmt::Display> fmt::Display for MappedRange<'a, K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn edge<K: fmt::Display>(f: &mut fmt::Formatter<'_>, edge: &Edge<&K>) -> fmt::Result {
			match edge {
				Edge::Open => write!(f, "~"),
				Edge::Key(key) => write!(f, "{key}"),
			}
		}
		write!(f, "[")?;
		edge(f, &self.start)?;
		write!(f, ", ")?;
		edge(f, &self.stop)?;
		write!(f, ") -> {}", self.value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn own(edge: Edge<&i32>) -> Edge<i32> {
		match edge {
			Edge::Open => Edge::Open,
			Edge::Key(key) => Edge::Key(*key),
		}
	}

	fn triples(map: &RangeMap<i32, char>) -> Vec<(Edge<i32>, Edge<i32>, char)> {
		map.ranges()
			.map(|r| (own(r.start), own(r.stop), *r.value))
			.collect()
	}

	#[test]
	fn set_and_get() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		assert_eq!(map.get(&-1).unwrap(), None);
		assert_eq!(map.get(&0).unwrap(), Some(&'a'));
		assert_eq!(map.get(&9).unwrap(), Some(&'a'));
		assert_eq!(map.get(&10).unwrap(), None);
	}

	#[test]
	fn set_splits_existing_span() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.set(4, 6, 'b').unwrap();
		assert_eq!(
			triples(&map),
			vec![
				(Edge::Key(0), Edge::Key(4), 'a'),
				(Edge::Key(4), Edge::Key(6), 'b'),
				(Edge::Key(6), Edge::Key(10), 'a'),
			]
		);
	}

	#[test]
	fn adjacent_equal_spans_merge() {
		let mut map = RangeMap::new();
		map.set(0, 5, 'a').unwrap();
		map.set(5, 10, 'a').unwrap();
		assert_eq!(triples(&map), vec![(Edge::Key(0), Edge::Key(10), 'a')]);
	}

	#[test]
	fn set_inside_equal_valued_span_merges() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.set(0, 5, 'a').unwrap();
		assert_eq!(triples(&map), vec![(Edge::Key(0), Edge::Key(10), 'a')]);
		// A uniformly mapped span still answers as a single range.
		assert_eq!(map.get_range(0, 10).unwrap(), Some(&'a'));

		map.set(3, 7, 'a').unwrap();
		assert_eq!(triples(&map), vec![(Edge::Key(0), Edge::Key(10), 'a')]);
	}

	#[test]
	fn delete_past_the_mapped_end_merges() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.delete(5, 20).unwrap();
		assert_eq!(triples(&map), vec![(Edge::Key(0), Edge::Key(5), 'a')]);
		map.delete(5, Edge::Open).unwrap();
		assert_eq!(triples(&map), vec![(Edge::Key(0), Edge::Key(5), 'a')]);
	}

	#[test]
	fn set_is_idempotent() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.set(3, 7, 'b').unwrap();
		let snapshot = map.clone();
		map.set(3, 7, 'b').unwrap();
		assert_eq!(map, snapshot);
	}

	#[test]
	fn open_edges_cover_infinities() {
		let mut map = RangeMap::new();
		map.set(Edge::Open, 0, 'n').unwrap();
		map.set(0, Edge::Open, 'p').unwrap();
		assert_eq!(map.get(&i32::MIN).unwrap(), Some(&'n'));
		assert_eq!(map.get(&i32::MAX).unwrap(), Some(&'p'));
		map.set(Edge::Open, Edge::Open, 'a').unwrap();
		assert_eq!(triples(&map), vec![(Edge::Open, Edge::Open, 'a')]);
	}

	#[test]
	fn bad_bounds_are_rejected() {
		let mut map: RangeMap<i32, char> = RangeMap::new();
		assert_eq!(map.set(5, 5, 'a'), Err(Error::KeyOrder));
		assert_eq!(map.set(6, 5, 'a'), Err(Error::KeyOrder));
	}

	#[test]
	fn unorderable_key_is_rejected() {
		let mut map: RangeMap<f64, char> = RangeMap::new();
		map.set(0.0, 10.0, 'a').unwrap();
		assert_eq!(map.get(&f64::NAN), Err(Error::UnorderableKey));
		assert_eq!(map.set(f64::NAN, 20.0, 'b'), Err(Error::UnorderableKey));
	}

	#[test]
	fn delete_unsets_and_merges() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.delete(2, 8).unwrap();
		assert_eq!(
			triples(&map),
			vec![
				(Edge::Key(0), Edge::Key(2), 'a'),
				(Edge::Key(8), Edge::Key(10), 'a'),
			]
		);
		map.delete(0, 2).unwrap();
		map.delete(8, 10).unwrap();
		assert!(map.is_empty());
		assert_eq!(map, RangeMap::new());
	}

	#[test]
	fn strict_remove_requires_full_coverage() {
		let mut map = RangeMap::new();
		map.set(0, 5, 'a').unwrap();
		assert_eq!(map.remove(3, 8), Err(Error::NotFound));
		// Nothing was unset by the failed call.
		assert_eq!(map.get(&4).unwrap(), Some(&'a'));
		map.remove(0, 5).unwrap();
		assert!(map.is_empty());
	}

	#[test]
	fn get_range_detects_ambiguity() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.set(10, 20, 'b').unwrap();
		assert_eq!(map.get_range(2, 8).unwrap(), Some(&'a'));
		assert_eq!(map.get_range(0, 10).unwrap(), Some(&'a'));
		assert_eq!(map.get_range(12, 20).unwrap(), Some(&'b'));
		assert_eq!(map.get_range(5, 15), Err(Error::AmbiguousRange));
		assert_eq!(map.get_range(5, 25), Err(Error::AmbiguousRange));
		assert_eq!(map.get_range(25, 30).unwrap(), None);
	}

	#[test]
	fn from_triples_rejects_overlap() {
		let map = RangeMap::from_triples([(0, 5, 'a'), (5, 10, 'b')]).unwrap();
		assert_eq!(map.get(&4).unwrap(), Some(&'a'));
		assert_eq!(map.get(&5).unwrap(), Some(&'b'));

		let overlapping = RangeMap::from_triples([(0, 5, 'a'), (4, 10, 'b')]);
		assert_eq!(overlapping, Err(Error::Duplicate));
		let equal_values = RangeMap::from_triples([(0, 5, 'a'), (4, 10, 'a')]);
		assert_eq!(equal_values, Err(Error::Duplicate));
	}

	#[test]
	fn from_mapping_chains_ranges() {
		let map = RangeMap::from_mapping([(10, 'b'), (0, 'a'), (20, 'c')]);
		assert_eq!(map.get(&-1).unwrap(), None);
		assert_eq!(map.get(&5).unwrap(), Some(&'a'));
		assert_eq!(map.get(&15).unwrap(), Some(&'b'));
		assert_eq!(map.get(&1000).unwrap(), Some(&'c'));
		assert_eq!(map.start(), Some(&0));
		assert_eq!(map.end(), None);
	}

	#[test]
	fn slice_clamps_to_span() {
		let mut map = RangeMap::new();
		map.set(0, 10, 'a').unwrap();
		map.set(10, 20, 'b').unwrap();
		let slice = map.slice(5, 15).unwrap();
		assert_eq!(
			triples(&slice),
			vec![
				(Edge::Key(5), Edge::Key(10), 'a'),
				(Edge::Key(10), Edge::Key(15), 'b'),
			]
		);
	}

	#[test]
	fn start_and_end_report_bounds() {
		let mut map = RangeMap::new();
		assert_eq!(map.start(), None);
		assert_eq!(map.end(), None);
		map.set(3, 9, 'a').unwrap();
		assert_eq!(map.start(), Some(&3));
		assert_eq!(map.end(), Some(&9));
		map.set(Edge::Open, 3, 'b').unwrap();
		assert_eq!(map.start(), None);
	}

	#[test]
	fn ranges_need_no_total_order() {
		// f64 is PartialOrd but not Ord; iteration and Debug only read
		// boundaries, so neither asks for more.
		let mut map = RangeMap::new();
		map.set(0.0, 1.0, 'a').unwrap();
		let spans: Vec<_> = map.ranges().collect();
		assert_eq!(spans.len(), 1);
		assert_eq!(spans[0].value, &'a');
		assert_eq!(
			format!("{map:?}"),
			"RangeMap([Key(0.0), Key(1.0)) -> 'a')"
		);
	}

	#[test]
	fn debug_lists_mapped_ranges() {
		let mut map = RangeMap::new();
		map.set(1, 2, 'x').unwrap();
		assert_eq!(
			format!("{map:?}"),
			"RangeMap([Key(1), Key(2)) -> 'x')"
		);
	}
}
