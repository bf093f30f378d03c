//! Bag (multiset) definitions.

use std::cmp::{Ordering, Reverse};
use std::collections::hash_map;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, BitAnd, BitOr, BitXor, Deref, Mul, Sub};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::hash::{hash_one, DefaultHashBuilder};

#[derive(Clone, Debug)]
struct Slot {
	count: usize,
	/// Tick at which the element was first added; orders `nlargest` ties.
	first_seen: u64,
}

/// A multiset: every element carries a multiplicity of at least one.
///
/// Elements with multiplicity zero are removed immediately, and the total
/// size (the sum of all counts) is cached for O(1) [`len`](Bag::len).
///
/// ```
/// use collections_extended::Bag;
///
/// let bag: Bag<char> = "aaabbc".chars().collect();
/// assert_eq!(bag.count(&'a'), 3);
/// assert_eq!(bag.count(&'z'), 0);
/// assert_eq!(bag.len(), 6);
/// ```
#[derive(Clone)]
pub struct Bag<T> {
	slots: HashMap<T, Slot, DefaultHashBuilder>,
	size: usize,
	tick: u64,
}

impl<T: Eq + Hash> Bag<T> {
	pub fn new() -> Self {
		Bag {
			slots: HashMap::default(),
			size: 0,
			tick: 0,
		}
	}

	/// Create a bag from `(element, count)` pairs. Zero counts are skipped;
	/// a repeated element takes the last count given.
	pub fn from_counts<I>(counts: I) -> Self
	where
		I: IntoIterator<Item = (T, usize)>,
	{
		let mut bag = Self::new();
		for (elem, count) in counts {
			bag.set_count(elem, count);
		}
		bag
	}

	/// Total number of elements, counting multiplicity. O(1).
	pub fn len(&self) -> usize {
		self.size
	}

	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	/// Number of distinct elements. O(1).
	pub fn distinct_len(&self) -> usize {
		self.slots.len()
	}

	/// Multiplicity of `elem`, zero if absent. O(1).
	pub fn count(&self, elem: &T) -> usize {
		self.slots.get(elem).map_or(0, |slot| slot.count)
	}

	pub fn contains(&self, elem: &T) -> bool {
		self.slots.contains_key(elem)
	}

	/// Add one occurrence of `elem`.
	pub fn add(&mut self, elem: T) {
		self.add_n(elem, 1);
	}

	/// Add `n` occurrences of `elem`.
	pub fn add_n(&mut self, elem: T, n: usize) {
		if n == 0 {
			return;
		}
		self.size += n;
		match self.slots.entry(elem) {
			hash_map::Entry::Occupied(mut entry) => entry.get_mut().count += n,
			hash_map::Entry::Vacant(entry) => {
				entry.insert(Slot {
					count: n,
					first_seen: self.tick,
				});
				self.tick += 1;
			}
		}
	}

	/// Remove one occurrence of `elem`, failing with [`Error::NotFound`]
	/// if it is absent. See [`discard`](Bag::discard) for the silent
	/// counterpart.
	pub fn remove(&mut self, elem: &T) -> Result<()> {
		self.remove_n(elem, 1)
	}

	/// Remove `n` occurrences of `elem`. Fails without mutating if fewer
	/// than `n` are present.
	pub fn remove_n(&mut self, elem: &T, n: usize) -> Result<()> {
		if n == 0 {
			return Ok(());
		}
		let slot = self.slots.get_mut(elem).ok_or(Error::NotFound)?;
		if slot.count < n {
			return Err(Error::NotFound);
		}
		slot.count -= n;
		self.size -= n;
		if slot.count == 0 {
			self.slots.remove(elem);
		}
		Ok(())
	}

	/// Remove one occurrence of `elem` if present. Returns whether the bag
	/// changed.
	pub fn discard(&mut self, elem: &T) -> bool {
		self.remove(elem).is_ok()
	}

	pub fn clear(&mut self) {
		self.slots.clear();
		self.size = 0;
	}

	/// Iterate over the distinct elements.
	pub fn unique_elements(&self) -> UniqueElements<'_, T> {
		UniqueElements {
			inner: self.slots.keys(),
		}
	}

	/// Iterate over `(element, count)` pairs.
	pub fn counts(&self) -> Counts<'_, T> {
		Counts {
			inner: self.slots.iter(),
		}
	}

	/// Iterate over every element, repeated by multiplicity.
	pub fn iter(&self) -> Iter<'_, T> {
		Iter {
			inner: self.slots.iter(),
			current: None,
		}
	}

	/// The up-to-`n` most common elements with their counts, most common
	/// first; all of them if `n` is `None`. Ties are broken by the order in
	/// which elements were first added.
	///
	/// Runs in O(k log k) over k distinct elements, or O(k log n) via
	/// partial heap selection when `n` is smaller than k.
	pub fn nlargest(&self, n: Option<usize>) -> Vec<(&T, usize)> {
		let items: Vec<(&T, &Slot)> = self.slots.iter().collect();
		match n {
			Some(0) => Vec::new(),
			Some(n) if n < items.len() => {
				// Min-heap holding the best n seen so far; the weakest
				// candidate sits on top and is evicted first.
				let mut heap = BinaryHeap::with_capacity(n + 1);
				for (i, (_, slot)) in items.iter().enumerate() {
					heap.push(Reverse((slot.count, Reverse(slot.first_seen), i)));
					if heap.len() > n {
						heap.pop();
					}
				}
				heap.into_sorted_vec()
					.into_iter()
					.map(|Reverse((count, _, i))| (items[i].0, count))
					.collect()
			}
			_ => {
				let mut items = items;
				items.sort_by(|a, b| {
					b.1.count
						.cmp(&a.1.count)
						.then(a.1.first_seen.cmp(&b.1.first_seen))
				});
				let mut out: Vec<(&T, usize)> =
					items.into_iter().map(|(elem, slot)| (elem, slot.count)).collect();
				if let Some(n) = n {
					out.truncate(n);
				}
				out
			}
		}
	}

	/// Whether every element of `self` has a count <= its count in `other`.
	pub fn is_subset(&self, other: &Bag<T>) -> bool {
		self.counts().all(|(elem, count)| count <= other.count(elem))
	}

	/// Whether every element of `other` has a count <= its count in `self`.
	pub fn is_superset(&self, other: &Bag<T>) -> bool {
		other.is_subset(self)
	}

	pub fn is_disjoint(&self, other: &Bag<T>) -> bool {
		self.unique_elements().all(|elem| !other.contains(elem))
	}

	/// Set the multiplicity of `elem` outright, dropping the entry when the
	/// count reaches zero.
	fn set_count(&mut self, elem: T, count: usize) {
		match self.slots.entry(elem) {
			hash_map::Entry::Occupied(mut entry) => {
				self.size = self.size - entry.get().count + count;
				if count == 0 {
					entry.remove();
				} else {
					entry.get_mut().count = count;
				}
			}
			hash_map::Entry::Vacant(entry) => {
				if count > 0 {
					self.size += count;
					entry.insert(Slot {
						count,
						first_seen: self.tick,
					});
					self.tick += 1;
				}
			}
		}
	}
}

impl<T: Clone + Eq + Hash> Bag<T> {
	/// Remove and return one occurrence of an arbitrary element.
	pub fn pop(&mut self) -> Option<T> {
		let elem = self.slots.keys().next()?.clone();
		self.remove(&elem).ok()?;
		Some(elem)
	}

	/// Union: per-element maximum of the two counts.
	pub fn union(&self, other: &Bag<T>) -> Bag<T> {
		let mut out = self.clone();
		for (elem, count) in other.counts() {
			if count > out.count(elem) {
				out.set_count(elem.clone(), count);
			}
		}
		out
	}

	/// Intersection: per-element minimum of the two counts.
	pub fn intersection(&self, other: &Bag<T>) -> Bag<T> {
		let mut out = Bag::new();
		for (elem, count) in self.counts() {
			let shared = count.min(other.count(elem));
			if shared > 0 {
				out.add_n(elem.clone(), shared);
			}
		}
		out
	}

	/// Sum: per-element addition of the two counts.
	pub fn sum(&self, other: &Bag<T>) -> Bag<T> {
		let mut out = self.clone();
		for (elem, count) in other.counts() {
			out.add_n(elem.clone(), count);
		}
		out
	}

	/// Difference: per-element saturating subtraction.
	pub fn difference(&self, other: &Bag<T>) -> Bag<T> {
		let mut out = self.clone();
		for (elem, count) in other.counts() {
			let remaining = out.count(elem).saturating_sub(count);
			out.set_count(elem.clone(), remaining);
		}
		out
	}

	/// Symmetric difference: per-element absolute difference of counts.
	pub fn symmetric_difference(&self, other: &Bag<T>) -> Bag<T> {
		let mut out = self.clone();
		for (elem, count) in other.counts() {
			let diff = self.count(elem).abs_diff(count);
			out.set_count(elem.clone(), diff);
		}
		out
	}

	/// Cartesian product: pairs every element of `self` with every element
	/// of `other`.
	///
	/// The count of each `(a, b)` pair is the **product** of the two source
	/// counts, not their sum or concatenation. `{a, a} * {b}` is
	/// `{(a, b), (a, b)}`.
	pub fn product<U: Clone + Eq + Hash>(&self, other: &Bag<U>) -> Bag<(T, U)> {
		let mut out = Bag::new();
		for (elem, count) in self.counts() {
			for (other_elem, other_count) in other.counts() {
				out.add_n((elem.clone(), other_elem.clone()), count * other_count);
			}
		}
		out
	}

	/// Remove every occurrence counted by `other`, failing with
	/// [`Error::NotFound`] (and mutating nothing) unless `other` is a
	/// subset of `self`.
	pub fn remove_all(&mut self, other: &Bag<T>) -> Result<()> {
		if !self.is_superset(other) {
			return Err(Error::NotFound);
		}
		self.discard_all(other);
		Ok(())
	}

	/// Remove every occurrence counted by `other`, saturating at zero.
	pub fn discard_all(&mut self, other: &Bag<T>) {
		for (elem, count) in other.counts() {
			let remaining = self.count(elem).saturating_sub(count);
			self.set_count(elem.clone(), remaining);
		}
	}
}

impl<T: Eq + Hash> Default for Bag<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Eq + Hash> FromIterator<T> for Bag<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut bag = Bag::new();
		bag.extend(iter);
		bag
	}
}

impl<T: Eq + Hash> Extend<T> for Bag<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for elem in iter {
			self.add(elem);
		}
	}
}

impl<T: Eq + Hash> PartialEq for Bag<T> {
	fn eq(&self, other: &Self) -> bool {
		self.size == other.size && self.counts().all(|(elem, count)| other.count(elem) == count)
	}
}

impl<T: Eq + Hash> Eq for Bag<T> {}

/// The multiset partial order: `a <= b` iff every count in `a` is <= the
/// matching count in `b`. Bags that are neither compare as `None`.
impl<T: Eq + Hash> PartialOrd for Bag<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self.is_subset(other), self.is_superset(other)) {
			(true, true) => Some(Ordering::Equal),
			(true, false) => Some(Ordering::Less),
			(false, true) => Some(Ordering::Greater),
			(false, false) => None,
		}
	}
}

impl<T: fmt::Debug + Eq + Hash> fmt::Debug for Bag<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Bag")?;
		f.debug_map().entries(self.counts()).finish()
	}
}

impl<T: Clone + Eq + Hash> BitOr for &Bag<T> {
	type Output = Bag<T>;

	fn bitor(self, rhs: Self) -> Bag<T> {
		self.union(rhs)
	}
}

impl<T: Clone + Eq + Hash> BitAnd for &Bag<T> {
	type Output = Bag<T>;

	fn bitand(self, rhs: Self) -> Bag<T> {
		self.intersection(rhs)
	}
}

impl<T: Clone + Eq + Hash> Add for &Bag<T> {
	type Output = Bag<T>;

	fn add(self, rhs: Self) -> Bag<T> {
		self.sum(rhs)
	}
}

impl<T: Clone + Eq + Hash> Sub for &Bag<T> {
	type Output = Bag<T>;

	fn sub(self, rhs: Self) -> Bag<T> {
		self.difference(rhs)
	}
}

impl<T: Clone + Eq + Hash> BitXor for &Bag<T> {
	type Output = Bag<T>;

	fn bitxor(self, rhs: Self) -> Bag<T> {
		self.symmetric_difference(rhs)
	}
}

impl<T: Clone + Eq + Hash, U: Clone + Eq + Hash> Mul<&Bag<U>> for &Bag<T> {
	type Output = Bag<(T, U)>;

	fn mul(self, rhs: &Bag<U>) -> Bag<(T, U)> {
		self.product(rhs)
	}
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Bag<T> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Iterator over the distinct elements of a [`Bag`].
pub struct UniqueElements<'a, T> {
	inner: hash_map::Keys<'a, T, Slot>,
}

impl<'a, T> Iterator for UniqueElements<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> {
		self.inner.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<'a, T> ExactSizeIterator for UniqueElements<'a, T> {}

/// Iterator over the `(element, count)` pairs of a [`Bag`].
pub struct Counts<'a, T> {
	inner: hash_map::Iter<'a, T, Slot>,
}

impl<'a, T> Iterator for Counts<'a, T> {
	type Item = (&'a T, usize);

	fn next(&mut self) -> Option<(&'a T, usize)> {
		self.inner.next().map(|(elem, slot)| (elem, slot.count))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<'a, T> ExactSizeIterator for Counts<'a, T> {}

/// Iterator over every element of a [`Bag`], repeated by multiplicity.
pub struct Iter<'a, T> {
	inner: hash_map::Iter<'a, T, Slot>,
	current: Option<(&'a T, usize)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn next(&mut self) -> Option<&'a T> {
		loop {
			match &mut self.current {
				Some((elem, remaining)) if *remaining > 0 => {
					*remaining -= 1;
					return Some(elem);
				}
				_ => {
					let (elem, slot) = self.inner.next()?;
					self.current = Some((elem, slot.count));
				}
			}
		}
	}
}

/// An immutable, hashable bag.
///
/// The hash is derived from the contents, order-independently, computed on
/// first request and cached; caching without invalidation is safe because
/// the bag cannot change after construction.
#[derive(Clone)]
pub struct FrozenBag<T> {
	inner: Bag<T>,
	cached_hash: OnceLock<u64>,
}

impl<T: Eq + Hash> FrozenBag<T> {
	pub fn as_bag(&self) -> &Bag<T> {
		&self.inner
	}

	fn content_hash(&self) -> u64 {
		let mut acc = 0u64;
		for entry in self.inner.counts() {
			// Commutative combination keeps the hash independent of the
			// arbitrary iteration order of the underlying map.
			acc = acc.wrapping_add(hash_one(&entry) | 1);
		}
		acc ^ self.inner.distinct_len() as u64
	}
}

impl<T: Eq + Hash> From<Bag<T>> for FrozenBag<T> {
	fn from(inner: Bag<T>) -> Self {
		FrozenBag {
			inner,
			cached_hash: OnceLock::new(),
		}
	}
}

impl<T: Eq + Hash> FromIterator<T> for FrozenBag<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Bag::from_iter(iter).into()
	}
}

impl<T> Deref for FrozenBag<T> {
	type Target = Bag<T>;

	fn deref(&self) -> &Bag<T> {
		&self.inner
	}
}

impl<T: Eq + Hash> PartialEq for FrozenBag<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T: Eq + Hash> Eq for FrozenBag<T> {}

impl<T: Eq + Hash> Hash for FrozenBag<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let hash = self.cached_hash.get_or_init(|| self.content_hash());
		state.write_u64(*hash);
	}
}

impl<T: fmt::Debug + Eq + Hash> fmt::Debug for FrozenBag<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Frozen")?;
		fmt::Debug::fmt(&self.inner, f)
	}
}

static_assertions::assert_impl_all!(FrozenBag<u32>: std::hash::Hash, Send, Sync);
static_assertions::assert_impl_all!(Bag<String>: Send, Sync);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_and_cached_size() {
		let mut bag: Bag<char> = "aaabbc".chars().collect();
		assert_eq!(bag.count(&'a'), 3);
		assert_eq!(bag.count(&'b'), 2);
		assert_eq!(bag.count(&'c'), 1);
		assert_eq!(bag.len(), 6);
		assert_eq!(bag.distinct_len(), 3);

		Bag::add(&mut bag, 'a');
		assert_eq!(bag.len(), 7);
		bag.remove(&'a').unwrap();
		assert_eq!(bag.count(&'a'), 3);
		assert_eq!(bag.len(), 6);
	}

	#[test]
	fn zero_count_entries_vanish() {
		let mut bag = Bag::new();
		Bag::add(&mut bag, "x");
		bag.remove(&"x").unwrap();
		assert!(!bag.contains(&"x"));
		assert_eq!(bag.distinct_len(), 0);
		assert_eq!(bag.remove(&"x"), Err(Error::NotFound));
		assert!(!bag.discard(&"x"));
	}

	#[test]
	fn from_counts_skips_zeroes() {
		let bag = Bag::from_counts([("a", 2), ("b", 0), ("c", 1)]);
		assert_eq!(bag.len(), 3);
		assert!(!bag.contains(&"b"));
	}

	#[test]
	fn nlargest_orders_ties_by_first_seen() {
		let bag: Bag<char> = "bbaaccc".chars().collect();
		let all = bag.nlargest(None);
		assert_eq!(all, vec![(&'c', 3), (&'b', 2), (&'a', 2)]);
		assert_eq!(bag.nlargest(Some(2)), vec![(&'c', 3), (&'b', 2)]);
		assert_eq!(bag.nlargest(Some(0)), vec![]);
	}

	#[test]
	fn product_multiplies_counts() {
		let left: Bag<char> = "aab".chars().collect();
		let right: Bag<u8> = [1, 1, 1, 2].into_iter().collect();
		let pairs = &left * &right;
		assert_eq!(pairs.count(&('a', 1)), 6);
		assert_eq!(pairs.count(&('a', 2)), 2);
		assert_eq!(pairs.count(&('b', 1)), 3);
		assert_eq!(pairs.len(), left.len() * right.len());
	}

	#[test]
	fn multiset_partial_order() {
		let small: Bag<char> = "ab".chars().collect();
		let large: Bag<char> = "aabb".chars().collect();
		let other: Bag<char> = "ac".chars().collect();
		assert!(small < large);
		assert!(large > small);
		assert_eq!(small.partial_cmp(&other), None);
		assert!(small.is_subset(&large));
		assert!(!small.is_subset(&other));
	}

	#[test]
	fn frozen_hash_is_content_based() {
		use std::collections::HashSet;

		let a: FrozenBag<char> = "abcabc".chars().collect();
		let b: FrozenBag<char> = "cbacba".chars().collect();
		assert_eq!(a, b);
		assert_eq!(a.content_hash(), b.content_hash());

		let mut seen = HashSet::new();
		assert!(seen.insert(a));
		assert!(!seen.insert(b));
	}
}
