//! Insertion-ordered sets with positional indexing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Deref, Index, Sub};
use std::slice;
use std::sync::OnceLock;
use std::vec;

use crate::error::{Error, Result};
use crate::hash::{hash_one, DefaultHashBuilder};

/// An ordered set: a sequence of unique elements supporting O(1) membership
/// tests and O(1) element-to-position lookup.
///
/// The element order is the insertion order, and positional access works
/// like a slice. A backing hash index is kept in lockstep with the
/// sequence.
///
/// ```
/// use collections_extended::SetList;
///
/// let sl: SetList<char> = "abracadabra".chars().collect();
/// assert_eq!(sl.as_slice(), &['a', 'b', 'r', 'c', 'd']);
/// assert_eq!(sl.index_of(&'d'), Some(4));
/// ```
#[derive(Clone)]
pub struct SetList<T> {
	items: Vec<T>,
	index: HashIndex<T>,
}

type HashIndex<T> = std::collections::HashMap<T, usize, DefaultHashBuilder>;

impl<T: Clone + Eq + Hash> SetList<T> {
	pub fn new() -> Self {
		SetList {
			items: Vec::new(),
			index: HashIndex::default(),
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		SetList {
			items: Vec::with_capacity(capacity),
			index: HashIndex::with_capacity_and_hasher(capacity, Default::default()),
		}
	}

	/// Build from an iterator, failing with [`Error::Duplicate`] on the
	/// first repeated element. The permissive counterpart is the
	/// [`FromIterator`] impl, which keeps the first occurrence and skips
	/// the rest.
	pub fn from_iter_strict<I>(iter: I) -> Result<Self>
	where
		I: IntoIterator<Item = T>,
	{
		let mut list = Self::new();
		for elem in iter {
			list.append(elem)?;
		}
		Ok(list)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// O(1).
	pub fn contains(&self, elem: &T) -> bool {
		self.index.contains_key(elem)
	}

	/// Position of `elem`, if present. O(1).
	pub fn index_of(&self, elem: &T) -> Option<usize> {
		self.index.get(elem).copied()
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.items.get(index)
	}

	/// First position at which `sub` occurs as a contiguous subsequence.
	pub fn sub_index(&self, sub: &[T]) -> Result<usize> {
		if sub.is_empty() {
			return Ok(0);
		}
		// Unique elements make candidate starts unique too, so there is at
		// most one position to check.
		let start = self.index_of(&sub[0]).ok_or(Error::NotFound)?;
		if self.items[start..].starts_with(sub) {
			Ok(start)
		} else {
			Err(Error::NotFound)
		}
	}

	pub fn first(&self) -> Option<&T> {
		self.items.first()
	}

	pub fn last(&self) -> Option<&T> {
		self.items.last()
	}

	pub fn as_slice(&self) -> &[T] {
		&self.items
	}

	pub fn iter(&self) -> slice::Iter<'_, T> {
		self.items.iter()
	}

	/// Append `elem`, failing with [`Error::Duplicate`] if it is already
	/// present.
	pub fn append(&mut self, elem: T) -> Result<()> {
		if self.contains(&elem) {
			return Err(Error::Duplicate);
		}
		self.index.insert(elem.clone(), self.items.len());
		self.items.push(elem);
		Ok(())
	}

	/// Append `elem` if absent. Returns whether the list changed.
	pub fn add(&mut self, elem: T) -> bool {
		self.append(elem).is_ok()
	}

	/// Insert `elem` at `index`, shifting later elements right.
	///
	/// Fails with [`Error::Duplicate`] if `elem` is already present.
	/// Panics if `index > len`, like [`Vec::insert`].
	pub fn insert(&mut self, index: usize, elem: T) -> Result<()> {
		if self.contains(&elem) {
			return Err(Error::Duplicate);
		}
		self.items.insert(index, elem.clone());
		self.index.insert(elem, index);
		self.reindex_from(index + 1);
		Ok(())
	}

	/// Remove `elem`, shifting later elements left. Fails with
	/// [`Error::NotFound`] if absent.
	pub fn remove(&mut self, elem: &T) -> Result<()> {
		let index = self.index_of(elem).ok_or(Error::NotFound)?;
		self.remove_at(index);
		Ok(())
	}

	/// Remove `elem` if present. Returns whether the list changed.
	pub fn discard(&mut self, elem: &T) -> bool {
		self.remove(elem).is_ok()
	}

	/// Remove and return the element at `index`, shifting later elements
	/// left. Panics if out of range, like [`Vec::remove`].
	pub fn remove_at(&mut self, index: usize) -> T {
		let elem = self.items.remove(index);
		self.index.remove(&elem);
		self.reindex_from(index);
		elem
	}

	pub fn pop(&mut self) -> Option<T> {
		let elem = self.items.pop()?;
		self.index.remove(&elem);
		Some(elem)
	}

	/// Append every element of `iter`, failing with [`Error::Duplicate`]
	/// and leaving the list unchanged if any element is already present or
	/// repeats within `iter`.
	pub fn append_all<I>(&mut self, iter: I) -> Result<()>
	where
		I: IntoIterator<Item = T>,
	{
		// Validate against both the list and the batch itself before
		// touching the list, so a failure mutates nothing.
		let incoming = SetList::from_iter_strict(iter)?;
		for elem in incoming.iter() {
			if self.contains(elem) {
				return Err(Error::Duplicate);
			}
		}
		for elem in incoming {
			self.index.insert(elem.clone(), self.items.len());
			self.items.push(elem);
		}
		Ok(())
	}

	/// Append the elements of `iter` that are not yet present.
	pub fn update<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = T>,
	{
		for elem in iter {
			self.add(elem);
		}
	}

	/// Remove every element of `iter`, failing with [`Error::NotFound`]
	/// and leaving the list unchanged if any is absent.
	pub fn remove_all<I>(&mut self, iter: I) -> Result<()>
	where
		I: IntoIterator<Item = T> + Clone,
	{
		for elem in iter.clone() {
			if !self.contains(&elem) {
				return Err(Error::NotFound);
			}
		}
		self.discard_all(iter);
		Ok(())
	}

	/// Remove every element of `iter` that is present.
	pub fn discard_all<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = T>,
	{
		for elem in iter {
			self.discard(&elem);
		}
	}

	pub fn clear(&mut self) {
		self.items.clear();
		self.index.clear();
	}

	/// Exchange the elements at `i` and `j` and patch the index, leaving
	/// both structures consistent. Panics if either is out of range.
	pub fn swap(&mut self, i: usize, j: usize) {
		self.items.swap(i, j);
		self.index.insert(self.items[i].clone(), i);
		self.index.insert(self.items[j].clone(), j);
	}

	/// Shuffle in place with the Fisher-Yates walk, drawing positions from
	/// `rand_below`: each call must return a value in `0..n` for the given
	/// `n`. Taking the source of randomness as a closure keeps the shuffle
	/// reproducible under a deterministic source.
	pub fn shuffle<F>(&mut self, mut rand_below: F)
	where
		F: FnMut(usize) -> usize,
	{
		for i in (1..self.items.len()).rev() {
			let j = rand_below(i + 1);
			self.swap(i, j);
		}
	}

	pub fn reverse(&mut self) {
		self.items.reverse();
		self.reindex_from(0);
	}

	pub fn sort(&mut self)
	where
		T: Ord,
	{
		self.items.sort();
		self.reindex_from(0);
	}

	pub fn sort_by<F>(&mut self, compare: F)
	where
		F: FnMut(&T, &T) -> std::cmp::Ordering,
	{
		self.items.sort_by(compare);
		self.reindex_from(0);
	}

	/// Elements of `self` followed by the elements of `other` not already
	/// present.
	pub fn union(&self, other: &SetList<T>) -> SetList<T> {
		let mut out = self.clone();
		out.update(other.iter().cloned());
		out
	}

	/// Elements of `self` that are also in `other`, in `self` order.
	pub fn intersection(&self, other: &SetList<T>) -> SetList<T> {
		self.iter().filter(|e| other.contains(e)).cloned().collect()
	}

	/// Elements of `self` that are not in `other`, in `self` order.
	pub fn difference(&self, other: &SetList<T>) -> SetList<T> {
		self.iter().filter(|e| !other.contains(e)).cloned().collect()
	}

	/// Elements in exactly one of the two lists: the `self`-only elements
	/// followed by the `other`-only ones.
	pub fn symmetric_difference(&self, other: &SetList<T>) -> SetList<T> {
		let mut out = self.difference(other);
		out.update(other.iter().filter(|e| !self.contains(e)).cloned());
		out
	}

	pub fn is_subset(&self, other: &SetList<T>) -> bool {
		self.iter().all(|e| other.contains(e))
	}

	pub fn is_superset(&self, other: &SetList<T>) -> bool {
		other.is_subset(self)
	}

	pub fn is_disjoint(&self, other: &SetList<T>) -> bool {
		self.iter().all(|e| !other.contains(e))
	}

	/// Recompute the stored positions of `items[from..]`.
	fn reindex_from(&mut self, from: usize) {
		for (i, elem) in self.items.iter().enumerate().skip(from) {
			if let Some(slot) = self.index.get_mut(elem) {
				*slot = i;
			}
		}
	}

	#[cfg(test)]
	fn is_consistent(&self) -> bool {
		self.items.len() == self.index.len()
			&& self
				.items
				.iter()
				.enumerate()
				.all(|(i, elem)| self.index_of(elem) == Some(i))
	}
}

impl<T: Clone + Eq + Hash> Default for SetList<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Keeps the first occurrence of each element and skips the rest. Use
/// [`SetList::from_iter_strict`] to fail on duplicates instead.
impl<T: Clone + Eq + Hash> FromIterator<T> for SetList<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut list = SetList::new();
		list.update(iter);
		list
	}
}

/// Permissive: already-present elements are skipped. Use
/// [`SetList::append_all`] for the strict, atomic form.
impl<T: Clone + Eq + Hash> Extend<T> for SetList<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.update(iter);
	}
}

/// Order-sensitive: two set-lists are equal only when they hold the same
/// elements in the same order.
impl<T: Eq + Hash> PartialEq for SetList<T> {
	fn eq(&self, other: &Self) -> bool {
		self.items == other.items
	}
}

impl<T: Eq + Hash> Eq for SetList<T> {}

impl<T> Index<usize> for SetList<T> {
	type Output = T;

	fn index(&self, index: usize) -> &T {
		&self.items[index]
	}
}

impl<T: fmt::Debug> fmt::Debug for SetList<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SetList")?;
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl<'a, T> IntoIterator for &'a SetList<T> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

impl<T> IntoIterator for SetList<T> {
	type Item = T;
	type IntoIter = vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<T: Clone + Eq + Hash> BitOr for &SetList<T> {
	type Output = SetList<T>;

	fn bitor(self, rhs: Self) -> SetList<T> {
		self.union(rhs)
	}
}

impl<T: Clone + Eq + Hash> BitAnd for &SetList<T> {
	type Output = SetList<T>;

	fn bitand(self, rhs: Self) -> SetList<T> {
		self.intersection(rhs)
	}
}

impl<T: Clone + Eq + Hash> Sub for &SetList<T> {
	type Output = SetList<T>;

	fn sub(self, rhs: Self) -> SetList<T> {
		self.difference(rhs)
	}
}

impl<T: Clone + Eq + Hash> BitXor for &SetList<T> {
	type Output = SetList<T>;

	fn bitxor(self, rhs: Self) -> SetList<T> {
		self.symmetric_difference(rhs)
	}
}

/// An immutable, hashable set-list.
///
/// The hash is order-dependent, matching the order-sensitive equality of
/// [`SetList`]; it is computed on first request and cached, which is safe
/// because the contents cannot change after construction.
#[derive(Clone)]
pub struct FrozenSetList<T> {
	inner: SetList<T>,
	cached_hash: OnceLock<u64>,
}

impl<T: Clone + Eq + Hash> FrozenSetList<T> {
	pub fn as_setlist(&self) -> &SetList<T> {
		&self.inner
	}

	fn content_hash(&self) -> u64 {
		hash_one(self.inner.as_slice())
	}
}

impl<T> Deref for FrozenSetList<T> {
	type Target = SetList<T>;

	fn deref(&self) -> &SetList<T> {
		&self.inner
	}
}

impl<T: Clone + Eq + Hash> From<SetList<T>> for FrozenSetList<T> {
	fn from(inner: SetList<T>) -> Self {
		FrozenSetList {
			inner,
			cached_hash: OnceLock::new(),
		}
	}
}

impl<T: Clone + Eq + Hash> FromIterator<T> for FrozenSetList<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		SetList::from_iter(iter).into()
	}
}

impl<T: Eq + Hash> PartialEq for FrozenSetList<T> {
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T: Eq + Hash> Eq for FrozenSetList<T> {}

impl<T: Clone + Eq + Hash> Hash for FrozenSetList<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		let hash = self.cached_hash.get_or_init(|| self.content_hash());
		state.write_u64(*hash);
	}
}

impl<T: fmt::Debug> fmt::Debug for FrozenSetList<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Frozen")?;
		fmt::Debug::fmt(&self.inner, f)
	}
}

static_assertions::assert_impl_all!(FrozenSetList<u32>: std::hash::Hash, Send, Sync);
static_assertions::assert_impl_all!(SetList<String>: Send, Sync);
