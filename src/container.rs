//! The capability common to every collection in the crate.

use std::hash::Hash;

use crate::bag::{Bag, FrozenBag};
use crate::setlist::{FrozenSetList, SetList};

/// Read access shared by all the element collections: size, membership and
/// iteration over the stored elements.
///
/// For a [`Bag`] the iterator repeats elements by multiplicity and `len`
/// counts them the same way.
pub trait Container {
	type Item;
	type Iter<'a>: Iterator<Item = &'a Self::Item>
	where
		Self: 'a;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn contains(&self, item: &Self::Item) -> bool;

	fn iter(&self) -> Self::Iter<'_>;
}

impl<T: Eq + Hash> Container for Bag<T> {
	type Item = T;
	type Iter<'a> = crate::bag::Iter<'a, T> where Self: 'a;

	fn len(&self) -> usize {
		Bag::len(self)
	}

	fn contains(&self, item: &T) -> bool {
		Bag::contains(self, item)
	}

	fn iter(&self) -> Self::Iter<'_> {
		Bag::iter(self)
	}
}

impl<T: Eq + Hash> Container for FrozenBag<T> {
	type Item = T;
	type Iter<'a> = crate::bag::Iter<'a, T> where Self: 'a;

	fn len(&self) -> usize {
		self.as_bag().len()
	}

	fn contains(&self, item: &T) -> bool {
		self.as_bag().contains(item)
	}

	fn iter(&self) -> Self::Iter<'_> {
		self.as_bag().iter()
	}
}

impl<T: Clone + Eq + Hash> Container for SetList<T> {
	type Item = T;
	type Iter<'a> = std::slice::Iter<'a, T> where Self: 'a;

	fn len(&self) -> usize {
		SetList::len(self)
	}

	fn contains(&self, item: &T) -> bool {
		SetList::contains(self, item)
	}

	fn iter(&self) -> Self::Iter<'_> {
		SetList::iter(self)
	}
}

impl<T: Clone + Eq + Hash> Container for FrozenSetList<T> {
	type Item = T;
	type Iter<'a> = std::slice::Iter<'a, T> where Self: 'a;

	fn len(&self) -> usize {
		self.as_setlist().len()
	}

	fn contains(&self, item: &T) -> bool {
		self.as_setlist().contains(item)
	}

	fn iter(&self) -> Self::Iter<'_> {
		self.as_setlist().iter()
	}
}
