//! Picking a collection type by its properties.

use std::collections::HashSet;
use std::hash::Hash;

use crate::bag::{Bag, FrozenBag};
use crate::hash::DefaultHashBuilder;
use crate::setlist::{FrozenSetList, SetList};

/// A collection chosen at runtime by [`collection`].
///
/// Immutable variants are distinct from their mutable counterparts even
/// when the backing type is shared, so a caller can still tell which
/// properties it asked for.
#[derive(Clone)]
pub enum AnyCollection<T> {
	List(Vec<T>),
	Tuple(Box<[T]>),
	Set(HashSet<T, DefaultHashBuilder>),
	FrozenSet(HashSet<T, DefaultHashBuilder>),
	Bag(Bag<T>),
	FrozenBag(FrozenBag<T>),
	SetList(SetList<T>),
	FrozenSetList(FrozenSetList<T>),
}

impl<T: Clone + Eq + Hash> AnyCollection<T> {
	pub fn len(&self) -> usize {
		match self {
			AnyCollection::List(items) => items.len(),
			AnyCollection::Tuple(items) => items.len(),
			AnyCollection::Set(items) | AnyCollection::FrozenSet(items) => items.len(),
			AnyCollection::Bag(items) => items.len(),
			AnyCollection::FrozenBag(items) => items.len(),
			AnyCollection::SetList(items) => items.len(),
			AnyCollection::FrozenSetList(items) => items.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn contains(&self, elem: &T) -> bool {
		match self {
			AnyCollection::List(items) => items.contains(elem),
			AnyCollection::Tuple(items) => items.contains(elem),
			AnyCollection::Set(items) | AnyCollection::FrozenSet(items) => items.contains(elem),
			AnyCollection::Bag(items) => items.contains(elem),
			AnyCollection::FrozenBag(items) => items.contains(elem),
			AnyCollection::SetList(items) => items.contains(elem),
			AnyCollection::FrozenSetList(items) => items.contains(elem),
		}
	}

	pub fn is_mutable(&self) -> bool {
		matches!(
			self,
			AnyCollection::List(_)
				| AnyCollection::Set(_)
				| AnyCollection::Bag(_)
				| AnyCollection::SetList(_)
		)
	}

	pub fn is_ordered(&self) -> bool {
		matches!(
			self,
			AnyCollection::List(_)
				| AnyCollection::Tuple(_)
				| AnyCollection::SetList(_)
				| AnyCollection::FrozenSetList(_)
		)
	}

	pub fn is_unique(&self) -> bool {
		matches!(
			self,
			AnyCollection::Set(_)
				| AnyCollection::FrozenSet(_)
				| AnyCollection::SetList(_)
				| AnyCollection::FrozenSetList(_)
		)
	}
}

impl<T: std::fmt::Debug + Eq + Hash> std::fmt::Debug for AnyCollection<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AnyCollection::List(items) => f.debug_tuple("List").field(items).finish(),
			AnyCollection::Tuple(items) => f.debug_tuple("Tuple").field(items).finish(),
			AnyCollection::Set(items) => f.debug_tuple("Set").field(items).finish(),
			AnyCollection::FrozenSet(items) => f.debug_tuple("FrozenSet").field(items).finish(),
			AnyCollection::Bag(items) => f.debug_tuple("Bag").field(items).finish(),
			AnyCollection::FrozenBag(items) => f.debug_tuple("FrozenBag").field(items).finish(),
			AnyCollection::SetList(items) => f.debug_tuple("SetList").field(items).finish(),
			AnyCollection::FrozenSetList(items) => {
				f.debug_tuple("FrozenSetList").field(items).finish()
			}
		}
	}
}

/// Build the collection matching the requested properties, filled from
/// `items`.
///
/// | `ordered` | `unique` | mutable / immutable        |
/// |-----------|----------|----------------------------|
/// | yes       | yes      | `SetList` / `FrozenSetList`|
/// | yes       | no       | `List` / `Tuple`           |
/// | no        | yes      | `Set` / `FrozenSet`        |
/// | no        | no       | `Bag` / `FrozenBag`        |
///
/// Unique collections keep the first occurrence of each element.
pub fn collection<T, I>(items: I, mutable: bool, ordered: bool, unique: bool) -> AnyCollection<T>
where
	T: Clone + Eq + Hash,
	I: IntoIterator<Item = T>,
{
	match (mutable, ordered, unique) {
		(true, true, true) => AnyCollection::SetList(items.into_iter().collect()),
		(false, true, true) => AnyCollection::FrozenSetList(items.into_iter().collect()),
		(true, true, false) => AnyCollection::List(items.into_iter().collect()),
		(false, true, false) => AnyCollection::Tuple(items.into_iter().collect()),
		(true, false, true) => AnyCollection::Set(items.into_iter().collect()),
		(false, false, true) => AnyCollection::FrozenSet(items.into_iter().collect()),
		(true, false, false) => AnyCollection::Bag(items.into_iter().collect()),
		(false, false, false) => AnyCollection::FrozenBag(items.into_iter().collect()),
	}
}
