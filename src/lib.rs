//! Collections the standard library does not provide: a map from ranges of
//! keys to values, a multiset, and an insertion-ordered set, the latter two
//! with frozen (hashable) variants.
//!
//! ## Range maps
//!
//! A [`RangeMap`] maps half-open `[start, stop)` ranges of keys to values,
//! storing one boundary per transition instead of one entry per key. The
//! key type only needs `Clone + PartialOrd`, so strings, dates, tuples and
//! floats all work:
//!
//! ```
//! use collections_extended::{Edge, RangeMap};
//!
//! let mut version = RangeMap::new();
//! version.set("2020-01-01", "2020-06-01", 1)?;
//! version.set("2020-06-01", Edge::Open, 2)?;
//! assert_eq!(version.get(&"2020-03-15")?, Some(&1));
//! assert_eq!(version.get(&"2021-01-01")?, Some(&2));
//! assert_eq!(version.get(&"2019-12-31")?, None);
//! # Ok::<(), collections_extended::Error>(())
//! ```
//!
//! Either end of an assignment may be [`Edge::Open`], standing for negative
//! or positive infinity. Overwriting a subrange splits the spans around it,
//! and adjacent spans holding equal values merge back together.
//!
//! ## Bags
//!
//! A [`Bag`] is a multiset: membership with multiplicity, set algebra that
//! respects counts, and a cartesian product.
//!
//! ```
//! use collections_extended::Bag;
//!
//! let bag: Bag<char> = "aaabbc".chars().collect();
//! assert_eq!(bag.count(&'a'), 3);
//! assert_eq!(bag.len(), 6);
//! assert_eq!(bag.nlargest(Some(1)), vec![(&'a', 3)]);
//! ```
//!
//! ## Set-lists
//!
//! A [`SetList`] is a sequence of unique elements: slice-like positional
//! access plus O(1) membership and element-to-position lookup.
//!
//! ```
//! use collections_extended::SetList;
//!
//! let sl: SetList<char> = "abracadabra".chars().collect();
//! assert_eq!(sl.as_slice(), &['a', 'b', 'r', 'c', 'd']);
//! assert_eq!(sl.index_of(&'d'), Some(4));
//! ```
//!
//! ## Choosing a collection at runtime
//!
//! The [`collection`] function picks the right type from the three
//! properties mutable, ordered and unique:
//!
//! ```
//! use collections_extended::{collection, AnyCollection};
//!
//! let built = collection([1, 2, 2, 3], true, true, true);
//! assert!(matches!(built, AnyCollection::SetList(_)));
//! assert_eq!(built.len(), 3);
//! ```
//!
//! ## Features
//!
//! The hashed structures default to the standard library hasher. The
//! `fxhash` and `ahash` features swap in the corresponding high-speed
//! hashers crate-wide; see [`DefaultHashBuilder`].

pub mod bag;
pub mod collection;
pub mod container;
mod error;
mod hash;
pub mod key_index;
pub mod range_map;
pub mod setlist;

pub use bag::{Bag, FrozenBag};
pub use collection::{collection, AnyCollection};
pub use container::Container;
pub use error::{Error, Result};
pub use hash::DefaultHashBuilder;
pub use key_index::{Edge, OrderedKeyIndex};
pub use range_map::{MappedRange, RangeMap, Ranges};
pub use setlist::{FrozenSetList, SetList};
