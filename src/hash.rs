//! Hasher selection for the hashed storage behind `Bag` and `SetList`.
//!
//! The default is the standard library hasher. The `fxhash` and `ahash`
//! features swap in the corresponding high-speed hashers for every hashed
//! structure in the crate at once.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// Hash a single value with a deterministic (per-process) hasher.
///
/// The frozen collection variants cache a hash of their contents; that hash
/// must not depend on a per-instance random seed, so they go through this
/// helper rather than the configured [`DefaultHashBuilder`].
pub(crate) fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
	let mut hasher = DefaultHasher::new();
	value.hash(&mut hasher);
	hasher.finish()
}
