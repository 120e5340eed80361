#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Map keyed by item identity (hash-based with `std`, ordered without).
#[cfg(feature = "std")]
pub(crate) type IdentityMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdentityMap<K, V> = BTreeMap<K, V>;

/// Bound for item identifiers.
///
/// With `std` this is `Hash + Eq + Clone`; without it, `Ord + Clone` so identities can live in a
/// `BTreeMap`.
#[cfg(feature = "std")]
pub trait ItemId: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> ItemId for K {}

#[cfg(not(feature = "std"))]
pub trait ItemId: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> ItemId for K {}
