#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
mod options;
pub mod ordered_map;
#[cfg(feature = "serde")]
mod serde_impl;

extern crate alloc;

use core::num::NonZeroU32;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// The plain, unordered map type that [`OrderedMap::to_map`] exports to and
/// [`OrderedMap::from_map`] builds from.
///
/// This is [`std::collections::HashMap`] when the `std` feature is enabled and
/// [`hashbrown::HashMap`] otherwise.
#[cfg(feature = "std")]
pub type UnorderedMap<K, V, S = RandomState> = std::collections::HashMap<K, V, S>;
/// The plain, unordered map type that [`OrderedMap::to_map`] exports to and
/// [`OrderedMap::from_map`] builds from.
///
/// This is `std::collections::HashMap` when the `std` feature is enabled and
/// [`hashbrown::HashMap`] otherwise.
#[cfg(not(feature = "std"))]
pub type UnorderedMap<K, V, S = RandomState> = hashbrown::HashMap<K, V, S>;

/// A hash map that keeps its entries in a deterministic order, implemented as
/// a doubly-linked list threaded through an arena and indexed by a hash table.
///
/// Entries iterate in insertion order until reordered by one of the sort or
/// move operations. This is the main type alias using the default hasher. For
/// custom hashers, use [`ordered_map::OrderedMap`] directly.
///
/// # Examples
///
/// ```
/// use orderly_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("foo", 97);
/// map.set("bar", 3);
/// map.set("baz", 249);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["foo", "bar", "baz"]);
///
/// map.sort_keys(|a, b| a < b);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["bar", "baz", "foo"]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;

pub use options::MapOption;
pub use options::with_initial_data;
pub use ordered_map::Entry;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::IterMut;
pub use ordered_map::Keys;
pub use ordered_map::OccupiedEntry;
pub use ordered_map::VacantEntry;
pub use ordered_map::Values;
pub use ordered_map::ValuesMut;

/// Handle naming a slot in the arena backing an [`OrderedMap`].
///
/// Slots are reused once freed, so a `Ptr` is only meaningful while the entry
/// it was issued for is still in the map.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.index())
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("OrderedMap capacity overflow");
}

impl Ptr {
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index)
            .ok()
            .and_then(|index| index.checked_add(1))
            .and_then(NonZeroU32::new)
        {
            Some(raw) => Ptr(raw),
            None => capacity_overflow(),
        }
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}
