//! Construction options for [`OrderedMap::with_options`].
//!
//! [`OrderedMap::with_options`]: crate::ordered_map::OrderedMap::with_options

use alloc::vec::Vec;

/// A construction-time setting for an [`OrderedMap`](crate::OrderedMap).
///
/// Options are applied in the order they are passed to
/// [`with_options`](crate::ordered_map::OrderedMap::with_options).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapOption<K, V> {
    /// Seeds the map with these pairs, inserted front to back. A later pair
    /// whose key was already seen overwrites the earlier value but keeps the
    /// earlier position.
    InitialData(Vec<(K, V)>),
}

/// Builds a [`MapOption::InitialData`] from any sequence of pairs.
///
/// # Examples
///
/// ```
/// use orderly_map::OrderedMap;
/// use orderly_map::with_initial_data;
///
/// let map = OrderedMap::with_options(3, [with_initial_data([("foo", 97), ("bar", 3), ("baz", 249)])]);
/// assert_eq!(map.get_index(1), Some((&"bar", &3)));
/// ```
pub fn with_initial_data<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> MapOption<K, V> {
    MapOption::InitialData(pairs.into_iter().collect())
}
