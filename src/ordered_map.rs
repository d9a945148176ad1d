//! Ordered map implementation.
//!
//! This module provides the core [`OrderedMap`] type and related
//! functionality. The map keeps its entries in a deterministic order while
//! providing O(1) lookup, insertion, and removal. The order starts out as
//! insertion order and changes only through the explicit move and sort
//! operations.
//!
//! # Examples
//!
//! ```
//! use orderly_map::ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("first", 1);
//! map.set("second", 2);
//!
//! // Iteration preserves insertion order
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"first", &1), (&"second", &2)]);
//! ```

mod entry;
mod iter;
mod sort;

use core::borrow::Borrow;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;
use core::ops::IndexMut;

pub use entry::Entry;
pub use entry::OccupiedEntry;
pub use entry::VacantEntry;
use hashbrown::HashTable;
pub use iter::IntoIter;
pub use iter::IntoKeys;
pub use iter::IntoValues;
pub use iter::Iter;
pub use iter::IterMut;
pub use iter::Keys;
pub use iter::Values;
pub use iter::ValuesMut;

use crate::MapOption;
use crate::Ptr;
use crate::RandomState;
use crate::UnorderedMap;
use crate::arena::Arena;
use crate::arena::Node;

#[cold]
#[inline(never)]
fn missing_from_table(ptr: Ptr) -> ! {
    panic!("{ptr:?} not found in table");
}

/// A hash map that keeps its entries in a deterministic order.
///
/// Entries live in an arena and are threaded together by a doubly-linked
/// list, which defines iteration order. A hash table maps each key to its
/// arena slot. New keys are linked at the back; updating an existing key
/// replaces its value without moving it.
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq` for most operations
/// - `V`: Value type
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// # Examples
///
/// ```
/// use orderly_map::ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("apple", 5);
/// map.set("banana", 3);
/// map.set("cherry", 8);
///
/// // Iterate in insertion order
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// // Prints: apple: 5, banana: 3, cherry: 8
/// ```
pub struct OrderedMap<K, V, S = RandomState> {
    head: Option<Ptr>,
    tail: Option<Ptr>,
    nodes: Arena<K, V>,
    table: HashTable<Ptr>,
    hasher: S,
}

impl<K, V, S> Clone for OrderedMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        let mut new_map = OrderedMap::with_capacity_and_hasher(self.len(), self.hasher.clone());
        let mut cursor = self.head;
        while let Some(ptr) = cursor {
            let node = &self.nodes[ptr];
            // Keys are already unique, so the cached hash can be reused as is.
            new_map.push_new(node.hash, node.key.clone(), node.value.clone(), false);
            cursor = node.next;
        }
        new_map
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        OrderedMap::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new, empty ordered map.
    ///
    /// The map is initially created with a capacity of 0, so it will not
    /// allocate until the first element is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.set("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new ordered map sized to hold `capacity` entries without
    /// reallocating.
    ///
    /// The capacity is a performance hint only and has no effect on behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::with_capacity(10);
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map which will use the given hasher to hash keys.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates a new ordered map with the specified capacity and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use orderly_map::ordered_map::OrderedMap;
    ///
    /// let hasher = RandomState::default();
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_capacity_and_hasher(10, hasher);
    /// map.set("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            head: None,
            tail: None,
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.set(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all key-value pairs.
    ///
    /// Keeps the allocated memory for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut a = OrderedMap::new();
    /// a.set(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator over the key-value pairs of the map, front to
    /// back.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let entries: Vec<_> = map.iter().rev().collect();
    /// assert_eq!(entries, [(&"b", &2), (&"a", &1)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Returns an iterator over the entries of the map with mutable
    /// references to the values, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// for (key, value) in map.iter_mut() {
    ///     if key == &"b" {
    ///         *value *= 10;
    ///     }
    /// }
    ///
    /// assert_eq!(map.get("b"), Some(&20));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            front: self.head,
            back: self.tail,
            remaining: self.len(),
            slots: self.nodes.as_mut_ptr(),
            _nodes: core::marker::PhantomData,
        }
    }

    /// Returns an iterator over the keys of the map, front to back.
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
    /// let keys: Vec<_> = map.keys().collect();
    /// assert_eq!(keys, [&"foo", &"bar", &"baz"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over the values of the map, front to back.
    ///
    /// The values are positionally aligned with [`keys`](Self::keys).
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
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(values, [97, 3, 249]);
    /// ```
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// Returns an iterator over mutable references to the values of the map,
    /// front to back.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Consumes the map, returning its keys front to back.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            iter: self.into_iter(),
        }
    }

    /// Consumes the map, returning its values front to back.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            iter: self.into_iter(),
        }
    }

    /// Calls `visitor` with every entry of the map, front to back.
    ///
    /// If the visitor returns an error, iteration stops immediately and that
    /// error is returned as is. Whatever the visitor did for the entries
    /// before the failing one is not undone.
    ///
    /// The map is borrowed for the whole traversal, so it cannot be modified
    /// from inside the visitor.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    ///
    /// let mut seen = Vec::new();
    /// let result = map.each(|key, value| {
    ///     if *value > 100 {
    ///         return Err(*key);
    ///     }
    ///     seen.push(*key);
    ///     Ok(())
    /// });
    ///
    /// assert_eq!(result, Err("baz"));
    /// assert_eq!(seen, ["foo", "bar"]);
    /// ```
    pub fn each<E, F>(&self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&K, &V) -> Result<(), E>,
    {
        for (key, value) in self.iter() {
            visitor(key, value)?;
        }
        Ok(())
    }

    /// Returns the first entry of the map, if any.
    pub fn front(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.head?];
        Some((&node.key, &node.value))
    }

    /// Returns the last entry of the map, if any.
    pub fn back(&self) -> Option<(&K, &V)> {
        let node = &self.nodes[self.tail?];
        Some((&node.key, &node.value))
    }

    /// Returns the entry at position `index`, counting from the front.
    ///
    /// Returns `None` when `index >= self.len()`. Entries are not stored
    /// contiguously, so this walks the list from whichever end is closer and
    /// takes O(min(index, len - index)) steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    ///
    /// assert_eq!(map.get_index(1), Some((&"bar", &3)));
    /// assert_eq!(map.get_index(3), None);
    /// ```
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        let node = &self.nodes[self.ptr_at(index)?];
        Some((&node.key, &node.value))
    }

    /// Returns the entry at position `index` with a mutable reference to its
    /// value. See [`get_index`](Self::get_index).
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        let ptr = self.ptr_at(index)?;
        let node = &mut self.nodes[ptr];
        Some((&node.key, &mut node.value))
    }

    fn ptr_at(&self, index: usize) -> Option<Ptr> {
        let len = self.len();
        if index >= len {
            return None;
        }

        if index <= len / 2 {
            let mut ptr = self.head?;
            for _ in 0..index {
                ptr = self.nodes[ptr].next?;
            }
            Some(ptr)
        } else {
            let mut ptr = self.tail?;
            for _ in 0..(len - 1 - index) {
                ptr = self.nodes[ptr].prev?;
            }
            Some(ptr)
        }
    }

    fn unlink(&mut self, ptr: Ptr) {
        let node = &mut self.nodes[ptr];
        let prev = node.prev.take();
        let next = node.next.take();

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    fn link_back(&mut self, ptr: Ptr) {
        let old_tail = self.tail;
        let node = &mut self.nodes[ptr];
        node.prev = old_tail;
        node.next = None;

        match old_tail {
            Some(tail) => self.nodes[tail].next = Some(ptr),
            None => self.head = Some(ptr),
        }
        self.tail = Some(ptr);
    }

    fn link_front(&mut self, ptr: Ptr) {
        let old_head = self.head;
        let node = &mut self.nodes[ptr];
        node.prev = None;
        node.next = old_head;

        match old_head {
            Some(head) => self.nodes[head].prev = Some(ptr),
            None => self.tail = Some(ptr),
        }
        self.head = Some(ptr);
    }

    fn move_ptr_to_back(&mut self, ptr: Ptr) {
        if self.tail != Some(ptr) {
            self.unlink(ptr);
            self.link_back(ptr);
        }
    }

    fn move_ptr_to_front(&mut self, ptr: Ptr) {
        if self.head != Some(ptr) {
            self.unlink(ptr);
            self.link_front(ptr);
        }
    }

    /// Allocates a node for a key known to be absent, indexes it, and links it
    /// at one end of the list.
    fn push_new(&mut self, hash: u64, key: K, value: V, at_front: bool) -> Ptr {
        let ptr = self.nodes.alloc(Node {
            key,
            value,
            hash,
            prev: None,
            next: None,
        });
        let nodes = &self.nodes;
        self.table.insert_unique(hash, ptr, |ptr| nodes[*ptr].hash);

        if at_front {
            self.link_front(ptr);
        } else {
            self.link_back(ptr);
        }
        ptr
    }

    fn remove_ptr(&mut self, ptr: Ptr) -> (K, V) {
        let hash = self.nodes[ptr].hash;
        match self.table.find_entry(hash, |candidate| *candidate == ptr) {
            Ok(occupied) => {
                occupied.remove();
            }
            Err(_) => missing_from_table(ptr),
        }

        self.unlink(ptr);
        let node = self.nodes.free(ptr);
        (node.key, node.value)
    }

    /// Removes and returns the first entry of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.pop_front(), Some(("a", 1)));
    /// assert_eq!(map.pop_front(), Some(("b", 2)));
    /// assert_eq!(map.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let ptr = self.head?;
        Some(self.remove_ptr(ptr))
    }

    /// Removes and returns the last entry of the map.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let ptr = self.tail?;
        Some(self.remove_ptr(ptr))
    }

    /// Retains only the entries specified by the predicate.
    ///
    /// Removes all entries for which `f(&key, &mut value)` returns `false`.
    /// Entries are visited front to back, and the predicate may modify the
    /// values it keeps.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    ///
    /// // Keep only entries with even values, and double them
    /// map.retain(|_key, value| {
    ///     *value *= 2;
    ///     *value % 4 == 0
    /// });
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"b", &4), (&"d", &8)]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.head;
        while let Some(ptr) = cursor {
            let node = &mut self.nodes[ptr];
            cursor = node.next;
            if !f(&node.key, &mut node.value) {
                self.remove_ptr(ptr);
            }
        }
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map sized for `size_hint` entries and applies `options` in
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    /// use orderly_map::with_initial_data;
    ///
    /// let map = OrderedMap::with_options(
    ///     4,
    ///     [with_initial_data([("foo", 97), ("bar", 3), ("foo", 1)])],
    /// );
    ///
    /// // The repeated "foo" updates the value but keeps its first position.
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"foo", &1), (&"bar", &3)]);
    /// ```
    pub fn with_options<I>(size_hint: usize, options: I) -> Self
    where
        I: IntoIterator<Item = MapOption<K, V>>,
        S: Default,
    {
        let mut map = Self::with_capacity_and_hasher(size_hint, S::default());
        for option in options {
            match option {
                MapOption::InitialData(pairs) => map.extend(pairs),
            }
        }
        map
    }

    /// Builds an ordered map from the contents of an unordered one.
    ///
    /// The source map has no defined iteration order, so **the order of the
    /// resulting map is unspecified** and can differ from run to run. Call one
    /// of the sort methods afterwards if a deterministic order is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    /// use orderly_map::UnorderedMap;
    ///
    /// let source = UnorderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    /// let mut map = OrderedMap::from_map(source);
    /// map.sort_keys(|a, b| a < b);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["bar", "baz", "foo"]);
    /// ```
    pub fn from_map<H>(source: UnorderedMap<K, V, H>) -> Self
    where
        S: Default,
    {
        let mut map = Self::with_capacity_and_hasher(source.len(), S::default());
        map.extend(source);
        map
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        let nodes = &self.nodes;
        self.table.reserve(additional, |ptr| nodes[*ptr].hash);
        self.nodes.reserve(additional);
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        let nodes = &self.nodes;
        self.table.shrink_to_fit(|ptr| nodes[*ptr].hash);
        self.nodes.shrink_to_fit();
    }

    fn find<Q>(&self, key: &Q) -> Option<Ptr>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |ptr| <K as Borrow<Q>>::borrow(&self.nodes[*ptr].key) == key)
            .copied()
    }

    /// Gets the given key's entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut counts = OrderedMap::new();
    /// for word in ["b", "a", "b", "c", "b"] {
    ///     *counts.entry(word).or_insert(0) += 1;
    /// }
    ///
    /// let entries: Vec<_> = counts.iter().collect();
    /// assert_eq!(entries, [(&"b", &3), (&"a", &1), (&"c", &1)]);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S> {
        let hash = self.hasher.hash_one(&key);
        match self.table.find(hash, |ptr| self.nodes[*ptr].key == key).copied() {
            Some(ptr) => Entry::Occupied(OccupiedEntry { map: self, ptr }),
            None => Entry::Vacant(VacantEntry {
                map: self,
                key,
                hash,
            }),
        }
    }

    /// Inserts or updates a key-value pair, returning `true` if the key was
    /// not present before.
    ///
    /// A new key is linked at the back. An existing key keeps its position and
    /// only has its value replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.set("a", 1));
    /// assert!(map.set("b", 2));
    /// assert!(!map.set("a", 3));
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"a", &3), (&"b", &2)]);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> bool {
        match self.entry(key) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(value);
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                true
            }
        }
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and the
    /// entry is linked at the back.
    ///
    /// If the map did have this key present, the value is updated and the old
    /// value is returned. The entry is **not** moved.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut occupied) => Some(occupied.insert(value)),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                None
            }
        }
    }

    /// Inserts a key-value pair and moves it to the back, whether or not the
    /// key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert_eq!(map.insert_back("a", 10), Some(1));
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"b", &2), (&"a", &10)]);
    /// ```
    pub fn insert_back(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut occupied) => {
                let old = occupied.insert(value);
                occupied.move_to_back();
                Some(old)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                None
            }
        }
    }

    /// Inserts a key-value pair and moves it to the front, whether or not the
    /// key was already present.
    pub fn insert_front(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut occupied) => {
                let old = occupied.insert(value);
                occupied.move_to_front();
                Some(old)
            }
            Entry::Vacant(vacant) => {
                vacant.insert_front(value);
                None
            }
        }
    }

    /// Returns a reference to the value for `key`, or `None` if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set(String::from("a"), 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let ptr = self.find(key)?;
        Some(&self.nodes[ptr].value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let ptr = self.find(key)?;
        Some(&mut self.nodes[ptr].value)
    }

    /// Returns the stored key and its value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = &self.nodes[self.find(key)?];
        Some((&node.key, &node.value))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes `key` from the map, returning whether it was present.
    ///
    /// Deleting an absent key leaves the map unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// assert!(map.delete("a"));
    /// assert!(!map.delete("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value if it
    /// was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let ptr = self.find(key)?;
        Some(self.remove_ptr(ptr))
    }

    /// Moves the entry for `key` to the front. Returns `false` if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// assert!(map.move_to_front("c"));
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["c", "a", "b"]);
    /// ```
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find(key) {
            Some(ptr) => {
                self.move_ptr_to_front(ptr);
                true
            }
            None => false,
        }
    }

    /// Moves the entry for `key` to the back. Returns `false` if the key is
    /// absent.
    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.find(key) {
            Some(ptr) => {
                self.move_ptr_to_back(ptr);
                true
            }
            None => false,
        }
    }

    /// Copies the contents into a plain unordered map.
    ///
    /// The result is independent of `self` and carries no order.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("foo", 97), ("bar", 3)]);
    /// let plain = map.to_map();
    /// assert_eq!(plain.len(), 2);
    /// assert_eq!(plain["bar"], 3);
    /// ```
    pub fn to_map(&self) -> UnorderedMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = UnorderedMap::with_capacity_and_hasher(self.len(), RandomState::default());
        out.extend(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        out
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    /// Two maps are equal when they hold equal entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S, const N: usize> From<[(K, V); N]> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.clone(), value.clone());
        }
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len(),
            front: self.head,
            back: self.tail,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type IntoIter = IterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, Q, V, S> Index<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, Q, V, S> IndexMut<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("no entry found for key")
    }
}
