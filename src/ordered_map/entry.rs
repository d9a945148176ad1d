use crate::Ptr;
use crate::ordered_map::OrderedMap;

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`OrderedMap`].
///
/// [`entry`]: OrderedMap::entry
///
/// # Examples
///
/// ```
/// use orderly_map::Entry;
/// use orderly_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
///
/// match map.entry("key") {
///     Entry::Vacant(entry) => {
///         entry.insert("value");
///     }
///     Entry::Occupied(entry) => {
///         println!("Key already exists: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, K, V, S> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S>),

    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S>),
}

impl<'a, K, V, S> Entry<'a, K, V, S> {
    /// Ensures a value is in the entry by inserting the provided default if
    /// vacant, and returns a mutable reference to the value in the entry.
    ///
    /// When inserting, the new entry is linked at the back, matching
    /// [`OrderedMap::set`] for new keys.
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Like [`or_insert`](Self::or_insert), but only computes the default
    /// when the entry is vacant.
    #[inline]
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Inserts `V::default()` if the entry is vacant.
    #[inline]
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// If the entry is occupied, applies the provided function to the value in
    /// place. Returns the entry for further chaining.
    #[inline]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(mut e) = self {
            f(e.get_mut());
            Entry::Occupied(e)
        } else {
            self
        }
    }

    /// Returns the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(e) => e.key(),
            Entry::Vacant(v) => v.key(),
        }
    }
}

/// A view into an occupied entry in an `OrderedMap`.
///
/// It is part of the [`Entry`] enum.
///
/// # Examples
///
/// ```
/// use orderly_map::Entry;
/// use orderly_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("key", 1);
///
/// if let Entry::Occupied(mut entry) = map.entry("key") {
///     *entry.get_mut() += 1;
/// }
/// assert_eq!(map.get("key"), Some(&2));
/// ```
pub struct OccupiedEntry<'a, K, V, S> {
    pub(crate) map: &'a mut OrderedMap<K, V, S>,
    pub(crate) ptr: Ptr,
}

impl<'a, K, V, S> OccupiedEntry<'a, K, V, S> {
    /// Gets a reference to the value in the entry.
    #[inline]
    pub fn get(&self) -> &V {
        &self.map.nodes[self.ptr].value
    }

    /// Gets a mutable reference to the value in the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.nodes[self.ptr].value
    }

    /// Converts the entry into a mutable reference to its value, bound to the
    /// lifetime of the map.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { map, ptr } = self;
        &mut map.nodes[ptr].value
    }

    /// Gets a reference to the key in the entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.map.nodes[self.ptr].key
    }

    /// Replaces the value in the entry, returning the old value. The entry
    /// keeps its position.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Moves the entry to the front of the map.
    #[inline]
    pub fn move_to_front(&mut self) {
        self.map.move_ptr_to_front(self.ptr);
    }

    /// Moves the entry to the back of the map.
    #[inline]
    pub fn move_to_back(&mut self) {
        self.map.move_ptr_to_back(self.ptr);
    }

    /// Removes the entry from the map, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.map.remove_ptr(self.ptr)
    }

    /// Removes the entry from the map, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

/// A view into a vacant entry in an `OrderedMap`.
///
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, S> {
    pub(crate) map: &'a mut OrderedMap<K, V, S>,
    pub(crate) key: K,
    pub(crate) hash: u64,
}

impl<'a, K, V, S> VacantEntry<'a, K, V, S> {
    /// Inserts the value at the back of the map and returns a mutable
    /// reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::Entry;
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    ///
    /// if let Entry::Vacant(entry) = map.entry("b") {
    ///     *entry.insert(2) += 1;
    /// }
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"a", &1), (&"b", &3)]);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map, key, hash } = self;
        let ptr = map.push_new(hash, key, value, false);
        &mut map.nodes[ptr].value
    }

    /// Inserts the value at the front of the map and returns a mutable
    /// reference to it.
    pub fn insert_front(self, value: V) -> &'a mut V {
        let VacantEntry { map, key, hash } = self;
        let ptr = map.push_new(hash, key, value, true);
        &mut map.nodes[ptr].value
    }

    /// Takes ownership of the key, leaving the map unchanged.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Gets a reference to the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }
}
