use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::Ptr;
use crate::ordered_map::OrderedMap;

impl<K, V, S> OrderedMap<K, V, S> {
    /// Sorts the entries in place with a comparator over whole entries.
    ///
    /// The sort is stable: entries that compare equal keep their relative
    /// order. Only the links between entries change, so lookups are unaffected
    /// and no keys or values are moved in memory. Runs in O(n log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("b", 1), ("a", 2), ("c", 1)]);
    /// map.sort_by(|(_, a), (_, b)| b.cmp(a));
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["a", "b", "c"]);
    /// ```
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }

        let mut order: Vec<Ptr> = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(ptr) = cursor {
            order.push(ptr);
            cursor = self.nodes[ptr].next;
        }

        let nodes = &self.nodes;
        order.sort_by(|&a, &b| {
            let (a, b) = (&nodes[a], &nodes[b]);
            cmp((&a.key, &a.value), (&b.key, &b.value))
        });

        self.relink(&order);
    }

    /// Sorts the entries in place, comparing whole entries with `less`.
    ///
    /// `less(a, b)` must return `true` exactly when `a` belongs before `b`, and
    /// must be a strict weak ordering. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    /// map.sort(|(a, _), (b, _)| a < b);
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"bar", &3), (&"baz", &249), (&"foo", &97)]);
    /// ```
    pub fn sort<F>(&mut self, mut less: F)
    where
        F: FnMut((&K, &V), (&K, &V)) -> bool,
    {
        self.sort_by(|a, b| ordering_from_less(less(a, b), || less(b, a)));
    }

    /// Sorts the entries in place by key, using `less` as a strict weak
    /// ordering over keys. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    /// map.sort_keys(|a, b| a < b);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(keys, ["bar", "baz", "foo"]);
    /// assert_eq!(values, [3, 249, 97]);
    /// ```
    pub fn sort_keys<F>(&mut self, mut less: F)
    where
        F: FnMut(&K, &K) -> bool,
    {
        self.sort_by(|(a, _), (b, _)| ordering_from_less(less(a, b), || less(b, a)));
    }

    /// Sorts the entries in place by value, using `less` as a strict weak
    /// ordering over values. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```
    /// use orderly_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)]);
    /// map.sort_values(|a, b| a < b);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(keys, ["bar", "foo", "baz"]);
    /// assert_eq!(values, [3, 97, 249]);
    /// ```
    pub fn sort_values<F>(&mut self, mut less: F)
    where
        F: FnMut(&V, &V) -> bool,
    {
        self.sort_by(|(_, a), (_, b)| ordering_from_less(less(a, b), || less(b, a)));
    }

    /// Rewrites the links so the list follows `order`, which must hold every
    /// linked entry exactly once.
    fn relink(&mut self, order: &[Ptr]) {
        debug_assert_eq!(order.len(), self.len());

        let mut prev: Option<Ptr> = None;
        for &ptr in order {
            self.nodes[ptr].prev = prev;
            if let Some(prev) = prev {
                self.nodes[prev].next = Some(ptr);
            }
            prev = Some(ptr);
        }
        if let Some(last) = prev {
            self.nodes[last].next = None;
        }

        self.head = order.first().copied();
        self.tail = prev;
    }
}

fn ordering_from_less(is_less: bool, is_greater: impl FnOnce() -> bool) -> Ordering {
    if is_less {
        Ordering::Less
    } else if is_greater() {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::OrderedMap;

    fn seeded() -> OrderedMap<&'static str, i32> {
        OrderedMap::from([("foo", 97), ("bar", 3), ("baz", 249)])
    }

    fn entries<K: Copy, V: Copy>(map: &OrderedMap<K, V>) -> Vec<(K, V)> {
        map.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_sort_keys() {
        let mut map = seeded();
        map.sort_keys(|a, b| a < b);
        assert_eq!(entries(&map), [("bar", 3), ("baz", 249), ("foo", 97)]);
    }

    #[test]
    fn test_sort_values() {
        let mut map = seeded();
        map.sort_values(|a, b| a < b);
        assert_eq!(entries(&map), [("bar", 3), ("foo", 97), ("baz", 249)]);
    }

    #[test]
    fn test_sort_whole_pairs() {
        let mut map = seeded();
        map.sort(|(a, _), (b, _)| a < b);
        assert_eq!(entries(&map), [("bar", 3), ("baz", 249), ("foo", 97)]);

        map.sort(|(_, a), (_, b)| a > b);
        assert_eq!(entries(&map), [("baz", 249), ("foo", 97), ("bar", 3)]);
    }

    #[test]
    fn test_sort_values_is_stable() {
        let mut map = OrderedMap::from([("a", 2), ("b", 1), ("c", 2), ("d", 1), ("e", 0)]);
        map.sort_values(|a, b| a < b);
        assert_eq!(
            entries(&map),
            [("e", 0), ("b", 1), ("d", 1), ("a", 2), ("c", 2)]
        );
    }

    #[test]
    fn test_sort_keys_is_stable() {
        let mut map = OrderedMap::from([("bb", 1), ("a", 2), ("cc", 3), ("d", 4)]);
        map.sort_keys(|a, b| a.len() < b.len());
        assert_eq!(entries(&map), [("a", 2), ("d", 4), ("bb", 1), ("cc", 3)]);
    }

    #[test]
    fn test_sort_all_equal_keeps_order() {
        let mut map = seeded();
        map.sort(|_, _| false);
        assert_eq!(entries(&map), [("foo", 97), ("bar", 3), ("baz", 249)]);
    }

    #[test]
    fn test_sort_empty_and_single() {
        let mut empty: OrderedMap<i32, i32> = OrderedMap::new();
        empty.sort_keys(|a, b| a < b);
        assert!(empty.is_empty());

        let mut single = OrderedMap::from([(1, 1)]);
        single.sort_values(|a, b| a > b);
        assert_eq!(entries(&single), [(1, 1)]);
        assert_eq!(single.front(), single.back());
    }

    #[test]
    fn test_sort_keeps_lookups_and_links() {
        let mut map: OrderedMap<u32, u32> = (0..50).map(|i| ((i * 37) % 50, i)).collect();
        map.sort_keys(|a, b| a < b);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, (0..50).collect::<Vec<_>>());

        let reversed: Vec<_> = map.keys().rev().copied().collect();
        assert_eq!(reversed, (0..50).rev().collect::<Vec<_>>());

        for i in 0..50 {
            assert_eq!(map.get(&((i * 37) % 50)), Some(&i));
        }

        map.set(100, 100);
        map.delete(&0);
        // 23 * 37 = 851, the entry whose key is 1.
        assert_eq!(map.front(), Some((&1, &23)));
        assert_eq!(map.back(), Some((&100, &100)));
    }
}
