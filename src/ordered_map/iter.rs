use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::Ptr;
use crate::arena::Arena;
use crate::arena::Node;
use crate::arena::Slot;

/// An iterator over the entries of an `OrderedMap`, front to back.
///
/// This struct is created by the [`iter`] method on [`OrderedMap`]. See its
/// documentation for more.
///
/// [`iter`]: crate::ordered_map::OrderedMap::iter
/// [`OrderedMap`]: crate::ordered_map::OrderedMap
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
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct Iter<'a, K, V> {
    pub(crate) nodes: &'a Arena<K, V>,
    pub(crate) front: Option<Ptr>,
    pub(crate) back: Option<Ptr>,
    pub(crate) remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug> core::fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a Arena<K, V> = self.nodes;
        let node = &nodes[self.front?];
        self.remaining -= 1;
        self.front = node.next;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.remaining -= 1;
        self.back = node.prev;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of an `OrderedMap`, front to back.
///
/// Created by [`OrderedMap::keys`](crate::ordered_map::OrderedMap::keys).
pub struct Keys<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an `OrderedMap`, front to back.
///
/// Created by
/// [`OrderedMap::values`](crate::ordered_map::OrderedMap::values).
pub struct Values<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the entries of an `OrderedMap`, front to back.
///
/// Created by
/// [`OrderedMap::iter_mut`](crate::ordered_map::OrderedMap::iter_mut).
pub struct IterMut<'a, K, V> {
    pub(crate) slots: *mut Slot<K, V>,
    pub(crate) front: Option<Ptr>,
    pub(crate) back: Option<Ptr>,
    pub(crate) remaining: usize,
    pub(crate) _nodes: PhantomData<&'a mut Arena<K, V>>,
}

// SAFETY: IterMut behaves like a `&mut Arena`, handing out `&K` and `&mut V`.
unsafe impl<K: Sync, V: Send> Send for IterMut<'_, K, V> {}
// SAFETY: As above, shared access to the iterator only exposes shared data.
unsafe impl<K: Sync, V: Sync> Sync for IterMut<'_, K, V> {}

impl<K, V> IterMut<'_, K, V> {
    /// # Safety
    ///
    /// `ptr` must name an occupied slot of the arena `slots` was taken from,
    /// and must not have been yielded by this iterator before.
    unsafe fn node<'n>(&self, ptr: Ptr) -> &'n mut Node<K, V> {
        // SAFETY: The arena is mutably borrowed for the life of the iterator, so
        // the buffer cannot move. Each linked slot is yielded at most once since
        // `remaining` stops the walk once front and back meet, so the returned
        // borrow is unique.
        unsafe { (*self.slots.add(ptr.index())).node_mut() }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.front?;
        // SAFETY: `front` is linked in the map and not yet yielded.
        let node: &'a mut Node<K, V> = unsafe { self.node(ptr) };
        self.remaining -= 1;
        self.front = node.next;
        Some((&node.key, &mut node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.back?;
        // SAFETY: `back` is linked in the map and not yet yielded.
        let node: &'a mut Node<K, V> = unsafe { self.node(ptr) };
        self.remaining -= 1;
        self.back = node.prev;
        Some((&node.key, &mut node.value))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// A mutable iterator over the values of an `OrderedMap`, front to back.
///
/// Created by
/// [`OrderedMap::values_mut`](crate::ordered_map::OrderedMap::values_mut).
///
/// # Examples
///
/// ```
/// use orderly_map::OrderedMap;
///
/// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
///
/// for value in map.values_mut() {
///     *value *= 2;
/// }
///
/// let values: Vec<_> = map.values().collect();
/// assert_eq!(values, [&2, &4, &6]);
/// ```
pub struct ValuesMut<'a, K, V> {
    pub(crate) iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the entries of an `OrderedMap`, front to back.
///
/// This struct is created by the [`into_iter`] method on `OrderedMap`
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
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
/// let entries: Vec<_> = map.into_iter().collect();
/// assert_eq!(entries, [("a", 1), ("b", 2)]);
/// ```
pub struct IntoIter<K, V> {
    pub(crate) nodes: Arena<K, V>,
    pub(crate) front: Option<Ptr>,
    pub(crate) back: Option<Ptr>,
    pub(crate) remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.free(self.front?);
        self.remaining -= 1;
        self.front = node.next;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.free(self.back?);
        self.remaining -= 1;
        self.back = node.prev;
        Some((node.key, node.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An owning iterator over the keys of an `OrderedMap`, front to back.
///
/// Created by
/// [`OrderedMap::into_keys`](crate::ordered_map::OrderedMap::into_keys).
pub struct IntoKeys<K, V> {
    pub(crate) iter: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}
impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of an `OrderedMap`, front to back.
///
/// Created by
/// [`OrderedMap::into_values`](crate::ordered_map::OrderedMap::into_values).
pub struct IntoValues<K, V> {
    pub(crate) iter: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}
impl<K, V> FusedIterator for IntoValues<K, V> {}
