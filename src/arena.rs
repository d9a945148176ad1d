use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn assert_occupied() -> ! {
    panic!("Attempted to access data of free slot");
}

/// A single entry of the ordered sequence, along with its links.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) prev: Option<Ptr>,
    pub(crate) next: Option<Ptr>,
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Free { next_free: Option<Ptr> },
    Occupied(Node<K, V>),
}

impl<K, V> Slot<K, V> {
    pub(crate) fn node(&self) -> &Node<K, V> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node<K, V> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }
}

/// Slot storage for the nodes of an ordered map.
///
/// Freed slots are chained through `next_free` and handed out again before the
/// backing vector grows, so a [`Ptr`] stays valid until its own node is freed.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<Ptr>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Occupied slots cannot be moved without invalidating the handles held
        // by the index, so only trailing spare capacity is released.
        self.slots.shrink_to_fit();
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Ptr {
        match self.free_head {
            Some(ptr) => {
                let old = core::mem::replace(&mut self.slots[ptr.index()], Slot::Occupied(node));
                self.free_head = match old {
                    Slot::Free { next_free } => next_free,
                    Slot::Occupied(_) => {
                        #[cold]
                        #[inline(never)]
                        fn die() -> ! {
                            panic!("Free list points at an occupied slot");
                        }
                        die()
                    }
                };
                ptr
            }
            None => {
                let ptr = Ptr::from_index(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                ptr
            }
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        matches!(self.slots.get(ptr.index()), Some(Slot::Occupied(_)))
    }

    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<K, V> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        let old = core::mem::replace(
            &mut self.slots[ptr.index()],
            Slot::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(ptr);

        match old {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => assert_occupied(),
        }
    }

    /// Raw access to the slot buffer for iterators that hand out disjoint
    /// mutable borrows.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Slot<K, V> {
        self.slots.as_mut_ptr()
    }

    #[cfg(test)]
    pub(crate) fn len_slots(&self) -> usize {
        self.slots.len()
    }
}

impl<K, V> Index<Ptr> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, index: Ptr) -> &Self::Output {
        self.slots[index.index()].node()
    }
}

impl<K, V> IndexMut<Ptr> for Arena<K, V> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        self.slots[index.index()].node_mut()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn node<K, V>(key: K, value: V, hash: u64) -> Node<K, V> {
        Node {
            key,
            value,
            hash,
            prev: None,
            next: None,
        }
    }

    #[test]
    fn test_arena_new() {
        let arena: Arena<i32, Vec<i32>> = Arena::with_capacity(0);
        assert_eq!(arena.len_slots(), 0);
        assert!(arena.free_head.is_none());
    }

    #[test]
    fn test_arena_with_capacity() {
        let arena: Arena<i32, Vec<i32>> = Arena::with_capacity(10);
        assert!(arena.slots.capacity() >= 10);
    }

    #[test]
    fn test_arena_alloc_single() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(42, vec![1, 2, 3], 12345));

        assert!(arena.is_occupied(ptr));
        assert_eq!(arena.len_slots(), 1);

        let data = &arena[ptr];
        assert_eq!(data.key, 42);
        assert_eq!(data.value, [1, 2, 3]);
        assert_eq!(data.hash, 12345);
    }

    #[test]
    fn test_arena_free_and_reuse() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, "one".to_string(), 111));
        let ptr2 = arena.alloc(node(2, "two".to_string(), 222));

        let freed = arena.free(ptr1);
        assert_eq!(freed.key, 1);
        assert_eq!(freed.value, "one");
        assert!(!arena.is_occupied(ptr1));
        assert!(arena.is_occupied(ptr2));

        let ptr3 = arena.alloc(node(3, "three".to_string(), 333));
        assert_eq!(ptr3, ptr1);
        assert_eq!(arena[ptr3].key, 3);
        assert_eq!(arena.len_slots(), 2);
    }

    #[test]
    fn test_arena_free_list_is_lifo() {
        let mut arena = Arena::with_capacity(0);
        let ptrs: Vec<_> = (0..4).map(|i| arena.alloc(node(i, i, 0))).collect();

        arena.free(ptrs[1]);
        arena.free(ptrs[3]);

        assert_eq!(arena.alloc(node(10, 10, 0)), ptrs[3]);
        assert_eq!(arena.alloc(node(11, 11, 0)), ptrs[1]);
        assert_eq!(arena.alloc(node(12, 12, 0)), Ptr::from_index(4));
    }

    #[test]
    fn test_arena_index_mut_links() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, String::from("a"), 0));
        let ptr2 = arena.alloc(node(2, String::from("b"), 0));

        arena[ptr1].next = Some(ptr2);
        arena[ptr2].prev = Some(ptr1);
        arena[ptr2].value.push('!');

        assert_eq!(arena[ptr1].next, Some(ptr2));
        assert_eq!(arena[ptr2].prev, Some(ptr1));
        assert_eq!(arena[ptr2].value, "b!");
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 0));
        arena.alloc(node(2, 2, 0));
        arena.free(ptr);

        arena.clear();

        assert_eq!(arena.len_slots(), 0);
        assert!(arena.free_head.is_none());
    }

    #[test]
    fn test_arena_clone_with_free_slots() {
        let mut arena = Arena::with_capacity(0);
        let ptr1 = arena.alloc(node(1, "one".to_string(), 111));
        let ptr2 = arena.alloc(node(2, "two".to_string(), 222));
        let ptr3 = arena.alloc(node(3, "three".to_string(), 333));

        arena.free(ptr2);

        let cloned = arena.clone();

        assert!(cloned.is_occupied(ptr1));
        assert!(!cloned.is_occupied(ptr2));
        assert!(cloned.is_occupied(ptr3));
        assert_eq!(cloned.free_head, arena.free_head);
    }

    #[test]
    fn test_arena_is_occupied_out_of_bounds() {
        let arena: Arena<i32, i32> = Arena::with_capacity(0);
        assert!(!arena.is_occupied(Ptr::from_index(7)));
    }

    #[test]
    #[should_panic(expected = "free slot")]
    fn test_arena_index_free_slot() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 0));
        arena.free(ptr);
        let _ = &arena[ptr];
    }

    #[test]
    #[should_panic(expected = "must be occupied")]
    fn test_arena_double_free() {
        let mut arena = Arena::with_capacity(0);
        let ptr = arena.alloc(node(1, 1, 0));
        arena.free(ptr);
        arena.free(ptr);
    }
}
