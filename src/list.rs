extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// Index of the head sentinel slot.
const HEAD: usize = 0;
/// Index of the tail sentinel slot.
const TAIL: usize = 1;
/// Terminator for the free-slot chain.
const NIL: usize = usize::MAX;

/// Stable reference to a node in a [`List`].
///
/// A handle stays valid until the node is removed. After removal the slot may
/// be reused by a later insert, so callers must drop handles they remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(usize);

/// A node in the doubly linked list.
///
/// `val` is `None` for the two sentinels and for slots on the free chain.
/// Free slots reuse `next` to point at the next free slot.
struct Slot<T> {
    val: Option<T>,
    prev: usize,
    next: usize,
}

impl<T> Slot<T> {
    fn sigil() -> Self {
        Slot {
            val: None,
            prev: NIL,
            next: NIL,
        }
    }
}

/// A doubly linked list stored in a slot arena.
///
/// Nodes are addressed by [`Handle`]s rather than pointers, so the list owns
/// every node outright and there are no reference cycles. Two sentinel slots
/// bracket the live nodes: the node after the head sentinel is the front and
/// the node before the tail sentinel is the back. All operations are O(1)
/// except [`List::clear`], which drops every live value.
///
/// Removed slots are chained into a free list and reused by the next
/// [`List::push_front`], so a list that is filled once and then churned does
/// not allocate again.
pub struct List<T> {
    slots: Vec<Slot<T>>,
    free: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `cap` nodes before reallocating.
    pub fn with_capacity(cap: usize) -> List<T> {
        let mut slots = Vec::with_capacity(cap.saturating_add(2));
        slots.push(Slot::sigil());
        slots.push(Slot::sigil());
        slots[HEAD].next = TAIL;
        slots[TAIL].prev = HEAD;
        List {
            slots,
            free: NIL,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the handle of the front node (the one after the head sentinel).
    pub fn front(&self) -> Option<Handle> {
        let idx = self.slots[HEAD].next;
        (idx != TAIL).then_some(Handle(idx))
    }

    /// Returns the handle of the back node (the one before the tail sentinel).
    pub fn back(&self) -> Option<Handle> {
        let idx = self.slots[TAIL].prev;
        (idx != HEAD).then_some(Handle(idx))
    }

    /// Inserts `val` at the front and returns its handle.
    pub fn push_front(&mut self, val: T) -> Handle {
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.slots[idx].next;
            self.slots[idx].val = Some(val);
            idx
        } else {
            self.slots.push(Slot {
                val: Some(val),
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        };
        self.attach(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Moves the node to the front. A no-op if it is already there.
    pub fn move_to_front(&mut self, node: Handle) {
        if !self.is_live(node) || self.slots[HEAD].next == node.0 {
            return;
        }
        self.detach(node.0);
        self.attach(node.0);
    }

    /// Unlinks the node, frees its slot and returns its value.
    ///
    /// Returns `None` for a sentinel or an already freed slot.
    pub fn remove(&mut self, node: Handle) -> Option<T> {
        if !self.is_live(node) {
            return None;
        }
        self.detach(node.0);
        let slot = &mut self.slots[node.0];
        let val = slot.val.take();
        slot.prev = NIL;
        slot.next = self.free;
        self.free = node.0;
        self.len -= 1;
        val
    }

    /// Removes the back node and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        let node = self.back()?;
        self.remove(node)
    }

    /// Returns the value stored at `node`.
    pub fn get(&self, node: Handle) -> Option<&T> {
        self.slots.get(node.0)?.val.as_ref()
    }

    /// Returns a mutable reference to the value stored at `node`.
    pub fn get_mut(&mut self, node: Handle) -> Option<&mut T> {
        self.slots.get_mut(node.0)?.val.as_mut()
    }

    /// Replaces the value stored at `node` in place, returning the old one.
    ///
    /// The node keeps its position. Returns `None` (and drops `val`) if the
    /// handle does not refer to a live node.
    pub fn replace(&mut self, node: Handle, val: T) -> Option<T> {
        self.get_mut(node).map(|old| mem::replace(old, val))
    }

    /// Drops every node. The arena keeps its allocation.
    pub fn clear(&mut self) {
        self.slots.truncate(2);
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.free = NIL;
        self.len = 0;
    }

    /// Iterates front to back, yielding each node's handle and value.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    /// Walks the links in both directions and panics if they disagree with
    /// each other or with `len`.
    pub fn assert_linked(&self) {
        let mut count = 0;
        let mut prev = HEAD;
        let mut cur = self.slots[HEAD].next;
        while cur != TAIL {
            assert!(
                count < self.len,
                "list corrupted: more linked nodes than len {}",
                self.len
            );
            let slot = &self.slots[cur];
            assert_eq!(slot.prev, prev, "list corrupted: bad back link at slot {cur}");
            assert!(slot.val.is_some(), "list corrupted: empty slot {cur} is linked");
            count += 1;
            prev = cur;
            cur = slot.next;
        }
        assert_eq!(self.slots[TAIL].prev, prev, "list corrupted: bad tail link");
        assert_eq!(count, self.len, "list corrupted: len does not match links");
    }

    fn is_live(&self, node: Handle) -> bool {
        node.0 != HEAD
            && node.0 != TAIL
            && self
                .slots
                .get(node.0)
                .is_some_and(|slot| slot.val.is_some())
    }

    /// Links slot `idx` right after the head sentinel.
    fn attach(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }

    /// Unlinks slot `idx` from its neighbours.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        let slot = &self.list.slots[idx];
        self.front = slot.next;
        self.remaining -= 1;
        slot.val.as_ref().map(|val| (Handle(idx), val))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        let slot = &self.list.slots[idx];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.val.as_ref().map(|val| (Handle(idx), val))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn values<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().map(|(_, v)| v.clone()).collect()
    }

    #[test]
    fn test_construct_empty() {
        let list = List::<u32>::with_capacity(3);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.assert_linked();
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = List::with_capacity(3);
        let node1 = list.push_front(10);
        let node2 = list.push_front(20);
        let node3 = list.push_front(30);
        assert_ne!(node1, node2);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(node3));
        assert_eq!(list.back(), Some(node1));
        assert_eq!(values(&list), vec![30, 20, 10]);
        list.assert_linked();
    }

    #[test]
    fn test_replace_item() {
        let mut list = List::with_capacity(2);
        let node = list.push_front(10);
        assert_eq!(list.replace(node, 99), Some(10));
        assert_eq!(list.get(node), Some(&99));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_get_value_mut() {
        let mut list = List::with_capacity(3);
        let node = list.push_front(String::from("test"));

        list.get_mut(node).unwrap().push_str("_modified");
        assert_eq!(list.get(node).unwrap(), "test_modified");

        *list.get_mut(node).unwrap() = String::from("new_value");
        assert_eq!(list.get(node).unwrap(), "new_value");
    }

    #[test]
    fn test_pop_back() {
        let mut list = List::with_capacity(3);
        assert!(list.pop_back().is_none());

        list.push_front(10);
        list.push_front(20);
        list.push_front(30);

        assert_eq!(list.pop_back(), Some(10));
        assert_eq!(list.pop_back(), Some(20));
        assert_eq!(list.len(), 1);
        assert_eq!(list.pop_back(), Some(30));
        assert!(list.is_empty());
        assert!(list.pop_back().is_none());
        list.assert_linked();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);
        let node1 = list.push_front(10);
        let _node2 = list.push_front(20);
        let node3 = list.push_front(30);

        list.move_to_front(node1);
        assert_eq!(values(&list), vec![10, 30, 20]);

        // Already at the front
        list.move_to_front(node1);
        assert_eq!(values(&list), vec![10, 30, 20]);

        list.move_to_front(node3);
        assert_eq!(values(&list), vec![30, 10, 20]);
        assert_eq!(list.len(), 3);
        list.assert_linked();
    }

    #[test]
    fn test_remove_middle_and_reuse_slot() {
        let mut list = List::with_capacity(3);
        let _node1 = list.push_front(10);
        let node2 = list.push_front(20);
        let _node3 = list.push_front(30);

        assert_eq!(list.remove(node2), Some(20));
        assert_eq!(values(&list), vec![30, 10]);
        // A freed handle is dead until reused
        assert_eq!(list.remove(node2), None);
        assert_eq!(list.get(node2), None);

        let node4 = list.push_front(40);
        assert_eq!(node4, node2, "freed slot should be reused");
        assert_eq!(values(&list), vec![40, 30, 10]);
        list.assert_linked();
    }

    #[test]
    fn test_sentinels_are_untouchable() {
        let mut list = List::with_capacity(2);
        list.push_front(1);
        assert_eq!(list.remove(Handle(HEAD)), None);
        assert_eq!(list.remove(Handle(TAIL)), None);
        list.move_to_front(Handle(TAIL));
        assert_eq!(list.get(Handle(HEAD)), None);
        assert_eq!(list.len(), 1);
        list.assert_linked();
    }

    #[test]
    fn test_clear() {
        let mut list = List::with_capacity(3);
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);

        list.push_front(40);
        assert_eq!(values(&list), vec![40]);
        list.assert_linked();
    }

    #[test]
    fn test_iter_both_directions() {
        let mut list = List::with_capacity(4);
        for v in 1..=4 {
            list.push_front(v);
        }
        let back_to_front: Vec<i32> = list.iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(back_to_front, vec![1, 2, 3, 4]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|(_, v)| *v), Some(4));
        assert_eq!(iter.next_back().map(|(_, v)| *v), Some(1));
        assert_eq!(iter.next().map(|(_, v)| *v), Some(3));
        assert_eq!(iter.next_back().map(|(_, v)| *v), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_length_consistency_after_churn() {
        let mut list = List::with_capacity(4);
        let mut handles = Vec::new();
        for round in 0..50 {
            handles.push(list.push_front(round));
            if round % 3 == 0 {
                let h = handles.remove(0);
                list.remove(h);
            }
            if let Some(h) = handles.get(handles.len() / 2).copied() {
                list.move_to_front(h);
            }
            list.assert_linked();
        }
        assert_eq!(list.len(), handles.len());
    }
}
