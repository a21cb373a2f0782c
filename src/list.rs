use alloc::boxed::Box;
use alloc::fmt;
use core::mem;
use core::ptr::{self, NonNull};

extern crate alloc;

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub struct ListEntry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut ListEntry<T>,
    /// Pointer to the next entry in the list.
    next: *mut ListEntry<T>,
}

impl<T> ListEntry<T> {
    /// Creates a new entry with the given value.
    fn new(val: T) -> Self {
        ListEntry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a new sigil (sentinel) entry without initializing the value.
    ///
    /// Sigil entries are used as head and tail markers in the list.
    fn new_sigil() -> Self {
        ListEntry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Safely extracts the value from this entry.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it assumes the value is initialized.
    /// Should only be called on non-sigil nodes.
    pub unsafe fn get_value(&self) -> &T {
        unsafe { self.val.assume_init_ref() }
    }

    /// Safely extracts a mutable reference to the value from this entry.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it assumes the value is initialized.
    /// Should only be called on non-sigil nodes.
    pub unsafe fn get_value_mut(&mut self) -> &mut T {
        unsafe { self.val.assume_init_mut() }
    }

    /// Moves the value out of a detached node and frees the node.
    ///
    /// Every removal path must go through this so the stored value is
    /// dropped (or handed to the caller) instead of leaking inside the
    /// `MaybeUninit` slot when the box is freed.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it assumes the value is initialized.
    /// Should only be called on non-sigil nodes that are no longer linked
    /// into any list.
    pub unsafe fn take_value(self: Box<Self>) -> T {
        unsafe { self.val.assume_init_read() }
    }
}

/// A doubly linked list with a caller-managed capacity.
///
/// The list maintains a capacity specified at creation time and provides
/// O(1) operations for adding, removing, and reordering elements. Sentinel
/// nodes (sigils) at the head and tail simplify the pointer surgery.
///
/// A capacity of zero is legal: `add` always fails on such a list and the
/// owning cache treats insertion as immediately evicting itself.
pub struct List<T> {
    /// Maximum number of items the list can hold.
    cap: usize,
    /// Current number of items in the list.
    len: usize,
    /// Pointer to the head sentinel node.
    head: *mut ListEntry<T>,
    /// Pointer to the tail sentinel node.
    tail: *mut ListEntry<T>,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub fn new(cap: usize) -> List<T> {
        List::construct(cap)
    }

    /// Creates a new list with the given capacity.
    ///
    /// This method sets up the sentinel nodes and links them together.
    fn construct(cap: usize) -> List<T> {
        let head = Box::into_raw(Box::new(ListEntry::new_sigil()));
        let tail = Box::into_raw(Box::new(ListEntry::new_sigil()));

        let list = List {
            cap,
            len: 0,
            head,
            tail,
        };

        unsafe {
            // SAFETY: head and tail are newly allocated and valid pointers
            (*list.head).next = list.tail;
            (*list.tail).prev = list.head;
        }

        list
    }

    /// Returns the maximum number of items the list can hold.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Replaces the capacity.
    ///
    /// The caller is responsible for evicting down to the new capacity
    /// first; the list itself never shrinks its contents.
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at (or beyond) capacity.
    pub fn is_full(&self) -> bool {
        self.len >= self.cap
    }

    /// Returns a reference to the last (least recently added) value.
    ///
    /// Returns `None` if the list is empty.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: tail is a valid sentinel and the list is not empty, so
        // tail.prev is an initialized non-sigil node.
        unsafe {
            let prev = (*self.tail).prev;
            if prev == self.head {
                None
            } else {
                Some((*prev).get_value())
            }
        }
    }

    /// Calls `f` on every value from most to least recently attached.
    ///
    /// The shared receiver makes structural mutation from the visitor
    /// impossible.
    pub fn for_each<F: FnMut(&T)>(&self, mut f: F) {
        let mut cur = unsafe { (*self.head).next };
        while cur != self.tail {
            // SAFETY: every node between the sentinels is initialized and
            // its next pointer stays valid while we hold &self.
            unsafe {
                f((*cur).get_value());
                cur = (*cur).next;
            }
        }
    }

    /// Removes the first (most recently added) item from the list.
    ///
    /// Returns the removed entry if the list is not empty.
    pub fn remove_first(&mut self) -> Option<Box<ListEntry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: Both head and tail are valid pointers initialized in `construct`,
        // and we know the list is not empty, so there's at least one element between them
        let next = unsafe { (*self.head).next };
        if next != self.tail {
            unsafe {
                self._detach(next);
            }
            self.len -= 1;
            // SAFETY: next is a valid pointer as we just detached it
            unsafe { Some(Box::from_raw(next)) }
        } else {
            None
        }
    }

    /// Removes the last (least recently added) item from the list.
    ///
    /// Returns the removed entry if the list is not empty.
    pub fn remove_last(&mut self) -> Option<Box<ListEntry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: Both head and tail are valid pointers initialized in `construct`,
        // and we know the list is not empty, so there's at least one element between them
        let prev = unsafe { (*self.tail).prev };
        if prev != self.head {
            unsafe {
                self._detach(prev);
            }
            self.len -= 1;
            // SAFETY: prev is a valid pointer as we just detached it
            unsafe { Some(Box::from_raw(prev)) }
        } else {
            None
        }
    }

    /// Removes the first item and returns its value.
    pub fn pop_front(&mut self) -> Option<T> {
        // SAFETY: remove_first only returns initialized non-sigil nodes
        self.remove_first().map(|node| unsafe { node.take_value() })
    }

    /// Removes the last item and returns its value.
    pub fn pop_back(&mut self) -> Option<T> {
        // SAFETY: remove_last only returns initialized non-sigil nodes
        self.remove_last().map(|node| unsafe { node.take_value() })
    }

    /// Detaches a node from the list and returns it as a Box.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it takes a raw pointer parameter.
    /// The caller must ensure that `node` is a valid pointer to a node in the list
    /// (not null, not freed, and actually part of this list).
    pub unsafe fn remove(&mut self, node: *mut ListEntry<T>) -> Option<Box<ListEntry<T>>> {
        if self.is_empty() || node.is_null() || node == self.head || node == self.tail {
            return None;
        }

        unsafe {
            // SAFETY: Caller guarantees node is valid and part of this list
            self._detach(node);
            self.len -= 1;

            Some(Box::from_raw(node))
        }
    }

    /// Detaches a node from the list without deallocating it.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` is a valid pointer to a node in the list
    /// (not null, not freed, and actually part of this list).
    unsafe fn _detach(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: The caller guarantees that node is a valid entry in the list,
        // which means its prev and next pointers are also valid entries.
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// Attaches a node after the head sentinel node.
    ///
    /// This effectively makes the node the first item in the list.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` is a valid pointer to a node that is
    /// not already in the list (e.g., newly allocated or previously detached).
    pub unsafe fn attach(&mut self, node: *mut ListEntry<T>) {
        // SAFETY: head is a valid pointer initialized in `construct`,
        // and the caller guarantees that node is a valid entry not already in the list
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }

    /// Attaches a node from another list after the head sentinel node.
    ///
    /// This method should be used when moving a node between different lists.
    /// It increments the length of this list since it's gaining a node.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` is a valid pointer to a node that is
    /// not already in this list.
    pub unsafe fn attach_from_other_list(&mut self, node: *mut ListEntry<T>) {
        unsafe {
            self.attach(node);
        }
        self.len += 1;
    }

    /// Moves a node to the front of the list (after the head sentinel).
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences raw pointers.
    /// The caller must ensure that `node` points to a valid entry in the list.
    pub unsafe fn move_to_front(&mut self, node: *mut ListEntry<T>) {
        if node.is_null() || node == self.head || node == self.tail {
            return;
        }

        unsafe {
            // If the node is already the first item, do nothing
            if (*self.head).next == node {
                return;
            }

            // Detach the node from its current position
            self._detach(node);

            // Reattach at the front
            self.attach(node);
        }
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns a pointer to the newly created entry, or None if the list is full.
    pub fn add(&mut self, v: T) -> Option<*mut ListEntry<T>> {
        if self.len >= self.cap {
            return None;
        }
        Some(self.add_unchecked(v))
    }

    /// Adds a value to the front of the list, bypassing the capacity check.
    ///
    /// The caches built on top of this list enforce their occupancy rules
    /// across several lists at once (SLRU segments, ARC partitions), so a
    /// single list must be allowed past its nominal share as long as the
    /// combined bound holds.
    ///
    /// Returns a pointer to the newly created entry.
    pub fn add_unchecked(&mut self, v: T) -> *mut ListEntry<T> {
        // SAFETY: Box::into_raw creates a valid raw pointer and we're using NonNull
        // to assert its non-nullness
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(ListEntry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Updates the value of the given node.
    ///
    /// Returns a tuple containing:
    /// - The old value (if `capturing` is true)
    /// - A boolean indicating whether the update was successful
    ///
    /// When `capturing` is false the old value is still dropped properly.
    ///
    /// # Safety
    ///
    /// This function is unsafe because it dereferences a raw pointer. The caller must ensure
    /// that the `node` pointer is valid and points to a non-sigil entry within the list.
    pub unsafe fn update(
        &mut self,
        node: *mut ListEntry<T>,
        v: T,
        capturing: bool,
    ) -> (Option<T>, bool) {
        if node.is_null() {
            return (None, false);
        }
        // SAFETY: caller guarantees node points at an initialized entry
        let old_val =
            unsafe { mem::replace(&mut (*node).val, mem::MaybeUninit::new(v)).assume_init() };

        match capturing {
            true => (Some(old_val), true),
            false => (None, true),
        }
    }

    /// Clears the list, removing and dropping all entries.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }
}

impl<T> Drop for List<T> {
    /// Removes and drops all regular entries, then frees the sentinels.
    fn drop(&mut self) {
        self.clear();

        // SAFETY: head and tail are valid pointers initialized in `construct` and never modified
        // except to be replaced with null when freed. We check for null here as an extra precaution.
        unsafe {
            if !self.head.is_null() {
                let _ = Box::from_raw(self.head);
                self.head = ptr::null_mut();
            }
            if !self.tail.is_null() {
                let _ = Box::from_raw(self.tail);
                self.tail = ptr::null_mut();
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("capacity", &self.cap)
            .field("length", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn test_construct_and_cap() {
        let list = List::<u32>::new(3);
        assert_eq!(list.cap(), 3);
        assert_eq!(list.len, 0);
        assert!(!list.head.is_null());
        assert!(!list.tail.is_null());
    }

    #[test]
    fn test_zero_capacity() {
        let mut list = List::<u32>::new(0);
        assert!(list.is_full());
        assert!(list.add(1).is_none());
        assert!(list.pop_back().is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn test_add_items() {
        let mut list = List::<u32>::new(2);
        let node1 = list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        assert_eq!(list.len, 2);
        assert_ne!(node1, node2);
        // Should fail to add when at capacity
        assert!(list.add(30).is_none());
        assert_eq!(list.len, 2);
    }

    #[test]
    fn test_update_item() {
        let mut list = List::<u32>::new(2);
        let node = list.add(10).unwrap();
        let (old_val, success) = unsafe { list.update(node, 99, true) };
        assert_eq!(old_val, Some(10));
        assert!(success);
        let (old_val2, success2) = unsafe { list.update(node, 123, false) };
        assert_eq!(old_val2, None);
        assert!(success2);
    }

    #[test]
    fn test_get_value() {
        let mut list = List::<String>::new(3);
        let node = list.add(String::from("test")).unwrap();

        unsafe {
            let value = (*node).get_value();
            assert_eq!(value, "test");

            let value_mut = (*node).get_value_mut();
            value_mut.push_str("_modified");

            let value_after = (*node).get_value();
            assert_eq!(value_after, "test_modified");
        }
    }

    #[test]
    fn test_pop_front_and_back() {
        let mut list = List::<u32>::new(3);

        // Popping from an empty list
        assert!(list.pop_front().is_none());
        assert!(list.pop_back().is_none());

        let _node1 = list.add(10).unwrap();
        let _node2 = list.add(20).unwrap();
        let _node3 = list.add(30).unwrap();
        assert_eq!(list.len(), 3);

        // Front is the most recently added
        assert_eq!(list.pop_front(), Some(30));
        assert_eq!(list.len(), 2);

        // Back is the least recently added
        assert_eq!(list.pop_back(), Some(10));
        assert_eq!(list.len(), 1);

        assert_eq!(list.pop_front(), Some(20));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_back_peek() {
        let mut list = List::<u32>::new(3);
        assert!(list.back().is_none());

        let _ = list.add(10).unwrap();
        let _ = list.add(20).unwrap();
        assert_eq!(list.back(), Some(&10));

        // Peeking does not remove
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::<u32>::new(3);

        // Add items: front->30->20->10->back
        let node1 = list.add(10).unwrap();
        let _node2 = list.add(20).unwrap();
        let _node3 = list.add(30).unwrap();

        // Move the last item (10) to front: front->10->30->20->back
        unsafe {
            list.move_to_front(node1);
        }

        assert_eq!(list.pop_front(), Some(10));
        assert_eq!(list.pop_front(), Some(30));
        assert_eq!(list.pop_front(), Some(20));
    }

    #[test]
    fn test_for_each_order() {
        let mut list = List::<u32>::new(4);
        for i in 0..4 {
            list.add(i).unwrap();
        }

        let mut seen = Vec::new();
        list.for_each(|v| seen.push(*v));
        // Most recently attached first
        assert_eq!(seen, [3, 2, 1, 0]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::<u32>::new(3);

        let _node1 = list.add(10).unwrap();
        let _node2 = list.add(20).unwrap();
        let _node3 = list.add(30).unwrap();
        assert_eq!(list.len(), 3);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());

        // Should be able to add new items
        let _node4 = list.add(40).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_drops_values() {
        // Reference counting makes a leaked value observable.
        extern crate std;
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut list = List::<Rc<()>>::new(3);
        list.add(Rc::clone(&tracker)).unwrap();
        list.add(Rc::clone(&tracker)).unwrap();
        assert_eq!(Rc::strong_count(&tracker), 3);

        list.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_is_empty_and_is_full() {
        let mut list = List::<u32>::new(2);

        assert!(list.is_empty());
        assert!(!list.is_full());

        let _node1 = list.add(10).unwrap();
        assert!(!list.is_empty());
        assert!(!list.is_full());

        let _node2 = list.add(20).unwrap();
        assert!(!list.is_empty());
        assert!(list.is_full());

        list.pop_front();
        assert!(!list.is_empty());
        assert!(!list.is_full());
    }

    #[test]
    fn test_cross_list_node_transfer() {
        let mut list1 = List::<u32>::new(3);
        let mut list2 = List::<u32>::new(3);

        let node1 = list1.add(10).unwrap();
        let _node2 = list1.add(20).unwrap();
        assert_eq!(list1.len(), 2);
        assert_eq!(list2.len(), 0);

        let removed_node = unsafe { list1.remove(node1) }.unwrap();
        assert_eq!(list1.len(), 1);

        unsafe {
            list2.attach_from_other_list(Box::into_raw(removed_node));
        }
        assert_eq!(list1.len(), 1);
        assert_eq!(list2.len(), 1);

        assert_eq!(list1.pop_front(), Some(20));
        assert_eq!(list2.pop_front(), Some(10));
    }

    #[test]
    fn test_add_unchecked_exceeds_capacity() {
        let mut list = List::<u32>::new(2);

        let _node1 = list.add(10).unwrap();
        let _node2 = list.add(20).unwrap();
        assert!(list.add(30).is_none());

        let node3 = list.add_unchecked(30);
        assert_eq!(list.len(), 3);
        assert!(list.len() > list.cap());

        unsafe {
            assert_eq!(*(*node3).get_value(), 30);
        }

        assert_eq!(list.pop_front(), Some(30));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_set_cap() {
        let mut list = List::<u32>::new(2);
        let _ = list.add(10).unwrap();
        let _ = list.add(20).unwrap();
        assert!(list.is_full());

        list.set_cap(4);
        assert!(!list.is_full());
        assert!(list.add(30).is_some());

        // Shrinking the cap does not shrink the contents
        list.set_cap(1);
        assert_eq!(list.len(), 3);
        assert!(list.is_full());
    }
}
