use core::{fmt, ptr::NonNull};

use crate::{
    Clear, Len,
    list::{List, OutOfRange},
};

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// Singly-linked list with O(1) push.
///
/// Each node is owned by its predecessor's `next` link (the list owns the
/// head directly). `tail` aliases the last node of the chain and is kept
/// in lockstep with every mutation; both are `None` iff `len == 0`.
pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
}

// The chain is exclusively owned; `tail` only aliases chain-owned memory
// and is never dereferenced without `&mut self`.
unsafe impl<T: Send> Send for LinkedList<T> {}
unsafe impl<T: Sync> Sync for LinkedList<T> {}

impl<T> LinkedList<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut cur = self.head.as_deref();
        core::iter::from_fn(move || {
            let node = cur?;
            cur = node.next.as_deref();
            Some(&node.value)
        })
    }

    /// Owning slot of the node at `at`: the head for position 0,
    /// otherwise the predecessor's `next` link. `at` must be `< len`.
    fn slot_mut(&mut self, at: usize) -> &mut Option<Box<Node<T>>> {
        let mut slot = &mut self.head;
        for _ in 0..at {
            slot = &mut slot.as_mut().unwrap().next;
        }
        slot
    }

    fn last_node(&mut self) -> Option<NonNull<Node<T>>> {
        let mut cur = self.head.as_deref_mut()?;
        while cur.next.is_some() {
            cur = cur.next.as_deref_mut().unwrap();
        }
        Some(NonNull::from(cur))
    }
}

impl<T> List<T> for LinkedList<T> {
    fn push(&mut self, item: T) {
        let node = Box::new(Node {
            value: item,
            next: None,
        });
        let slot = match self.tail {
            // SAFETY: `tail` points at the last node of the chain this
            // list owns; holding `&mut self` rules out other aliases.
            Some(mut tail) => unsafe { &mut tail.as_mut().next },
            None => &mut self.head,
        };
        *slot = Some(node);
        // The alias must come from the node's final home: the box move
        // above retags it and would invalidate a pointer taken earlier.
        self.tail = Some(NonNull::from(&mut **slot.as_mut().unwrap()));
        self.len += 1;
    }
    fn insert(&mut self, at: usize, item: T) -> Result<(), OutOfRange> {
        if self.len < at {
            return Err(OutOfRange { at, len: self.len });
        }
        if at == self.len {
            // Covers the empty-chain case and keeps `tail` current.
            self.push(item);
            return Ok(());
        }
        let slot = self.slot_mut(at);
        let next = slot.take();
        *slot = Some(Box::new(Node { value: item, next }));
        self.len += 1;
        if at + 2 == self.len {
            // The old tail's box moved into the new node; refresh the
            // alias from its new home.
            self.tail = self.last_node();
        }
        Ok(())
    }
    fn get(&self, at: usize) -> Option<&T> {
        let mut cur = self.head.as_deref();
        for _ in 0..at {
            cur = cur?.next.as_deref();
        }
        Some(&cur?.value)
    }
    fn get_mut(&mut self, at: usize) -> Option<&mut T> {
        let mut cur = self.head.as_deref_mut();
        for _ in 0..at {
            cur = cur?.next.as_deref_mut();
        }
        Some(&mut cur?.value)
    }
    fn remove(&mut self, at: usize) -> Option<T> {
        if self.len <= at {
            return None;
        }
        let slot = self.slot_mut(at);
        let mut node = slot.take().unwrap();
        *slot = node.next.take();
        self.len -= 1;
        if self.len <= at + 1 {
            // The removal released the tail or moved its box into the
            // predecessor's slot; re-derive the alias either way.
            self.tail = self.last_node();
        }
        Some(node.value)
    }
}
impl<T> Len for LinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<T> Clear for LinkedList<T> {
    fn clear(&mut self) {
        // Release one node per step; dropping the head box as-is would
        // recurse once per node and overflow the stack on long chains.
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
        self.tail = None;
        self.len = 0;
    }
}
impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::new();
        list.extend(self.iter().cloned());
        list
    }
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().cloned());
    }
}
impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
