use core::{fmt, mem::MaybeUninit, ptr};

use crate::{
    Capacity, Clear, Len,
    list::{List, OutOfRange},
};

const INITIAL_CAPACITY: usize = 10;

/// Contiguous growable list.
///
/// Elements live in `buf[..len]` in sequence order; slots past `len` are
/// uninitialized. The buffer doubles whenever an insert needs more room.
pub struct ArrayList<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
}
impl<T> ArrayList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: uninit_buf(INITIAL_CAPACITY),
            len: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf[..self.len]
            .iter()
            // SAFETY: every slot in `buf[..len]` is initialized.
            .map(|slot| unsafe { slot.assume_init_ref() })
    }

    fn ensure_room(&mut self, len_after: usize) {
        if len_after <= self.buf.len() {
            return;
        }
        let mut new_cap = self.buf.len().max(INITIAL_CAPACITY);
        while new_cap < len_after {
            new_cap *= 2;
        }
        let mut new_buf = uninit_buf(new_cap);
        // SAFETY: moves the initialized prefix into the new buffer; the
        // old allocation is released without dropping the moved-out
        // values since `MaybeUninit` slots never drop their contents.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr(), self.len);
        }
        self.buf = new_buf;
    }
}

fn uninit_buf<T>(cap: usize) -> Box<[MaybeUninit<T>]> {
    (0..cap).map(|_| MaybeUninit::uninit()).collect()
}

impl<T> List<T> for ArrayList<T> {
    fn push(&mut self, item: T) {
        self.ensure_room(self.len + 1);
        self.buf[self.len] = MaybeUninit::new(item);
        self.len += 1;
    }
    fn insert(&mut self, at: usize, item: T) -> Result<(), OutOfRange> {
        if self.len < at {
            return Err(OutOfRange { at, len: self.len });
        }
        self.ensure_room(self.len + 1);
        // SAFETY: shifts `[at, len)` up one slot, highest first; both
        // ranges are in bounds after `ensure_room` and `copy` handles the
        // overlap. Slot `at` is then overwritten with the new value.
        unsafe {
            let base = self.buf.as_mut_ptr();
            ptr::copy(base.add(at), base.add(at + 1), self.len - at);
        }
        self.buf[at] = MaybeUninit::new(item);
        self.len += 1;
        Ok(())
    }
    fn get(&self, at: usize) -> Option<&T> {
        let slot = self.buf[..self.len].get(at)?;
        // SAFETY: `at < len`, so the slot is initialized.
        Some(unsafe { slot.assume_init_ref() })
    }
    fn get_mut(&mut self, at: usize) -> Option<&mut T> {
        let slot = self.buf[..self.len].get_mut(at)?;
        // SAFETY: `at < len`, so the slot is initialized.
        Some(unsafe { slot.assume_init_mut() })
    }
    fn remove(&mut self, at: usize) -> Option<T> {
        if self.len <= at {
            return None;
        }
        // SAFETY: `at < len`, so the slot holds a value; the shift pulls
        // `[at + 1, len)` down one slot, and the stale top slot falls
        // outside `[0, len)` once `len` drops.
        let item = unsafe {
            let base = self.buf.as_mut_ptr();
            let item = base.add(at).read().assume_init();
            ptr::copy(base.add(at + 1), base.add(at), self.len - at - 1);
            item
        };
        self.len -= 1;
        Some(item)
    }
}
impl<T> Len for ArrayList<T> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<T> Capacity for ArrayList<T> {
    fn capacity(&self) -> usize {
        self.buf.len()
    }
}
impl<T> Clear for ArrayList<T> {
    fn clear(&mut self) {
        let live = self.len;
        self.len = 0;
        for slot in &mut self.buf[..live] {
            // SAFETY: each slot in the former `[0, len)` prefix is
            // initialized and released exactly once.
            unsafe { slot.assume_init_drop() };
        }
    }
}
impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Clone> Clone for ArrayList<T> {
    fn clone(&self) -> Self {
        // Sized to the source length, not the source capacity. `len` is
        // bumped per element so a panicking `clone` drops the partial
        // copy instead of leaking it.
        let mut list = Self {
            buf: uninit_buf(self.len),
            len: 0,
        };
        for item in self.iter() {
            list.buf[list.len] = MaybeUninit::new(item.clone());
            list.len += 1;
        }
        list
    }
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.ensure_room(source.len);
        for item in source.iter() {
            self.buf[self.len] = MaybeUninit::new(item.clone());
            self.len += 1;
        }
    }
}
impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn test_growth_keeps_elements() {
        let mut l = ArrayList::new();
        for i in 0..INITIAL_CAPACITY + 1 {
            l.push(i);
        }
        assert_eq!(l.len(), INITIAL_CAPACITY + 1);
        assert!(INITIAL_CAPACITY < l.capacity());
        for i in 0..l.len() {
            assert_eq!(*l.get(i).unwrap(), i);
        }
    }

    #[test]
    fn test_insert_at_capacity_boundary() {
        let mut l = ArrayList::new();
        l.extend(0..INITIAL_CAPACITY);
        assert_eq!(l.capacity(), INITIAL_CAPACITY);
        l.insert(0, usize::MAX).unwrap();
        assert_eq!(l.len(), INITIAL_CAPACITY + 1);
        assert!(l.len() <= l.capacity());
        assert_eq!(*l.get(0).unwrap(), usize::MAX);
        assert_eq!(
            l.iter().skip(1).copied().collect::<Vec<_>>(),
            (0..INITIAL_CAPACITY).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let l: ArrayList<i32> = [10, 20, 30].into_iter().collect();
        let mut c = l.clone();
        assert_eq!(c.capacity(), l.len());
        c.set(1, 99).unwrap();
        assert_eq!(*c.get(1).unwrap(), 99);
        assert_eq!(*l.get(1).unwrap(), 20);
    }

    #[test]
    fn test_clone_from_rebuilds() {
        let source: ArrayList<i32> = (0..20).collect();
        let mut l: ArrayList<i32> = [7, 7].into_iter().collect();
        l.clone_from(&source);
        assert_eq!(
            l.iter().copied().collect::<Vec<_>>(),
            source.iter().copied().collect::<Vec<_>>()
        );
        l.set(0, -1).unwrap();
        assert_eq!(*source.get(0).unwrap(), 0);
    }

    #[test]
    fn test_clear_retains_capacity() {
        let mut l: ArrayList<i32> = (0..30).collect();
        let cap = l.capacity();
        l.clear();
        assert_eq!(l.len(), 0);
        assert_eq!(l.capacity(), cap);
        assert!(l.get(0).is_none());
        l.push(1);
        assert_eq!(*l.get(0).unwrap(), 1);
    }

    #[test]
    fn test_clone_panic_drops_partial_copy() {
        struct Exploding {
            armed: bool,
            drops: Rc<Cell<usize>>,
        }
        impl Clone for Exploding {
            fn clone(&self) -> Self {
                if self.armed {
                    panic!("armed");
                }
                Self {
                    armed: false,
                    drops: Rc::clone(&self.drops),
                }
            }
        }
        impl Drop for Exploding {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut l = ArrayList::new();
        for _ in 0..3 {
            l.push(Exploding {
                armed: false,
                drops: Rc::clone(&drops),
            });
        }
        l.push(Exploding {
            armed: true,
            drops: Rc::clone(&drops),
        });
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| l.clone()));
        assert!(res.is_err());
        // The three elements cloned before the panic must be released
        // during unwinding.
        assert_eq!(drops.get(), 3);
        drop(l);
        assert_eq!(drops.get(), 7);
    }

    #[test]
    fn test_drop_releases_every_element() {
        let drops = Rc::new(Cell::new(0));
        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let mut l = ArrayList::new();
        for _ in 0..INITIAL_CAPACITY * 2 {
            l.push(Counted(Rc::clone(&drops)));
        }
        assert_eq!(drops.get(), 0);
        drop(l.remove(3).unwrap());
        assert_eq!(drops.get(), 1);
        drop(l);
        assert_eq!(drops.get(), INITIAL_CAPACITY * 2);
    }
}
