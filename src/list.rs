use thiserror::Error;

use crate::{Clear, Len};

/// Position outside the container's valid range at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("position {at} out of range for length {len}")]
pub struct OutOfRange {
    pub at: usize,
    pub len: usize,
}

/// Ordered sequence addressed by zero-based position.
///
/// Implementations are interchangeable: every operation behaves the same
/// for every input regardless of the backing store. Failed operations
/// leave the container untouched.
pub trait List<T>: Len + Clear {
    /// Appends `item` at position `len`.
    fn push(&mut self, item: T);
    /// Inserts `item` before position `at`, shifting later elements back
    /// by one position. `at == len` appends. On error the item is dropped.
    fn insert(&mut self, at: usize, item: T) -> Result<(), OutOfRange>;
    #[must_use]
    fn get(&self, at: usize) -> Option<&T>;
    #[must_use]
    fn get_mut(&mut self, at: usize) -> Option<&mut T>;
    /// Replaces the element at `at`, returning the previous value.
    fn set(&mut self, at: usize, item: T) -> Result<T, OutOfRange> {
        let len = self.len();
        match self.get_mut(at) {
            Some(slot) => Ok(core::mem::replace(slot, item)),
            None => Err(OutOfRange { at, len }),
        }
    }
    /// Removes and returns the element at `at`, shifting later elements
    /// forward by one position.
    fn remove(&mut self, at: usize) -> Option<T>;
}
