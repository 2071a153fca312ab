#![allow(clippy::len_without_is_empty)]

//! Leaf data structures shared by the block-join engine.

mod bitset;

pub use bitset::*;

/// Has length trait
pub trait HasLen {
    /// Return length
    fn len(&self) -> usize;

    /// Returns true iff empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}
