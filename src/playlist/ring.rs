//! Arena-backed circular sequence.
//!
//! Elements live in a `Vec` and are addressed by position. The element after
//! the last one is the first, so neighbours are `(pos ± 1) mod len`. Appending
//! never moves an existing position.

use crate::library::Track;

use super::error::{PlaylistError, Result};

/// Traversal direction around the ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub type TrackRing = Ring<Track>;

#[derive(Debug, Clone)]
pub struct Ring<T> {
    items: Vec<T>,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Ring<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `item` at the tail (just before the head) and return its position.
    ///
    /// The only element of a one-element ring is its own successor and predecessor.
    pub fn append(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn get(&self, pos: usize) -> Option<&T> {
        self.items.get(pos)
    }

    pub fn successor(&self, pos: usize) -> Result<usize> {
        self.step(pos, Direction::Forward)
    }

    pub fn predecessor(&self, pos: usize) -> Result<usize> {
        self.step(pos, Direction::Backward)
    }

    fn step(&self, pos: usize, direction: Direction) -> Result<usize> {
        self.ensure_member(pos)?;
        Ok(wrap(pos, self.items.len(), direction))
    }

    /// Position reached by walking `index` steps forward from the head.
    ///
    /// Any index is valid on a non-empty ring because the walk wraps around;
    /// only an empty ring is out of range.
    pub fn nth(&self, index: usize) -> Result<usize> {
        if self.items.is_empty() {
            return Err(PlaylistError::IndexOutOfRange(index));
        }
        Ok(index % self.items.len())
    }

    /// Endless iterator over `(position, item)` beginning at `start`.
    ///
    /// Every call starts a fresh walk. Bound it with `Iterator::take`.
    pub fn iter_from(&self, start: usize, direction: Direction) -> Result<RingIter<'_, T>> {
        self.ensure_member(start)?;
        Ok(RingIter {
            ring: self,
            next: start,
            direction,
        })
    }

    fn ensure_member(&self, pos: usize) -> Result<()> {
        if self.items.is_empty() {
            return Err(PlaylistError::EmptyCollection);
        }
        if pos >= self.items.len() {
            return Err(PlaylistError::NotFound(pos));
        }
        Ok(())
    }
}

fn wrap(pos: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (pos + 1) % len,
        Direction::Backward => (pos + len - 1) % len,
    }
}

pub struct RingIter<'a, T> {
    ring: &'a Ring<T>,
    next: usize,
    direction: Direction,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next;
        let item = self.ring.items.get(pos)?;
        self.next = wrap(pos, self.ring.items.len(), self.direction);
        Some((pos, item))
    }
}
