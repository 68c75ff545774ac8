// File: src/core/navigator.rs
use rand::Rng;

/// Observable state of a [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Empty,
    Positioned(usize),
}

/// A cyclic cursor over a sequence of `len` items.
///
/// The sequence itself lives elsewhere; the navigator only tracks its length.
/// All transitions are total and are the only way the cursor moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    cursor: Option<usize>,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cursor: if len > 0 { Some(0) } else { None },
        }
    }

    /// Points the navigator at a freshly computed sequence and resets it.
    pub fn rebind(&mut self, len: usize) {
        self.len = len;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor = if self.len > 0 { Some(0) } else { None };
    }

    pub fn jump_to_start(&mut self) {
        self.reset();
    }

    /// Steps forward, wrapping past the end to 0.
    pub fn next(&mut self) {
        if let Some(cursor) = self.cursor {
            self.cursor = Some((cursor + 1) % self.len);
        }
    }

    /// Steps back, wrapping before the start to `len - 1`.
    pub fn prev(&mut self) {
        if let Some(cursor) = self.cursor {
            self.cursor = Some((cursor + self.len - 1) % self.len);
        }
    }

    /// Moves to a uniformly random position. The current one may repeat.
    pub fn jump_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.cursor.is_some() {
            self.cursor = Some(rng.gen_range(0..self.len));
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> NavState {
        match self.cursor {
            Some(cursor) => NavState::Positioned(cursor),
            None => NavState::Empty,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(0)
    }
}
