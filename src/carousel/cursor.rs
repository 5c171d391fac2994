// src/carousel/cursor.rs

/// Cursor over a cyclic list of featured items.
///
/// The unbounded index moves freely in both directions; the displayed index
/// is `unbounded mod len`, normalized to be non-negative, so it always lands
/// in `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    unbounded: i64,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { unbounded: 0, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn unbounded(&self) -> i64 {
        self.unbounded
    }

    pub fn displayed(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.unbounded.rem_euclid(self.len as i64) as usize
    }

    pub fn advance(&mut self, delta: i64) {
        self.unbounded += delta;
    }

    /// Jumps to `target` by the shortest rotational path and returns the
    /// applied delta. Ties (exactly half the ring) resolve forward.
    pub fn shortest_jump(&mut self, target: usize) -> i64 {
        if self.len == 0 {
            return 0;
        }
        let len = self.len as i64;
        let forward = (target as i64 - self.displayed() as i64).rem_euclid(len);
        let delta = if forward > len / 2 {
            forward - len
        } else {
            forward
        };
        self.unbounded += delta;
        delta
    }
}
