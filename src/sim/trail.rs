//! Ball trail history
//!
//! Purely visual: clearing it never changes gameplay.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::TRAIL_LENGTH;

/// Fixed-capacity FIFO of recent ball positions (oldest first)
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_LENGTH)
    }
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a position, dropping the oldest once over capacity
    pub fn push(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }
}
