//! The snake body
//!
//! Segments are stored head-first. A tick pushes the new head and then either
//! keeps the tail (growth) or drops it.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::grid::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A one-segment snake sitting on `start`
    pub fn new(start: Cell) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(start);
        Self { body }
    }

    pub fn head(&self) -> Cell {
        // Never empty: constructed with one segment and drop_tail keeps the head
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segments in head-first order
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn body_excluding_head(&self) -> HashSet<Cell> {
        self.body.iter().skip(1).copied().collect()
    }

    /// Whether any segment other than the head sits on `cell`.
    ///
    /// The tail is included even when it is about to be dropped this tick,
    /// so steering into the vacating tail is a collision.
    pub fn occupies_excluding_head(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    /// Prepend a new head
    pub fn advance(&mut self, new_head: Cell) {
        self.body.push_front(new_head);
    }

    /// Remove the last segment. A lone head is never removed.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}
