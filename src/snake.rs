use std::collections::VecDeque;

use crate::error::{GameError, Result};
use crate::grid::{Cell, Grid};

pub const SNAKE_SIZE: u16 = 5;
/// The head is injected at column `SNAKE_SIZE * 2`, so any grid smaller than
/// this cannot hold the starting snake.
pub const INJECT_MARGIN: u16 = SNAKE_SIZE * 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    /// Age tag: the tail holds the smallest index, the head the largest.
    pub index: u64,
}

/// What changed during a successful advance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Advance {
    pub new_head: Cell,
    pub old_head: Cell,
    pub old_tail: Cell,
}

#[derive(Debug, Clone)]
pub struct Snake {
    // Tail at the front, head at the back.
    body: VecDeque<Segment>,
}

impl Snake {
    /// Lays the starting snake along row `size - SNAKE_SIZE`, head at column
    /// `SNAKE_SIZE * 2` and the body trailing to the left.
    pub fn inject(grid: &Grid) -> Result<Self> {
        if grid.size() < INJECT_MARGIN {
            return Err(GameError::GridTooSmall { size: grid.size(), needed: INJECT_MARGIN });
        }

        let row = (grid.size() - SNAKE_SIZE) as i32;
        let head_col = INJECT_MARGIN as i32;
        let size = SNAKE_SIZE as i32;

        let body = (1..=size)
            .map(|index| Segment {
                cell: Cell::new(head_col - (size - index), row),
                index: index as u64,
            })
            .collect();

        Ok(Snake { body })
    }

    pub fn head(&self) -> Cell {
        self.head_segment().cell
    }

    pub fn tail(&self) -> Cell {
        self.tail_segment().cell
    }

    pub fn head_segment(&self) -> Segment {
        // inject always lays SNAKE_SIZE segments and advance keeps the count
        self.body[self.body.len() - 1]
    }

    pub fn tail_segment(&self) -> Segment {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.body.iter()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.iter().any(|seg| seg.cell == cell)
    }

    /// Pushes `next_head` and drops the tail in one go; the length never
    /// changes.
    pub fn advance(&mut self, next_head: Cell) -> Advance {
        let old = self.head_segment();
        self.body.push_back(Segment { cell: next_head, index: old.index + 1 });
        let old_tail = self.body.pop_front().map(|seg| seg.cell).unwrap_or(next_head);

        Advance { new_head: next_head, old_head: old.cell, old_tail }
    }

    pub fn indices_contiguous(&self) -> bool {
        self.body
            .iter()
            .zip(self.body.iter().skip(1))
            .all(|(a, b)| b.index == a.index + 1)
    }
}
