//! Legality of a candidate head cell.

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Violation {
    OutOfBounds,
    SelfCollision,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Legal,
    Illegal(Violation),
}

/// Checked against the snake as it stands before this tick's retraction, so
/// the cell the tail is about to leave still counts as occupied.
pub fn evaluate(candidate: Cell, grid: &Grid, snake: &Snake) -> Evaluation {
    if !grid.contains(candidate) {
        Evaluation::Illegal(Violation::OutOfBounds)
    } else if snake.occupies(candidate) {
        Evaluation::Illegal(Violation::SelfCollision)
    } else {
        Evaluation::Legal
    }
}
