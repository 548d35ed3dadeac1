//! Anything the game can be drawn on. The session never reads occupancy back
//! from here; it only pushes changes.

use crate::direction::Heading;
use crate::error::Result;
use crate::grid::Cell;
use crate::session::GameState;
use crate::snake::{Advance, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mark {
    Head(Heading),
    Body,
}

pub trait RenderSurface {
    /// Materializes an empty `size` x `size` surface.
    fn build(&mut self, size: u16) -> Result<()>;
    fn mark(&mut self, cell: Cell, mark: Mark) -> Result<()>;
    fn unmark(&mut self, cell: Cell) -> Result<()>;
    fn show_fail_count(&mut self, fails: u32, max_fail: u32) -> Result<()>;
    fn show_status(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub fn draw_snake<S: RenderSurface + ?Sized>(surface: &mut S, snake: &Snake, heading: Heading) -> Result<()> {
    let head = snake.head();
    for seg in snake.segments() {
        let mark = if seg.cell == head { Mark::Head(heading) } else { Mark::Body };
        surface.mark(seg.cell, mark)?;
    }
    surface.flush()
}

pub fn draw_advance<S: RenderSurface + ?Sized>(surface: &mut S, advance: &Advance, heading: Heading) -> Result<()> {
    surface.unmark(advance.old_tail)?;
    surface.mark(advance.old_head, Mark::Body)?;
    surface.mark(advance.new_head, Mark::Head(heading))?;
    surface.flush()
}

pub fn draw_state<S: RenderSurface + ?Sized>(surface: &mut S, state: &GameState) -> Result<()> {
    surface.show_fail_count(state.fail_count, state.max_fail)?;
    let status = if state.is_paused {
        "paused"
    } else if state.is_launched {
        "running"
    } else {
        "stopped"
    };
    surface.show_status(&format!("level {}/{}  {}", state.current_level, state.maximum_level, status))?;
    surface.flush()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::grid::Grid;
    use std::collections::HashMap;

    /// Keeps the last thing drawn on every cell.
    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub size: u16,
        pub cells: HashMap<Cell, Mark>,
        pub fails: Option<(u32, u32)>,
        pub status: String,
        pub flushes: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn build(&mut self, size: u16) -> Result<()> {
            self.size = size;
            self.cells.clear();
            Ok(())
        }

        fn mark(&mut self, cell: Cell, mark: Mark) -> Result<()> {
            self.cells.insert(cell, mark);
            Ok(())
        }

        fn unmark(&mut self, cell: Cell) -> Result<()> {
            self.cells.remove(&cell);
            Ok(())
        }

        fn show_fail_count(&mut self, fails: u32, max_fail: u32) -> Result<()> {
            self.fails = Some((fails, max_fail));
            Ok(())
        }

        fn show_status(&mut self, text: &str) -> Result<()> {
            self.status = text.to_string();
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_draw_snake_marks_every_segment() {
        let snake = Snake::inject(&Grid::build(30)).unwrap();
        let mut surface = RecordingSurface::default();
        draw_snake(&mut surface, &snake, Heading::Right).unwrap();

        assert_eq!(surface.cells.len(), 5);
        assert_eq!(surface.cells[&Cell::new(10, 25)], Mark::Head(Heading::Right));
        assert_eq!(surface.cells[&Cell::new(6, 25)], Mark::Body);
        assert_eq!(surface.flushes, 1);
    }

    #[test]
    fn test_draw_advance_moves_marks() {
        let mut snake = Snake::inject(&Grid::build(30)).unwrap();
        let mut surface = RecordingSurface::default();
        draw_snake(&mut surface, &snake, Heading::Right).unwrap();

        let adv = snake.advance(Cell::new(10, 24));
        draw_advance(&mut surface, &adv, Heading::Up).unwrap();

        assert_eq!(surface.cells.len(), 5);
        assert!(!surface.cells.contains_key(&Cell::new(6, 25)));
        assert_eq!(surface.cells[&Cell::new(10, 25)], Mark::Body);
        assert_eq!(surface.cells[&Cell::new(10, 24)], Mark::Head(Heading::Up));
        for seg in snake.segments() {
            assert!(surface.cells.contains_key(&seg.cell));
        }
    }

    #[test]
    fn test_draw_state() {
        let state = GameState {
            current_level: 1,
            maximum_level: 25,
            fail_count: 2,
            max_fail: 3,
            is_paused: true,
            is_launched: true,
        };
        let mut surface = RecordingSurface::default();
        draw_state(&mut surface, &state).unwrap();
        assert_eq!(surface.fails, Some((2, 3)));
        assert_eq!(surface.status, "level 1/25  paused");
    }
}
