use crate::grid::Cell;
use Heading::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Heading {
    fn axis_and_sign(self) -> (Axis, i32) {
        match self {
            Up => (Axis::Y, -1),
            Down => (Axis::Y, 1),
            Left => (Axis::X, -1),
            Right => (Axis::X, 1),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// The latched movement vector. Input overwrites it at any time; the next
/// tick reads whatever was set last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionState {
    axis: Axis,
    delta: i32,
    step: i32,
}

impl DirectionState {
    /// Starts out heading right, like a freshly injected snake.
    pub fn new(step: u16) -> Self {
        let step = step as i32;
        DirectionState { axis: Axis::X, delta: step, step }
    }

    pub fn set(&mut self, heading: Heading) {
        let (axis, sign) = heading.axis_and_sign();
        self.axis = axis;
        self.delta = sign * self.step;
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }

    pub fn heading(&self) -> Heading {
        match (self.axis, self.delta.signum()) {
            (Axis::X, -1) => Left,
            (Axis::X, _) => Right,
            (Axis::Y, -1) => Up,
            (Axis::Y, _) => Down,
        }
    }

    /// Where `from` ends up after one tick along the current vector.
    pub fn next_cell(&self, from: Cell) -> Cell {
        match self.axis {
            Axis::X => Cell::new(from.col + self.delta, from.row),
            Axis::Y => Cell::new(from.col, from.row + self.delta),
        }
    }

    pub fn reset(&mut self) {
        *self = DirectionState::new(self.step as u16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_right() {
        let dir = DirectionState::new(1);
        assert_eq!(dir.axis(), Axis::X);
        assert_eq!(dir.delta(), 1);
        assert_eq!(dir.heading(), Right);
    }

    #[test]
    fn test_set_maps_headings() {
        let mut dir = DirectionState::new(1);
        dir.set(Up);
        assert_eq!((dir.axis(), dir.delta()), (Axis::Y, -1));
        dir.set(Down);
        assert_eq!((dir.axis(), dir.delta()), (Axis::Y, 1));
        dir.set(Left);
        assert_eq!((dir.axis(), dir.delta()), (Axis::X, -1));
        dir.set(Right);
        assert_eq!((dir.axis(), dir.delta()), (Axis::X, 1));
    }

    #[test]
    fn test_step_scales_delta() {
        let mut dir = DirectionState::new(2);
        dir.set(Left);
        assert_eq!(dir.delta(), -2);
        assert_eq!(dir.next_cell(Cell::new(10, 4)), Cell::new(8, 4));
    }

    #[test]
    fn test_setting_twice_is_same_as_once() {
        let mut once = DirectionState::new(1);
        once.set(Down);
        let mut twice = DirectionState::new(1);
        twice.set(Down);
        twice.set(Down);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_last_write_wins() {
        let mut dir = DirectionState::new(1);
        dir.set(Up);
        dir.set(Left);
        dir.set(Down);
        assert_eq!(dir.heading(), Down);
        assert_eq!(dir.next_cell(Cell::new(3, 3)), Cell::new(3, 4));
    }

    #[test]
    fn test_reversal_is_not_filtered() {
        let mut dir = DirectionState::new(1);
        dir.set(Left);
        assert_eq!(dir.heading(), Left);
    }
}
