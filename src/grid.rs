//! The square playfield. Cells are 1-indexed; column 0 and `size + 1` are
//! the walls.

use rand::Rng;

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    pub fn build(size: u16) -> Self {
        Grid { size }
    }

    /// Builds the grid for `level`, either shrinking linearly from the origin
    /// size or rolling a random side when the config asks for it.
    pub fn for_level<R: Rng>(level: u32, cfg: &GameConfig, rng: &mut R) -> Self {
        let size = if cfg.random_size {
            rng.gen_range(cfg.minimum_size..=cfg.maximum_size)
        } else {
            grid_size_for_level(level, cfg.origin_size, cfg.minimum_size)
        };
        Grid::build(size)
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i32;
        (1..=size).contains(&cell.col) && (1..=size).contains(&cell.row)
    }
}

/// Ten percent of the origin size comes off per level past the first, never
/// going below `minimum`.
pub fn grid_size_for_level(level: u32, origin: u16, minimum: u16) -> u16 {
    let reduction = if level <= 1 {
        0
    } else {
        origin as u64 * level as u64 / 10
    };
    let size = (origin as u64).saturating_sub(reduction);
    size.max(minimum as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_contains() {
        let grid = Grid::build(30);
        assert!(grid.contains(Cell::new(1, 1)));
        assert!(grid.contains(Cell::new(30, 30)));
        assert!(!grid.contains(Cell::new(0, 5)));
        assert!(!grid.contains(Cell::new(31, 5)));
        assert!(!grid.contains(Cell::new(5, 0)));
        assert!(!grid.contains(Cell::new(5, 31)));
        assert!(!grid.contains(Cell::new(-1, -1)));
    }

    #[test]
    fn test_level_sizing() {
        assert_eq!(grid_size_for_level(1, 30, 10), 30);
        assert_eq!(grid_size_for_level(2, 30, 10), 24);
        assert_eq!(grid_size_for_level(3, 30, 10), 21);
        assert_eq!(grid_size_for_level(6, 30, 10), 12);
        assert_eq!(grid_size_for_level(7, 30, 10), 10);
        assert_eq!(grid_size_for_level(25, 30, 10), 10);
    }

    #[test]
    fn test_random_size_stays_in_range() {
        let cfg = GameConfig { random_size: true, maximum_size: 40, ..GameConfig::default() };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let size = Grid::for_level(1, &cfg, &mut rng).size();
            assert!((10..=40).contains(&size));
        }
    }

    #[test]
    fn test_for_level_ignores_rng_when_not_random() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Grid::for_level(2, &cfg, &mut rng).size(), 24);
    }
}
