//! Game tunables.

use std::time::Duration;

use thiserror::Error;

use crate::snake::INJECT_MARGIN;

pub const ORIGIN_GRID_SIZE: u16 = 30;
pub const MINIMUM_GRID_SIZE: u16 = 10;
pub const MAXIMUM_GRID_SIZE: u16 = 100;
pub const MAXIMUM_LEVEL: u32 = 25;
pub const MAX_FAIL: u32 = 3;
pub const TICK_MS: u64 = 200;
/// No terminal is wide enough for a grid past this side.
pub const GRID_SIDE_LIMIT: u16 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max fail must be at least 1")]
    ZeroMaxFail,
    #[error("step must be at least 1")]
    ZeroStep,
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("minimum grid size {0} cannot hold the starting snake")]
    MinimumBelowMargin(u16),
    #[error("grid size {size} is below the minimum {minimum}")]
    BelowMinimum { size: u16, minimum: u16 },
    #[error("grid size {size} is above the limit {limit}")]
    AboveLimit { size: u16, limit: u16 },
    #[error("starting level {level} is outside 1..={maximum}")]
    LevelOutOfRange { level: u32, maximum: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Grid side at level 1.
    pub origin_size: u16,
    pub minimum_size: u16,
    /// Upper bound for random grid sizes.
    pub maximum_size: u16,
    pub random_size: bool,
    pub starting_level: u32,
    pub maximum_level: u32,
    pub max_fail: u32,
    pub tick: Duration,
    /// Cells travelled per tick.
    pub step: u16,
    pub pause_on_fail: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            origin_size: ORIGIN_GRID_SIZE,
            minimum_size: MINIMUM_GRID_SIZE,
            maximum_size: MAXIMUM_GRID_SIZE,
            random_size: false,
            starting_level: 1,
            maximum_level: MAXIMUM_LEVEL,
            max_fail: MAX_FAIL,
            tick: Duration::from_millis(TICK_MS),
            step: 1,
            pause_on_fail: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fail == 0 {
            return Err(ConfigError::ZeroMaxFail);
        }
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.minimum_size < INJECT_MARGIN {
            return Err(ConfigError::MinimumBelowMargin(self.minimum_size));
        }
        let mut sizes = vec![self.minimum_size, self.origin_size];
        if self.random_size {
            sizes.push(self.maximum_size);
        }
        for size in sizes {
            if size < self.minimum_size {
                return Err(ConfigError::BelowMinimum { size, minimum: self.minimum_size });
            }
            if size > GRID_SIDE_LIMIT {
                return Err(ConfigError::AboveLimit { size, limit: GRID_SIDE_LIMIT });
            }
        }
        if self.starting_level == 0 || self.starting_level > self.maximum_level {
            return Err(ConfigError::LevelOutOfRange {
                level: self.starting_level,
                maximum: self.maximum_level,
            });
        }
        Ok(())
    }

    /// Largest grid side this configuration can ever build.
    pub fn largest_grid(&self) -> u16 {
        if self.random_size {
            self.maximum_size
        } else {
            self.origin_size.max(self.minimum_size)
        }
    }
}
