use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::scheduler::SchedulerError;

pub type Result<T> = std::result::Result<T, GameError>;

/// Everything that can stop the game from running. Crashing the snake is not
/// in here: that is a gameplay outcome, see `rules::Violation`.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("grid of size {size} cannot hold the starting snake (needs at least {needed})")]
    GridTooSmall { size: u16, needed: u16 },
    #[error("terminal is {have_w}x{have_h}, the game needs at least {need_w}x{need_h}")]
    TerminalTooSmall {
        have_w: u16,
        have_h: u16,
        need_w: u32,
        need_h: u32,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
