//! One game: grid, snake, direction, timer and the fail counter, all owned
//! by a single `GameSession` that the driver passes around.

use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::config::GameConfig;
use crate::direction::DirectionState;
use crate::error::Result;
use crate::grid::Grid;
use crate::input::Input;
use crate::rules::{self, Evaluation, Violation};
use crate::scheduler::{SchedulerError, SchedulerState, TickScheduler};
use crate::snake::{Advance, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailOutcome {
    Counted { fail_count: u32 },
    /// The fail threshold was reached and the game started over.
    Reset,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved(Advance),
    Failed { violation: Violation, fail: FailOutcome },
}

/// Read-only view of the session counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameState {
    pub current_level: u32,
    pub maximum_level: u32,
    pub fail_count: u32,
    pub max_fail: u32,
    pub is_paused: bool,
    pub is_launched: bool,
}

pub struct GameSession {
    cfg: GameConfig,
    level: u32,
    fail_count: u32,
    grid: Grid,
    snake: Snake,
    direction: DirectionState,
    scheduler: TickScheduler,
    rng: StdRng,
}

impl GameSession {
    pub fn new(cfg: GameConfig) -> Result<Self> {
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let level = cfg.starting_level;
        let grid = Grid::for_level(level, &cfg, &mut rng);
        let snake = Snake::inject(&grid)?;
        info!(level, grid_size = grid.size(), "new game session");

        Ok(GameSession {
            direction: DirectionState::new(cfg.step),
            scheduler: TickScheduler::new(cfg.tick),
            cfg,
            level,
            fail_count: 0,
            grid,
            snake,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> &DirectionState {
        &self.direction
    }

    pub fn snapshot(&self) -> GameState {
        let state = self.scheduler.state();
        GameState {
            current_level: self.level,
            maximum_level: self.cfg.maximum_level,
            fail_count: self.fail_count,
            max_fail: self.cfg.max_fail,
            is_paused: state == SchedulerState::Paused,
            is_launched: state != SchedulerState::Stopped,
        }
    }

    /// Applies one input. Turns only latch a new vector; the snake itself
    /// moves on the next tick. `Quit` is the driver's business and is a
    /// no-op here.
    pub fn handle_input(&mut self, input: Input, now: Instant) -> std::result::Result<(), SchedulerError> {
        match input {
            Input::Turn(heading) => {
                trace!(?heading, "direction latched");
                self.direction.set(heading);
            }
            Input::Launch => {
                self.scheduler.launch(now)?;
                info!(interval_ms = self.scheduler.interval().as_millis() as u64, "game launched");
            }
            Input::TogglePause => {
                self.scheduler.toggle_pause(now)?;
                info!(state = %self.scheduler.state(), "pause toggled");
            }
            Input::Stop => {
                self.scheduler.stop();
                info!("game stopped");
            }
            Input::Quit => {}
        }
        Ok(())
    }

    /// Runs a simulation step if the timer says one is due.
    pub fn tick(&mut self, now: Instant) -> Result<Option<TickOutcome>> {
        if !self.scheduler.poll(now) {
            return Ok(None);
        }
        self.step().map(Some)
    }

    /// One simulation step, regardless of the timer.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let candidate = self.direction.next_cell(self.snake.head());
        trace!(axis = ?self.direction.axis(), delta = self.direction.delta(), "tick");

        match rules::evaluate(candidate, &self.grid, &self.snake) {
            Evaluation::Legal => {
                let advance = self.snake.advance(candidate);
                debug_assert!(self.snake.indices_contiguous());
                debug!(col = candidate.col, row = candidate.row, "snake advanced");
                Ok(TickOutcome::Moved(advance))
            }
            Evaluation::Illegal(violation) => {
                warn!(?violation, col = candidate.col, row = candidate.row, "illegal move");
                let fail = self.on_fail()?;
                Ok(TickOutcome::Failed { violation, fail })
            }
        }
    }

    pub fn on_fail(&mut self) -> Result<FailOutcome> {
        let outcome = if self.fail_count + 1 >= self.cfg.max_fail {
            self.reset_game()?;
            FailOutcome::Reset
        } else {
            self.fail_count += 1;
            info!(fail_count = self.fail_count, max_fail = self.cfg.max_fail, "fail counted");
            FailOutcome::Counted { fail_count: self.fail_count }
        };

        if self.cfg.pause_on_fail && self.scheduler.state() == SchedulerState::Running {
            self.scheduler.pause()?;
        }
        Ok(outcome)
    }

    /// Back to level 1 with a freshly injected snake heading right.
    pub fn reset_game(&mut self) -> Result<()> {
        self.level = 1;
        self.grid = Grid::for_level(self.level, &self.cfg, &mut self.rng);
        self.snake = Snake::inject(&self.grid)?;
        self.direction.reset();
        self.fail_count = 0;
        info!(grid_size = self.grid.size(), "game reset");
        Ok(())
    }
}
