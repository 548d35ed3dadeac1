//! Fixed-interval tick timer. Only one deadline ever exists, so a second
//! tick loop cannot be started on top of a running one.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchedulerState::Stopped => "stopped",
            SchedulerState::Running => "running",
            SchedulerState::Paused => "paused",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("cannot {action} while {from}")]
    InvalidTransition { from: SchedulerState, action: &'static str },
}

#[derive(Debug)]
pub struct TickScheduler {
    interval: Duration,
    state: SchedulerState,
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        TickScheduler { interval, state: SchedulerState::Stopped, next_due: None }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stopped -> Running. Launching from any other state is refused.
    pub fn launch(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Stopped, "launch")?;
        self.arm(now);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Running, "pause")?;
        self.disarm(SchedulerState::Paused);
        Ok(())
    }

    pub fn resume(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.transition(SchedulerState::Paused, "resume")?;
        self.arm(now);
        Ok(())
    }

    pub fn toggle_pause(&mut self, now: Instant) -> Result<(), SchedulerError> {
        match self.state {
            SchedulerState::Running => self.pause(),
            SchedulerState::Paused => self.resume(now),
            SchedulerState::Stopped => Err(SchedulerError::InvalidTransition {
                from: self.state,
                action: "toggle pause",
            }),
        }
    }

    /// Always allowed; drops any pending deadline.
    pub fn stop(&mut self) {
        self.disarm(SchedulerState::Stopped);
    }

    /// Returns true when a tick is due. At most one tick fires per call and
    /// missed intervals are not caught up: the next deadline counts from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if self.state == SchedulerState::Running && now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    fn transition(&self, from: SchedulerState, action: &'static str) -> Result<(), SchedulerError> {
        if self.state != from {
            return Err(SchedulerError::InvalidTransition { from: self.state, action });
        }
        Ok(())
    }

    fn arm(&mut self, now: Instant) {
        debug!(from = %self.state, "scheduler running");
        self.state = SchedulerState::Running;
        self.next_due = Some(now + self.interval);
    }

    fn disarm(&mut self, to: SchedulerState) {
        debug!(from = %self.state, to = %to, "scheduler halted");
        self.state = to;
        self.next_due = None;
    }
}
