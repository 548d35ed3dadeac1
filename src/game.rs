use std::{thread::sleep, time::{Duration, Instant}};

use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{self, Input};
use crate::render::{self, RenderSurface};
use crate::session::{FailOutcome, GameSession, TickOutcome};
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

/// Whether the driver should keep going after an input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame {
    session: GameSession,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(cfg: GameConfig) -> Result<Self> {
        let largest = cfg.largest_grid();
        let session = GameSession::new(cfg)?;
        let term = TermManager::new()?;
        term.check_fits(largest)?;
        Ok(SnakeGame { session, term })
    }

    /// Runs until the player quits, always handing the terminal back.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.run_inner();
        if let Err(err) = self.term.restore() {
            tracing::error!(%err, "failed to restore terminal");
        }
        result
    }

    fn run_inner(&mut self) -> Result<()> {
        redraw(&mut self.term, &self.session)?;
        if self.show_intro()? == Flow::Quit {
            return Ok(());
        }

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            let now = Instant::now();
            for key_ev in self.term.read_key_events_queue()? {
                let input = match input::map_key(&key_ev) {
                    Some(input) => input,
                    None => continue,
                };
                if self.apply(input, now)? == Flow::Quit {
                    info!("player quit");
                    return Ok(());
                }
            }

            if let Some(outcome) = self.session.tick(now)? {
                self.present(outcome)?;
            }
        }
    }

    fn show_intro(&mut self) -> Result<Flow> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Enter or Space to launch",
            "Esc or P to pause, X to stop",
            "Q or CTRL+C to quit",
            "",
            "Press any key",
        ])?;

        let key_ev = self.term.read_key_blocking()?;
        if input::map_key(&key_ev) == Some(Input::Quit) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, input: Input, now: Instant) -> Result<Flow> {
        if input == Input::Quit {
            return Ok(Flow::Quit);
        }

        if let Err(err) = self.session.handle_input(input, now) {
            warn!(?input, %err, "input ignored");
            return Ok(Flow::Continue);
        }

        match input {
            Input::TogglePause | Input::Launch | Input::Stop => self.refresh_overlay()?,
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn present(&mut self, outcome: TickOutcome) -> Result<()> {
        match outcome {
            TickOutcome::Moved(advance) => {
                render::draw_advance(&mut self.term, &advance, self.session.direction().heading())
            }
            TickOutcome::Failed { fail: FailOutcome::Reset, .. } => {
                redraw(&mut self.term, &self.session)?;
                self.refresh_overlay()
            }
            TickOutcome::Failed { .. } => self.refresh_overlay(),
        }
    }

    fn refresh_overlay(&mut self) -> Result<()> {
        let state = self.session.snapshot();
        render::draw_state(&mut self.term, &state)?;
        if state.is_paused {
            self.term.show_message(&["Paused", "Press Esc to resume"])
        } else {
            self.term.hide_message()
        }
    }
}

/// Rebuilds the surface from scratch for the session's current grid.
fn redraw<S: RenderSurface + ?Sized>(surface: &mut S, session: &GameSession) -> Result<()> {
    surface.build(session.grid().size())?;
    render::draw_snake(surface, session.snake(), session.direction().heading())?;
    render::draw_state(surface, &session.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::render::tests::RecordingSurface;
    use crate::render::Mark;

    #[test]
    fn test_redraw_after_reset_matches_session() {
        let cfg = GameConfig { pause_on_fail: false, ..GameConfig::default() };
        let mut session = GameSession::new(cfg).unwrap();
        let mut surface = RecordingSurface::default();
        redraw(&mut surface, &session).unwrap();

        session.reset_game().unwrap();
        redraw(&mut surface, &session).unwrap();

        assert_eq!(surface.size, 30);
        assert_eq!(surface.cells.len(), 5);
        assert_eq!(surface.cells[&Cell::new(10, 25)], Mark::Head(crate::direction::Heading::Right));
        assert_eq!(surface.fails, Some((0, 3)));
        assert_eq!(surface.status, "level 1/25  stopped");
    }

    #[test]
    fn test_surface_tracks_session_over_ticks() {
        let cfg = GameConfig { pause_on_fail: false, ..GameConfig::default() };
        let mut session = GameSession::new(cfg).unwrap();
        let mut surface = RecordingSurface::default();
        redraw(&mut surface, &session).unwrap();

        for _ in 0..5 {
            if let TickOutcome::Moved(adv) = session.step().unwrap() {
                render::draw_advance(&mut surface, &adv, session.direction().heading()).unwrap();
            }
        }

        assert_eq!(surface.cells.len(), session.snake().len());
        for seg in session.snake().segments() {
            assert!(surface.cells.contains_key(&seg.cell));
        }
    }
}
