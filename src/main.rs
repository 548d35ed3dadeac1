mod config;
mod direction;
mod error;
mod game;
mod grid;
mod input;
mod render;
mod rules;
mod scheduler;
mod session;
mod snake;
mod term;

use std::{fs::File, path::{Path, PathBuf}, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;

use config::GameConfig;

/// Snake on a square grid, played in the terminal.
#[derive(Parser, Debug)]
#[command(name = "grid-snake", version, about, long_about = None)]
struct Cli {
    /// Grid side at level 1
    #[arg(long, default_value_t = config::ORIGIN_GRID_SIZE)]
    origin_size: u16,

    /// Smallest grid any level can shrink to
    #[arg(long, default_value_t = config::MINIMUM_GRID_SIZE)]
    minimum_size: u16,

    /// Roll a random grid size on every build instead of shrinking per level
    #[arg(long)]
    random_size: bool,

    /// Largest random grid size
    #[arg(long, default_value_t = config::MAXIMUM_GRID_SIZE)]
    maximum_size: u16,

    /// Level to start at
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Fails before the game resets
    #[arg(long, default_value_t = config::MAX_FAIL)]
    max_fail: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = config::TICK_MS)]
    tick_ms: u64,

    /// Cells travelled per tick
    #[arg(long, default_value_t = 1)]
    step: u16,

    /// Keep running after a fail instead of pausing
    #[arg(long)]
    no_pause_on_fail: bool,

    /// Seed for random grid sizes
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            origin_size: self.origin_size,
            minimum_size: self.minimum_size,
            maximum_size: self.maximum_size,
            random_size: self.random_size,
            starting_level: self.level,
            max_fail: self.max_fail,
            tick: Duration::from_millis(self.tick_ms),
            step: self.step,
            pause_on_fail: !self.no_pause_on_fail,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let mut game = game::SnakeGame::new(cli.game_config()).context("failed to start game")?;
    game.run().context("game aborted")?;
    Ok(())
}

// The terminal is in raw mode while playing, so logs only ever go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_config() {
        let cli = Cli::parse_from(["grid-snake"]);
        assert_eq!(cli.game_config(), GameConfig::default());
    }

    #[test]
    fn test_second_subscriber_install_is_an_error() {
        let path = std::env::temp_dir().join(format!("grid-snake-{}.log", std::process::id()));
        init_tracing(&path).unwrap();
        let err = init_tracing(&path).unwrap_err();
        assert!(err.to_string().contains("failed to install log subscriber"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cli = Cli::parse_from([
            "grid-snake",
            "--origin-size",
            "20",
            "--level",
            "2",
            "--tick-ms",
            "500",
            "--no-pause-on-fail",
            "--seed",
            "9",
        ]);
        let cfg = cli.game_config();
        assert_eq!(cfg.origin_size, 20);
        assert_eq!(cfg.starting_level, 2);
        assert_eq!(cfg.tick, Duration::from_millis(500));
        assert!(!cfg.pause_on_fail);
        assert_eq!(cfg.seed, Some(9));
        assert!(cfg.validate().is_ok());
    }
}
