use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rand::Rng;
use sweeper_core::*;

use crate::moves::Move;

mod moves;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::BEGINNER,
            Preset::Intermediate => Difficulty::INTERMEDIATE,
            Preset::Expert => Difficulty::EXPERT,
        }
    }
}

/// Replays a sequence of moves on a seeded board and prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u32>,

    /// Board preset, ignored when a custom size is given
    #[arg(short, long, value_enum, default_value_t = Preset::Beginner)]
    preset: Preset,

    /// Custom board height
    #[arg(long, requires_all = ["width", "mines"], conflicts_with = "preset")]
    height: Option<Coord>,

    /// Custom board width
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["height", "width"])]
    mines: Option<CellCount>,

    /// Resume from a snapshot file instead of starting a new game
    #[arg(long, conflicts_with_all = ["seed", "height"])]
    load: Option<PathBuf>,

    /// Write the final game to a snapshot file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Show every cell's content in the printed board
    #[arg(long)]
    reveal_all: bool,

    /// Moves to play: r:X,Y reveals, f:X,Y toggles a flag, t ticks the timer, u undoes a loss
    moves: Vec<Move>,
}

impl Args {
    fn difficulty(&self) -> anyhow::Result<Difficulty> {
        match (self.height, self.width, self.mines) {
            (Some(height), Some(width), Some(mines)) => Difficulty::new(height, width, mines)
                .context("Invalid custom board"),
            _ => Ok(self.preset.into()),
        }
    }

    fn first_action(&self) -> anyhow::Result<Action> {
        if let Some(path) = &self.load {
            let snapshot = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            let game = Game::from_snapshot(&snapshot)
                .with_context(|| format!("Could not load {}", path.display()))?;
            return Ok(Action::Load(Box::new(game)));
        }

        let seed = self
            .seed
            .unwrap_or_else(|| rand::rng().random_range(1..=u32::MAX));
        Ok(Action::Start {
            seed,
            difficulty: self.difficulty()?,
        })
    }
}

/// Ticks are replayed from the move list, this only reports when a real timer would run.
#[derive(Debug, Default)]
struct ReplayScheduler;

impl TickScheduler for ReplayScheduler {
    fn start(&mut self) {
        log::info!("Timer would start ticking now");
    }

    fn stop(&mut self) {
        log::info!("Timer would stop now");
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let mut store = GameStore::new(ReplayScheduler);
    let mut game = store.dispatch(args.first_action()?)?;
    log::debug!("seed: {}", game.seed());

    for &mv in &args.moves {
        game = store
            .dispatch(mv.into())
            .with_context(|| format!("Move {mv:?} failed"))?;
    }

    println!("{}", board_to_string(game.grid(), args.reveal_all));
    println!(
        "status: {:?}  flags left: {}  time: {}s  seed: {}",
        game.status(),
        game.remaining_flags(),
        game.elapsed_time(),
        game.seed()
    );

    if let Some(path) = &args.save {
        fs::write(path, game.to_snapshot()?)
            .with_context(|| format!("Could not write {}", path.display()))?;
        log::info!("Saved game to {}", path.display());
    }

    Ok(())
}
