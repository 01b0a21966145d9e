use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autosweep_core::{AgentMove, Board, GameConfig, GameState, Session};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(version, about = "Let the solving agent play minesweeper", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with board parameters, overridden by the flags below
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(short, long)]
    mines: Option<usize>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play this many games in a row and only print the tally
    #[arg(short, long, default_value_t = 1)]
    games: u64,
}

/// Contents of the `--config` file. Every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct Settings {
    width: Option<usize>,
    height: Option<usize>,
    mines: Option<usize>,
    seed: Option<u64>,
}

impl Settings {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Could not parse {}", path.display()))
    }

    fn override_with(self, args: &Args) -> Self {
        Self {
            width: args.width.or(self.width),
            height: args.height.or(self.height),
            mines: args.mines.or(self.mines),
            seed: args.seed.or(self.seed),
        }
    }

    fn game_config(&self) -> Result<GameConfig> {
        let default = GameConfig::default();
        let width = self.width.unwrap_or(default.width.into());
        let height = self.height.unwrap_or(default.height.into());
        let mines = self.mines.unwrap_or(default.mines.into());
        autosweep_core::configure(width, height, mines).context("Invalid board parameters")
    }
}

fn render(board: &Board) -> String {
    let width = usize::from(board.width());
    let mut out = String::with_capacity(board.tile_count() * 2);
    for (index, view) in board.views().enumerate() {
        if index > 0 {
            out.push(if index % width == 0 { '\n' } else { ' ' });
        }
        out.push(view.glyph());
    }
    out
}

fn play_one(config: GameConfig, seed: u64) -> Result<(GameState, Session)> {
    let mut session = Session::seeded(config, seed);
    session.start_agent();

    let max_steps = usize::from(config.total_tiles());
    let mut steps = 0;
    while session.is_agent_active() && steps < max_steps {
        let (_, action) = session
            .agent_step()
            .with_context(|| format!("Agent failed on step {steps} of seed {seed}"))?;
        if !matches!(action, AgentMove::Idle) {
            tracing::debug!(steps, "{action:?}");
        }
        steps += 1;
    }

    let state = session.snapshot().state;
    tracing::info!(seed, steps, ?state, "Game over");
    Ok((state, session))
}

fn play_many(config: GameConfig, seed: u64, games: u64) -> Result<()> {
    let mut wins = 0u64;
    let mut steps = 0usize;
    for game in 0..games {
        let game_seed = seed.wrapping_add(game);
        let mut session = Session::seeded(config, game_seed);
        session.start_agent();
        steps += session
            .run_agent(usize::from(config.total_tiles()))
            .with_context(|| format!("Agent failed on seed {game_seed}"))?;
        if session.snapshot().state == GameState::Win {
            wins += 1;
        }
    }

    let rate = 100.0 * wins as f64 / games as f64;
    println!(
        "{}x{} with {} mines: won {wins}/{games} ({rate:.1}%), {:.1} steps per game",
        config.width,
        config.height,
        config.mines,
        steps as f64 / games as f64
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .override_with(&args);
    let config = settings.game_config()?;
    let seed = settings
        .seed
        .unwrap_or_else(|| SmallRng::from_os_rng().random());
    tracing::debug!(?config, seed, "Starting");

    if args.games > 1 {
        return play_many(config, seed, args.games);
    }

    let (state, session) = play_one(config, seed)?;
    let board = session.snapshot().board;
    println!("{}", render(board));
    println!(
        "{state:?} with {} of {} safe tiles open, seed {seed}",
        board.open_count(),
        config.safe_tiles()
    );
    Ok(())
}
