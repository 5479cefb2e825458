//! Dash Runner entry point
//!
//! Runs headless episodes driven by the autopilot and prints one JSON summary
//! per episode. Windowing and drawing are left to an embedding frontend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use dash_runner::autopilot::Autopilot;
use dash_runner::consts::FRAME_WORK_MS;
use dash_runner::{ConfigError, Env, Game, GameConfig, Intent, RunnerEnv, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Real-time loop fed by key events
    Interactive,
    /// Discrete RL environment
    Training,
}

/// Endless runner simulation
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which driver runs the simulation
    #[arg(short, long, value_enum, default_value_t = Mode::Training)]
    mode: Mode,

    /// JSON config overriding the mode's preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Episodes to play
    #[arg(short, long, default_value_t = 1)]
    episodes: u32,

    /// Stop an episode after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Milliseconds reported to the spawner per interactive frame
    #[arg(long, default_value_t = FRAME_WORK_MS)]
    frame_ms: u32,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    episode: u32,
    ticks: u64,
    score: u64,
    lives_left: u32,
    total_reward: f32,
    terminated: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let preset = match args.mode {
        Mode::Interactive => GameConfig::interactive(),
        Mode::Training => GameConfig::training(),
    };
    let config = match &args.config {
        Some(path) => GameConfig::load_onto(path, &preset)?,
        None => preset,
    };

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    log::info!(
        "Dash Runner starting: {:?} mode, seed {}, {} episode(s)",
        args.mode,
        args.seed,
        args.episodes
    );

    let summaries = match args.mode {
        Mode::Interactive => run_interactive(config, args),
        Mode::Training => run_training(config, args),
    };
    for summary in &summaries {
        println!("{}", serde_json::to_string(summary)?);
    }
    Ok(())
}

/// Drive the RL environment with the autopilot
fn run_training(config: GameConfig, args: &Args) -> Vec<EpisodeSummary> {
    let mut env = RunnerEnv::with_config(config, args.seed);
    let pilot = Autopilot::new();
    let mut summaries = Vec::new();

    for episode in 1..=args.episodes {
        env.reset();
        let mut total_reward = 0.0;
        let mut done = false;
        while !done && env.episode().ticks() < args.max_ticks {
            let transition = env.step(pilot.choose(env.episode()));
            total_reward += transition.reward;
            done = transition.done;
        }
        let state = env.episode();
        summaries.push(EpisodeSummary {
            episode,
            ticks: state.ticks(),
            score: state.score(),
            lives_left: state.player().lives,
            total_reward,
            terminated: done,
        });
    }
    summaries
}

/// Drive the real-time loop by synthesizing the autopilot's key presses
fn run_interactive(config: GameConfig, args: &Args) -> Vec<EpisodeSummary> {
    let mut game = Game::with_config(config, args.seed);
    let pilot = Autopilot::new();
    let mut crouch_held = false;
    let mut summaries = Vec::new();

    for episode in 1..=args.episodes {
        if episode > 1 {
            game.restart();
            crouch_held = false;
        }
        let mut total_reward = 0.0;
        while !game.is_over() && game.frames() < args.max_ticks {
            let intent = pilot.choose(game.episode());
            for event in Autopilot::key_events(intent, crouch_held) {
                game.handle_key(event);
            }
            crouch_held = intent == Intent::Crouch;
            if let Some(outcome) = game.update(args.frame_ms) {
                total_reward += outcome.reward;
            }
        }
        let state = game.episode();
        summaries.push(EpisodeSummary {
            episode,
            ticks: state.ticks(),
            score: state.score(),
            lives_left: state.player().lives,
            total_reward,
            terminated: game.is_over(),
        });
    }
    summaries
}
