//! Breakout Sim entry point
//!
//! Runs a level headless with the autopilot on the paddle and logs progress.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;
#[cfg(not(target_arch = "wasm32"))]
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use breakout_sim::consts::PROGRESS_INTERVAL;
#[cfg(not(target_arch = "wasm32"))]
use breakout_sim::sim::{BallRemover, BlockRemover, Counter, ScoreTracker};
#[cfg(not(target_arch = "wasm32"))]
use breakout_sim::{LevelConfig, LevelError, LevelState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(short, long, value_parser, help = "Path of a JSON level file.")]
    level: Option<PathBuf>,
    #[clap(short, long, default_value_t = 20_000, help = "Maximum number of ticks to run.")]
    ticks: u64,
    #[clap(long, help = "Write the level description as JSON and exit.")]
    dump_level: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the wasm surface; there is no wasm binary
}

#[cfg(not(target_arch = "wasm32"))]
fn run(args: &Args) -> Result<(), LevelError> {
    let config = match &args.level {
        Some(path) => LevelConfig::load(path)?,
        None => LevelConfig::default(),
    };
    if args.dump_level {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut state = LevelState::from_config(&config)?;
    let score = Counter::new(0);
    let blocks = Counter::new(state.block_count() as i64);
    let balls = Counter::new(state.balls().len() as i64);
    state.add_block_listener(Rc::new(BlockRemover::new(blocks.clone())));
    state.add_block_listener(Rc::new(ScoreTracker::new(score.clone())));
    state.add_death_listener(Rc::new(BallRemover::new(balls.clone())));

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while state.time_ticks < args.ticks && blocks.value() > 0 && balls.value() > 0 {
        tick(&mut state, &input);
        if state.time_ticks % PROGRESS_INTERVAL == 0 {
            log::info!(
                "tick {}: score {}, {} blocks left, {} balls in play",
                state.time_ticks,
                score.value(),
                blocks.value(),
                balls.value()
            );
        }
    }

    let outcome = if blocks.value() <= 0 {
        "cleared"
    } else if balls.value() <= 0 {
        "lost"
    } else {
        "out of time"
    };
    log::info!(
        "Level '{}' {} after {} ticks: score {}, {} blocks left",
        state.name,
        outcome,
        state.time_ticks,
        score.value(),
        blocks.value()
    );
    Ok(())
}
