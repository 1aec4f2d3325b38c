//! TextDrive entry point
//!
//! Headless host: plays or trains the autopilot against the simulation.
//! Rendering front ends drive `textdrive::sim` directly.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use textdrive::{Agent, Config, EpisodeMode, Rules, run_episode};

#[derive(Debug, Parser)]
#[command(name = "textdrive", about = "Single-lane endless driving game (headless)")]
struct Args {
    /// JSON config file; defaults to the reference constants
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drive one run with the autopilot and print the distance
    Play {
        /// Trained agent file (an untrained agent is used when absent)
        #[arg(short, long)]
        agent: Option<PathBuf>,
        /// Course seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many rows
        #[arg(long, default_value_t = 10_000)]
        max_rows: u64,
    },
    /// Train the autopilot and save its Q-table
    Train {
        #[arg(short, long, default_value_t = 50_000)]
        episodes: u64,
        /// Base seed; episode `n` uses `seed + n`
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 10_000)]
        max_rows: u64,
        /// Log progress every N episodes
        #[arg(long, default_value_t = 500)]
        report_every: u64,
        /// Output file
        #[arg(short, long, default_value = "qtable.json")]
        out: PathBuf,
        /// Continue training from an existing agent file
        #[arg(long)]
        resume: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let rules = Rules::new(config)?;

    match args.command {
        Command::Play {
            agent,
            seed,
            max_rows,
        } => {
            let mut agent = match agent {
                Some(path) => Agent::load(path)?,
                None => {
                    log::warn!("No agent given, driving with an untrained table");
                    Agent::new()
                }
            };
            let distance = run_episode(&mut agent, &rules, seed, max_rows, EpisodeMode::Play);
            println!("Distance: {}", distance);
        }
        Command::Train {
            episodes,
            seed,
            max_rows,
            report_every,
            out,
            resume,
        } => {
            let mut agent = match resume {
                Some(path) => Agent::load(path)?,
                None => Agent::new(),
            };
            train(&mut agent, &rules, episodes, seed, max_rows, report_every.max(1));
            agent.save(&out)?;
            println!("Best distance: {}", agent.best_distance);
        }
    }

    Ok(())
}

fn train(agent: &mut Agent, rules: &Rules, episodes: u64, seed: u64, max_rows: u64, report_every: u64) {
    let mut window_sum = 0u64;
    for n in 1..=episodes {
        window_sum += run_episode(agent, rules, seed.wrapping_add(n), max_rows, EpisodeMode::Train);

        if n % report_every == 0 {
            log::info!(
                "Episode {:6} | best {:6} | avg {:8.1} | epsilon {:.3}",
                n,
                agent.best_distance,
                window_sum as f64 / report_every as f64,
                agent.epsilon
            );
            window_sum = 0;
        }
    }
}
