#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays headless Zombie Arena sessions.

mod report;
mod simulation;

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zombie_arena_core::{CharacterKind, Tuning};
use zombie_arena_world::query;

use crate::simulation::Simulation;

/// Plays Zombie Arena sessions with an auto-aiming survivor and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "zombie-arena", version, about)]
struct Args {
    /// Character archetype to play.
    #[arg(long, value_enum, default_value_t = CharacterArg::Balanced)]
    character: CharacterArg,
    /// Simulated seconds per session.
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Consecutive sessions to play; gold is spent in the shop between them.
    #[arg(long, default_value_t = 1)]
    sessions: u32,
    /// Seed for the spawn generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the default tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Simulation ticks per simulated second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1_000))]
    fps: u32,
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Log filter directive such as `debug` or `zombie_arena_world=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

/// Character archetypes selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CharacterArg {
    Speed,
    Balanced,
    Tank,
}

impl From<CharacterArg> for CharacterKind {
    fn from(value: CharacterArg) -> Self {
        match value {
            CharacterArg::Speed => Self::Speed,
            CharacterArg::Balanced => Self::Balanced,
            CharacterArg::Tank => Self::Tank,
        }
    }
}

/// Entry point for the Zombie Arena command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be a positive number, got {}",
        args.seconds
    );
    let length =
        Duration::try_from_secs_f32(args.seconds).context("session length is out of range")?;

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, sessions = args.sessions, fps = args.fps, "starting run");

    let mut simulation = Simulation::new(tuning, seed, args.fps);
    let mut reports = Vec::new();
    for session in 0..args.sessions {
        let purchases = if session == 0 {
            Vec::new()
        } else {
            simulation.visit_shop()
        };
        let mut report = simulation.play_session(args.character.into(), length);
        report.purchases = purchases;
        reports.push(report);
    }

    if args.json {
        let encoded =
            serde_json::to_string_pretty(&reports).context("failed to encode the summary")?;
        println!("{encoded}");
    } else {
        println!("{}", query::welcome_banner(simulation.world()));
        for report in &reports {
            println!("{report}");
        }
    }

    Ok(())
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level `{directive}`"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}
