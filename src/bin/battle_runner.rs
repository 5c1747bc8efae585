//! Headless Battle Runner
//!
//! Plays an autopilot human against the adaptive opponent and prints
//! per-battle results as JSON or text.

use clap::Parser;
use lebron_arena::battle::ai::{load_profile, CombatAI, DecisionContext, GreedyPolicy};
use lebron_arena::battle::{create_battle_with, submit_round, BattleReport, BattleStatus};
use lebron_arena::battle::DifficultyProfile;
use lebron_arena::core::config::ArenaConfig;
use lebron_arena::core::types::Difficulty;
use serde::Serialize;
use std::process::ExitCode;

/// Headless Battle Runner - autopilot vs adaptive opponent
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run autopilot battles against the adaptive opponent")]
struct Args {
    /// Opponent difficulty: easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Load the opponent profile from a TOML file instead of the built-in one
    #[arg(long)]
    profile: Option<std::path::PathBuf>,

    /// Random seed for deterministic runs (battle n uses seed + n)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of battles to run
    #[arg(long, default_value_t = 1)]
    battles: u32,

    /// Maximum rounds before a battle is abandoned
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every narrative line to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    seed: u64,
    difficulty: Difficulty,
    rounds: u32,
    status: BattleStatus,
    human_health: u32,
    opponent_health: u32,
    won: bool,
    /// Opponent's adaptive scores at the end of the battle
    opponent_reads: lebron_arena::battle::ai::AdaptiveScores,
}

#[derive(Serialize, Default)]
struct Totals {
    won: u32,
    lost: u32,
    tied: u32,
    unfinished: u32,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let profile = match &args.profile {
        Some(path) => match load_profile(path) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!("Failed to load profile {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => DifficultyProfile::builtin(args.difficulty),
    };

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let config = ArenaConfig::default();
    let mut totals = Totals::default();
    let mut results = Vec::new();

    for n in 0..args.battles {
        let seed = base_seed.wrapping_add(n as u64);
        let result = match run_battle(&config, profile.clone(), seed, &args) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Battle {} failed: {}", n, e);
                return ExitCode::FAILURE;
            }
        };

        match result.status {
            BattleStatus::Won => totals.won += 1,
            BattleStatus::Lost => totals.lost += 1,
            BattleStatus::Tied => totals.tied += 1,
            BattleStatus::InProgress => totals.unfinished += 1,
        }
        results.push(result);
    }

    match args.format.as_str() {
        "text" => print_text(&results, &totals),
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            let output = serde_json::json!({ "battles": results, "totals": totals });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!("Failed to serialize results: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_battle(
    config: &ArenaConfig,
    profile: DifficultyProfile,
    seed: u64,
    args: &Args,
) -> lebron_arena::core::error::Result<BattleResult> {
    let mut context = create_battle_with(config, profile, seed)?;
    let mut autopilot = GreedyPolicy::default();

    if args.verbose {
        eprintln!("=== Battle (seed {}) ===", seed);
    }

    while !context.is_finished() && context.rounds_played < args.max_rounds {
        let human = context.human.state.clone();
        let opponent = context.opponent.state.clone();
        let action = autopilot.choose_action(&DecisionContext::new(&human, &opponent), context.rng_mut());

        let result = submit_round(context, action);
        if args.verbose {
            for line in &result.lines {
                eprintln!("  [{}] {:?}: {}", line.round, line.speaker, line.text);
            }
        }
        context = result.context;
    }

    let report = context.report().unwrap_or(BattleReport {
        difficulty: context.opponent.difficulty(),
        rounds: context.rounds_played,
        final_human_health: context.human.state.health,
        final_opponent_health: context.opponent.state.health,
        won: false,
        status: context.status,
    });

    Ok(BattleResult {
        seed,
        difficulty: report.difficulty,
        rounds: report.rounds,
        status: report.status,
        human_health: report.final_human_health,
        opponent_health: report.final_opponent_health,
        won: report.won,
        opponent_reads: context.opponent.commander.tracker.scores,
    })
}

fn print_text(results: &[BattleResult], totals: &Totals) {
    println!("Battle Results");
    println!("==============");
    for result in results {
        println!(
            "seed {:>20}  {:<6}  {:?} in {} rounds  (you {} / him {})",
            result.seed,
            result.difficulty,
            result.status,
            result.rounds,
            result.human_health,
            result.opponent_health
        );
    }
    println!();
    println!(
        "Won: {}  Lost: {}  Tied: {}  Unfinished: {}",
        totals.won, totals.lost, totals.tied, totals.unfinished
    );
}
