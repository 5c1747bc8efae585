//! LeBron Arena - Entry Point
//!
//! Interactive terminal duel. Reads one action per round from stdin,
//! prints the round's narrative and both fighters' resources, and prints
//! the final battle report as JSON.

use lebron_arena::battle::{create_battle, submit_round, BattleContext, NarrativeLine};
use lebron_arena::combat::{available_actions, CombatantState};
use lebron_arena::core::error::Result;
use lebron_arena::core::types::{Action, Difficulty, Speaker};

use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lebron_arena=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("\n=== LEBRON ARENA ===");
    println!("Step onto the court. He is watching how you play.");
    println!();

    let Some(difficulty) = prompt_difficulty(&mut input)? else {
        return Ok(());
    };

    let seed: u64 = rand::random();
    tracing::info!(%difficulty, seed, "battle starting");

    let mut context = create_battle(difficulty, seed);

    // Main battle loop
    while !context.is_finished() {
        display_status(&context);

        let Some(action) = prompt_action(&mut input, &context.human.state)? else {
            println!("You walk off the court.");
            return Ok(());
        };

        let result = submit_round(context, action);
        display_lines(&result.lines);
        context = result.context;
    }

    display_status(&context);
    if let Some(report) = context.report() {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_difficulty(input: &mut impl BufRead) -> Result<Option<Difficulty>> {
    loop {
        println!("Choose difficulty: easy / medium / hard (quit to exit)");
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line == "quit" || line == "q" {
            return Ok(None);
        }
        if line.is_empty() {
            return Ok(Some(Difficulty::default()));
        }
        match line.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(Some(difficulty)),
            Err(e) => println!("{}", e),
        }
    }
}

fn prompt_action(input: &mut impl BufRead, human: &CombatantState) -> Result<Option<Action>> {
    let options: Vec<&str> = available_actions(human).iter().map(|a| a.name()).collect();

    loop {
        println!("Your move: {} (quit to exit)", options.join(" / "));
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line == "quit" || line == "q" {
            return Ok(None);
        }
        match line.parse::<Action>() {
            Ok(action) => return Ok(Some(action)),
            Err(e) => println!("{}", e),
        }
    }
}

fn display_status(context: &BattleContext) {
    println!();
    println!("--- After round {} ---", context.rounds_played);
    display_fighter(&context.human.state);
    display_fighter(&context.opponent.state);
    println!();
}

fn display_fighter(state: &CombatantState) {
    println!(
        "  {:<14} HP {:>3}/{:<3}  Stamina {:>3}/{:<3}  Special {:>3}%",
        state.name, state.health, state.max_health, state.stamina, state.max_stamina, state.special
    );
}

fn display_lines(lines: &[NarrativeLine]) {
    for line in lines {
        let tag = match line.speaker {
            Speaker::Human => "you",
            Speaker::Opponent => "him",
            Speaker::System => "---",
        };
        println!("[{}] {}", tag, line.text);
    }
}
