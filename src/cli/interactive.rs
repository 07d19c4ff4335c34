//! Interactive scenario selection menu.
//!
//! Used only when no selection or cleanup flag was given on the command
//! line. All prompting happens before any network call; quitting here
//! exits cleanly without touching the service.

use std::io::{self, BufRead, Write};

use crate::common::Result;
use crate::scenario::{RunConfig, Scenario};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Scenarios(Vec<Scenario>),
}

/// Prompts for a scenario selection and cleanup preference. Returns
/// `None` if the operator chose to quit.
pub fn prompt_run_config() -> Result<Option<RunConfig>> {
    println!("\nAvailable scenarios:");
    println!("  1) User Management");
    println!("  2) Product Management");
    println!("  3) Payment Processing");
    println!("  4) Customer Purchase");
    println!("  a) All scenarios");
    println!("  q) Quit");

    let scenarios = loop {
        let line = read_line("Select scenarios (e.g. 1,3 or a): ")?;
        match parse_selection(&line) {
            Some(Selection::Quit) => return Ok(None),
            Some(Selection::Scenarios(scenarios)) => break scenarios,
            None => println!("Unrecognized selection, try again."),
        }
    };

    let cleanup = loop {
        let line = read_line("Delete created test data afterwards? [Y/n]: ")?;
        match parse_yes_no(&line, true) {
            Some(answer) => break answer,
            None => println!("Please answer y or n."),
        }
    };

    Ok(Some(RunConfig { scenarios, cleanup }))
}

/// Parses a menu selection. Tokens split on commas or whitespace;
/// duplicates collapse to the first occurrence. Returns `None` on any
/// unrecognized token or an empty line.
pub fn parse_selection(input: &str) -> Option<Selection> {
    let tokens: Vec<&str> = input
        .split([',', ' '])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut scenarios = Vec::new();
    for token in tokens {
        let picked = match token.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Some(Selection::Quit),
            "a" | "all" => {
                return Some(Selection::Scenarios(Scenario::ALL.to_vec()));
            }
            "1" => Scenario::Users,
            "2" => Scenario::Products,
            "3" => Scenario::Payments,
            "4" => Scenario::Purchase,
            _ => return None,
        };
        if !scenarios.contains(&picked) {
            scenarios.push(picked);
        }
    }
    Some(Selection::Scenarios(scenarios))
}

/// Parses a yes/no answer; an empty line takes the default.
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
