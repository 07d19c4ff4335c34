//! CLI run handling
//!
//! Builds the run configuration (from flags or the interactive menu),
//! passes the startup gates (connectivity probe, login), and hands off to
//! the scenario runner. Once a run starts there are no further
//! interactive reads; it proceeds to completion or to a fatal gate
//! failure.

pub mod interactive;

use std::time::Duration;

use colored::Colorize;

use crate::api::{HttpApi, Outcome, Session, VendingApi};
use crate::commands::Args;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::report::Reporter;
use crate::scenario::{RunConfig, ScenarioRunner};

/// Entry point after argument parsing.
pub async fn run(args: Args) -> Result<()> {
    let settings = Config::load()?;

    let run_config = if args.non_interactive() {
        RunConfig::from_args(&args)
    } else {
        match interactive::prompt_run_config()? {
            Some(config) => config,
            None => {
                println!("Aborted.");
                return Ok(());
            }
        }
    };

    let base_url = args
        .base_url
        .unwrap_or_else(|| settings.service.base_url.clone());
    let pace = Duration::from_millis(args.pace_ms.unwrap_or(settings.pacing.between_steps_ms));
    let api = HttpApi::new(
        &base_url,
        Duration::from_secs(settings.service.probe_timeout_secs),
    )?;
    let reporter = Reporter::new(args.verbose);

    banner(&base_url, &settings.credentials.username, &run_config);

    // Startup gate 1: connectivity. Any response counts as reachable.
    let status = api.probe().await?;
    println!("{} Service is reachable (status {})", "✓".green(), status);

    execute(
        &api,
        &reporter,
        &run_config,
        &settings.credentials.username,
        &settings.credentials.password,
        pace,
    )
    .await?;

    reporter.section("RUN COMPLETED");
    println!("\nAll selected scenarios have been executed.");
    println!("Review the narration above for any failures.\n");
    Ok(())
}

/// Login gate plus scenario execution. Split from [`run`] so tests can
/// drive it against a fake API.
pub async fn execute<A: VendingApi>(
    api: &A,
    reporter: &Reporter,
    config: &RunConfig,
    username: &str,
    password: &str,
    pace: Duration,
) -> Result<()> {
    reporter.section("LOGIN");
    let session = login(api, reporter, username, password).await?;

    let mut runner = ScenarioRunner::new(api, &session, reporter, config, pace);
    runner.run().await;
    Ok(())
}

/// Startup gate 2: authentication. Any failure here is fatal to the run;
/// no domain call is issued afterwards.
async fn login<A: VendingApi>(
    api: &A,
    reporter: &Reporter,
    username: &str,
    password: &str,
) -> Result<Session> {
    let result = api.login(username, password).await;
    reporter.observe("Login Attempt", &result);

    match result? {
        Outcome::Success { body, .. } => {
            let session = Session::authenticated(&body.token)?;
            reporter.success("Login successful, token acquired");
            Ok(session)
        }
        Outcome::Failure { status, message } => Err(Error::login_failed(status, message)),
    }
}

fn banner(base_url: &str, username: &str, config: &RunConfig) {
    let scenarios: Vec<&str> = config
        .scenarios
        .iter()
        .map(|scenario| scenario.label())
        .collect();

    println!("\n{}", "█".repeat(60).blue());
    println!("  {}", "VENDING MACHINE WORKFLOW DRIVER".white().bold());
    println!("{}", "█".repeat(60).blue());
    println!("\nTarget URL: {base_url}");
    println!("Admin user: {username}");
    println!(
        "Scenarios: {} (cleanup: {})\n",
        scenarios.join(", "),
        if config.cleanup { "yes" } else { "no" }
    );
}
