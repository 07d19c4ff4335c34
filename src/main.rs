//! Vendflow CLI - scripted workflows against a vending-machine service
//!
//! Parses the command line, initializes logging, and hands off to the
//! run dispatcher. Exits non-zero only when a startup gate (connectivity
//! or login) fails.

use clap::Parser;
use vendflow::{cli, commands::Args, common::logging};

#[tokio::main]
async fn main() {
    logging::init_cli();

    let args = Args::parse();

    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
