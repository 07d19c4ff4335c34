//! CLI argument definitions
//!
//! Any selection or cleanup flag puts the tool in non-interactive mode;
//! with none present an interactive menu builds the run configuration.

use clap::Parser;

/// Scripted workflow driver for a vending-machine service's HTTP API
#[derive(Parser, Debug, Default)]
#[command(name = "vendflow", version, about)]
pub struct Args {
    /// Run every scenario without prompting
    #[arg(long)]
    pub all: bool,

    /// Run the user-management scenario
    #[arg(long)]
    pub users: bool,

    /// Run the product-management scenario
    #[arg(long)]
    pub products: bool,

    /// Run the payment-transaction listing scenario
    #[arg(long)]
    pub payments: bool,

    /// Run the customer purchase scenario
    #[arg(long)]
    pub purchase: bool,

    /// Keep resources created during the run (skip end-of-run deletion).
    /// On its own this runs every scenario.
    #[arg(long)]
    pub no_cleanup: bool,

    /// Base URL of the vending-machine API gateway
    #[arg(long)]
    pub base_url: Option<String>,

    /// Pause between scenarios and purchase attempts, in milliseconds
    #[arg(long)]
    pub pace_ms: Option<u64>,

    /// Pretty-print response bodies
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Whether the flags alone determine the run configuration.
    pub fn non_interactive(&self) -> bool {
        self.all
            || self.users
            || self.products
            || self.payments
            || self.purchase
            || self.no_cleanup
    }
}
