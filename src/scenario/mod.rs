//! Scenario selection and execution
//!
//! A run is an immutable [`RunConfig`] (which scenarios, whether to clean
//! up) handed to the [`ScenarioRunner`]. The configuration is fixed before
//! any network call and never consulted interactively again.

pub mod ledger;
pub mod runner;

mod payments;
mod products;
mod purchase;
mod users;

pub use ledger::{EntityKind, Ledger};
pub use runner::ScenarioRunner;

use crate::commands::Args;

/// A named group of dependent steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Users,
    Products,
    Payments,
    Purchase,
}

impl Scenario {
    /// Every scenario, in the order `--all` runs them.
    pub const ALL: [Scenario; 4] = [
        Scenario::Users,
        Scenario::Products,
        Scenario::Payments,
        Scenario::Purchase,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Users => "USER MANAGEMENT",
            Scenario::Products => "PRODUCT MANAGEMENT",
            Scenario::Payments => "PAYMENT TRANSACTIONS",
            Scenario::Purchase => "CUSTOMER PURCHASE FLOW",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Users => "users",
            Scenario::Products => "products",
            Scenario::Payments => "payments",
            Scenario::Purchase => "purchase",
        }
    }
}

/// Immutable run selection, fixed before any network call.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scenarios: Vec<Scenario>,
    pub cleanup: bool,
}

impl RunConfig {
    /// Build from command-line flags. `--all` wins over individual
    /// selectors; `--no-cleanup` with no selector at all means every
    /// scenario with cleanup suppressed.
    pub fn from_args(args: &Args) -> Self {
        let mut scenarios = if args.all {
            Scenario::ALL.to_vec()
        } else {
            let mut scenarios = Vec::new();
            if args.users {
                scenarios.push(Scenario::Users);
            }
            if args.products {
                scenarios.push(Scenario::Products);
            }
            if args.payments {
                scenarios.push(Scenario::Payments);
            }
            if args.purchase {
                scenarios.push(Scenario::Purchase);
            }
            scenarios
        };
        if scenarios.is_empty() && args.no_cleanup {
            scenarios = Scenario::ALL.to_vec();
        }

        Self {
            scenarios,
            cleanup: !args.no_cleanup,
        }
    }
}
