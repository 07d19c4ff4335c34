//! Scenario runner
//!
//! Executes the selected scenarios in configuration order with cooperative
//! pacing in between. Step failures stay local: they are narrated and the
//! run continues with whatever ledger state exists; nothing crosses a
//! scenario boundary.

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::api::{Outcome, Session, VendingApi};
use crate::common::Result;
use crate::report::Reporter;

use super::ledger::Ledger;
use super::{payments, products, purchase, users, RunConfig, Scenario};

pub struct ScenarioRunner<'a, A: VendingApi> {
    pub(crate) api: &'a A,
    pub(crate) session: &'a Session,
    pub(crate) reporter: &'a Reporter,
    pub(crate) ledger: Ledger,
    config: &'a RunConfig,
    pace: Duration,
}

impl<'a, A: VendingApi> ScenarioRunner<'a, A> {
    pub fn new(
        api: &'a A,
        session: &'a Session,
        reporter: &'a Reporter,
        config: &'a RunConfig,
        pace: Duration,
    ) -> Self {
        Self {
            api,
            session,
            reporter,
            ledger: Ledger::new(),
            config,
            pace,
        }
    }

    pub fn cleanup(&self) -> bool {
        self.config.cleanup
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run every selected scenario in configuration order.
    pub async fn run(&mut self) {
        for (i, scenario) in self.config.scenarios.clone().into_iter().enumerate() {
            if i > 0 {
                self.pace().await;
            }

            self.reporter.section(scenario.title());
            match scenario {
                Scenario::Users => users::run(self).await,
                Scenario::Products => products::run(self).await,
                Scenario::Payments => payments::run(self).await,
                Scenario::Purchase => purchase::run(self).await,
            }
        }
    }

    /// Cooperative pause between scenarios and purchase attempts; keeps
    /// the narration readable against a live system and is not required
    /// for correctness.
    pub(crate) async fn pace(&self) {
        if !self.pace.is_zero() {
            sleep(self.pace).await;
        }
    }

    /// Narrate one call and collapse it to its success body, if any.
    /// Failures and transport errors are reported here and yield `None`;
    /// the caller moves on.
    pub(crate) fn observe<T: Serialize>(
        &self,
        action: &str,
        result: Result<Outcome<T>>,
    ) -> Option<T> {
        self.reporter.observe(action, &result);
        match result {
            Ok(outcome) => outcome.into_success(),
            Err(_) => None,
        }
    }
}
