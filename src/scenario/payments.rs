//! Payment-transaction listing scenario: one authenticated read, no state
//! threading.

use crate::api::VendingApi;

use super::runner::ScenarioRunner;

pub(crate) async fn run<A: VendingApi>(run: &mut ScenarioRunner<'_, A>) {
    run.reporter.step(1, "Fetching all payment transactions");
    if let Some(transactions) = run.observe(
        "Get Payment Transactions",
        run.api.list_transactions(run.session).await,
    ) {
        run.reporter
            .note(&format!("{} transactions on record", transactions.len()));
    }
}
