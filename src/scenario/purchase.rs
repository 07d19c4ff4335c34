//! Customer purchase scenario
//!
//! Browses the catalog, then walks a fixed list of single- and multi-item
//! purchase attempts across the payment-method labels. Every attempt is
//! gated on a live stock check per targeted product; any zero-stock item
//! skips the whole attempt without issuing the purchase call.

use crate::api::types::{PaymentInfo, PaymentMethod, Product, PurchaseItem, PurchaseRequest};
use crate::api::VendingApi;

use super::runner::ScenarioRunner;

/// How many browsed products become purchase candidates.
const CANDIDATE_LIMIT: usize = 3;

pub(crate) async fn run<A: VendingApi>(run: &mut ScenarioRunner<'_, A>) {
    run.reporter.step(1, "Browsing available products");
    let Some(products) = run.observe("Get Products", run.api.list_products().await) else {
        run.reporter
            .warn("Could not browse products; aborting the purchase flow");
        return;
    };
    if products.is_empty() {
        run.reporter
            .warn("No products available; aborting the purchase flow");
        return;
    }
    describe_catalog(run, &products);

    let candidates: Vec<u64> = products
        .iter()
        .take(CANDIDATE_LIMIT)
        .map(|product| product.id)
        .collect();

    for (i, attempt) in planned_attempts(&candidates).iter().enumerate() {
        run.pace().await;
        run.reporter.step(i + 2, &attempt.describe());
        execute_attempt(run, attempt).await;
    }
}

/// One scripted purchase attempt.
#[derive(Debug, Clone, PartialEq)]
struct Attempt {
    items: Vec<PurchaseItem>,
    payment: PaymentMethod,
}

impl Attempt {
    fn describe(&self) -> String {
        if self.items.len() == 1 {
            format!("Single product purchase - {}", self.payment)
        } else {
            format!(
                "Multiple products purchase ({} items) - {}",
                self.items.len(),
                self.payment
            )
        }
    }
}

fn item(product_id: u64, quantity: u32) -> PurchaseItem {
    PurchaseItem {
        product_id,
        quantity,
    }
}

/// The fixed attempt sequence of the scripted customer flow, trimmed to
/// how many candidates the browse step actually produced.
fn planned_attempts(candidates: &[u64]) -> Vec<Attempt> {
    let mut attempts = Vec::new();
    let single = |id: u64, payment: PaymentMethod| Attempt {
        items: vec![item(id, 1)],
        payment,
    };

    if !candidates.is_empty() {
        attempts.push(single(candidates[0], PaymentMethod::Cash));
    }
    if candidates.len() >= 2 {
        attempts.push(single(candidates[1], PaymentMethod::CreditCard));
    }
    if !candidates.is_empty() {
        attempts.push(single(candidates[0], PaymentMethod::DebitCard));
    }
    if candidates.len() >= 2 {
        attempts.push(Attempt {
            items: vec![item(candidates[0], 1), item(candidates[1], 2)],
            payment: PaymentMethod::Cash,
        });
    }
    if candidates.len() >= 3 {
        attempts.push(Attempt {
            items: vec![
                item(candidates[0], 1),
                item(candidates[1], 1),
                item(candidates[2], 1),
            ],
            payment: PaymentMethod::CreditCard,
        });
    } else if candidates.len() >= 2 {
        attempts.push(Attempt {
            items: vec![item(candidates[0], 2), item(candidates[1], 1)],
            payment: PaymentMethod::CreditCard,
        });
    }
    if candidates.len() >= 2 {
        attempts.push(Attempt {
            items: vec![item(candidates[0], 1), item(candidates[1], 3)],
            payment: PaymentMethod::DebitCard,
        });
    }

    attempts
}

async fn execute_attempt<A: VendingApi>(run: &ScenarioRunner<'_, A>, attempt: &Attempt) {
    // Stock may have changed since browsing; check live, per targeted
    // product, on every attempt.
    for item in &attempt.items {
        if !check_availability(run, item.product_id).await {
            run.reporter.warn(&format!(
                "Product {} is not available; skipping this purchase",
                item.product_id
            ));
            return;
        }
    }

    run.reporter
        .note(&format!("Purchasing with {}:", attempt.payment));
    for item in &attempt.items {
        run.reporter.note(&format!(
            "  - Product {}: {} unit(s)",
            item.product_id, item.quantity
        ));
    }

    let request = PurchaseRequest {
        items: attempt.items.clone(),
        payment_info: PaymentInfo {
            payment_method: attempt.payment,
        },
    };
    if let Some(transaction) = run.observe("Purchase Request", run.api.purchase(&request).await) {
        run.reporter.success(&format!(
            "Purchase successful: transaction {} for ${:.2} ({})",
            transaction.id, transaction.total_amount, transaction.status
        ));
    }
}

async fn check_availability<A: VendingApi>(run: &ScenarioRunner<'_, A>, product_id: u64) -> bool {
    match run.observe(
        &format!("Check Availability {product_id}"),
        run.api.availability(product_id).await,
    ) {
        Some(stock) => stock.quantity > 0,
        None => false,
    }
}

fn describe_catalog<A: VendingApi>(run: &ScenarioRunner<'_, A>, products: &[Product]) {
    run.reporter
        .note(&format!("Found {} products available", products.len()));
    for (i, product) in products.iter().enumerate() {
        run.reporter.note(&format!(
            "  {}. {} - ${:.2} (id {})",
            i + 1,
            product.name,
            product.price,
            product.id
        ));
    }
}
