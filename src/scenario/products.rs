//! Product-management scenario
//!
//! Creates a batch of products, snapshots the catalog around each
//! mutation, exercises update/delete against the first two captured ids,
//! and finally deletes everything it created when cleanup is enabled.
//! Every creation is independent: one failure never blocks the rest of
//! the batch.

use crate::api::types::{ProductRequest, StockUpdateRequest};
use crate::api::VendingApi;

use super::ledger::EntityKind;
use super::runner::ScenarioRunner;

/// Size of the creation batch.
const BATCH_SIZE: usize = 11;

/// Deterministic request for the `index`-th batch product (1-based).
fn batch_item(index: usize) -> ProductRequest {
    ProductRequest {
        name: format!("Product {index}"),
        price: 1.0 + (index as f64 - 1.0) * 0.5,
        description: format!("Description for product {index}"),
        quantity: 9 + index as i64,
    }
}

pub(crate) async fn run<A: VendingApi>(run: &mut ScenarioRunner<'_, A>) {
    run.reporter.step(1, "Fetching all products (initial state)");
    run.observe("Get All Products", run.api.list_products().await);

    run.reporter
        .step(2, &format!("Creating {BATCH_SIZE} new products"));
    for index in 1..=BATCH_SIZE {
        let request = batch_item(index);
        let created = run.observe(
            &format!("Create {}", request.name),
            run.api.create_product(run.session, &request).await,
        );
        if let Some(product) = created {
            run.ledger.record(EntityKind::Product, product.id);
        }
    }
    run.reporter.note(&format!(
        "Created {} products",
        run.ledger.ids(EntityKind::Product).len()
    ));

    run.reporter.step(3, "Fetching all products (after additions)");
    run.observe("Get All Products", run.api.list_products().await);

    if let Some(first) = run.ledger.get(EntityKind::Product, 0) {
        run.reporter.step(4, &format!("Modifying product {first}"));
        let update = ProductRequest {
            name: "Modified Product".to_string(),
            price: 9.99,
            description: "This product has been updated".to_string(),
            quantity: 50,
        };
        run.observe(
            &format!("Update Product {first}"),
            run.api.update_product(run.session, first, &update).await,
        );

        let stock = StockUpdateRequest {
            quantity: 50,
            min_threshold: 5,
        };
        run.observe(
            &format!("Update Stock {first}"),
            run.api.update_stock(run.session, first, &stock).await,
        );

        run.reporter
            .step(5, &format!("Verifying modification for product {first}"));
        run.observe(
            &format!("Get Product by ID {first}"),
            run.api.get_product(first).await,
        );
    }

    // A no-cleanup run must issue zero deletes, so the delete-and-verify
    // probe shares the cleanup gate.
    if run.cleanup() {
        if let Some(second) = run.ledger.get(EntityKind::Product, 1) {
            run.reporter.step(6, &format!("Deleting product {second}"));
            let deleted = run.observe(
                &format!("Delete Product {second}"),
                run.api.delete_product(run.session, second).await,
            );
            if deleted.is_some() {
                run.ledger.remove(EntityKind::Product, second);
            }

            run.reporter
                .step(7, &format!("Verifying deletion of product {second}"));
            run.observe(
                &format!("Get Deleted Product by ID {second}"),
                run.api.get_product(second).await,
            );
        }
    } else {
        run.reporter.step(6, "Delete-and-verify probe");
        run.reporter
            .note("Cleanup disabled: skipping the delete probe");
    }

    run.reporter.step(8, "Fetching all products (after changes)");
    run.observe("Get All Products", run.api.list_products().await);

    run.reporter.step(9, "Cleaning up created products");
    if run.cleanup() {
        let remaining: Vec<u64> = run.ledger.ids(EntityKind::Product).to_vec();
        if remaining.is_empty() {
            run.reporter.note("No products to clean up");
        }
        for id in remaining {
            let deleted = run.observe(
                &format!("Cleanup: Delete Product {id}"),
                run.api.delete_product(run.session, id).await,
            );
            if deleted.is_some() {
                run.ledger.remove(EntityKind::Product, id);
            }
        }
    } else {
        run.reporter.note(&format!(
            "Cleanup disabled: retaining products {:?}",
            run.ledger.ids(EntityKind::Product)
        ));
    }
}
