//! User-management scenario
//!
//! Creates a user, resolves its server-issued id through an ordered list
//! of recovery tiers, updates and re-fetches it, and deletes it only when
//! cleanup is enabled.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::types::{CreateUserRequest, UpdateUserRequest};
use crate::api::{Outcome, VendingApi};
use crate::common::Result;

use super::ledger::EntityKind;
use super::runner::ScenarioRunner;

const PASSWORD: &str = "testpass123";
const ROLE: &str = "USER";

/// Ordered id-recovery strategies, tried until one yields an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecoveryTier {
    /// Read the id from the creation response itself.
    Creation,
    /// On a duplicate-username failure, log in as that user and read the
    /// id from the login payload.
    Login,
    /// Fetch the full user listing and scan for the username.
    ListScan,
}

const RECOVERY_ORDER: [RecoveryTier; 3] = [
    RecoveryTier::Creation,
    RecoveryTier::Login,
    RecoveryTier::ListScan,
];

pub(crate) async fn run<A: VendingApi>(run: &mut ScenarioRunner<'_, A>) {
    let username = format!("testuser_{}", unix_timestamp());

    run.reporter.step(1, "Creating new user");
    let request = CreateUserRequest {
        username: username.clone(),
        password: PASSWORD.to_string(),
        role: ROLE.to_string(),
    };
    let creation = run.api.create_user(run.session, &request).await;
    run.reporter.observe("Create User", &creation);

    let duplicate = is_duplicate_signal(&creation);

    let mut user_id = None;
    for tier in RECOVERY_ORDER {
        user_id = match tier {
            RecoveryTier::Creation => creation
                .as_ref()
                .ok()
                .and_then(|outcome| outcome.as_success())
                .map(|user| user.id),
            RecoveryTier::Login if duplicate => login_recovery(run, &username).await,
            RecoveryTier::Login => None,
            RecoveryTier::ListScan => listing_scan(run, &username).await,
        };
        if user_id.is_some() {
            break;
        }
    }

    let Some(user_id) = user_id else {
        run.reporter
            .warn("Could not resolve an id for the user; skipping update and delete");
        return;
    };
    run.reporter
        .success(&format!("User id resolved: {user_id}"));
    run.ledger.record(EntityKind::User, user_id);

    run.reporter.step(2, "Fetching all users");
    run.observe("Get All Users", run.api.list_users(run.session).await);

    run.reporter.step(3, &format!("Updating user {user_id}"));
    let update = UpdateUserRequest {
        username: format!("updated_user_{}", unix_timestamp()),
        role: ROLE.to_string(),
    };
    run.observe(
        "Update User",
        run.api.update_user(run.session, user_id, &update).await,
    );

    run.reporter.step(4, &format!("Fetching user {user_id}"));
    run.observe("Get User by ID", run.api.get_user(run.session, user_id).await);

    run.reporter.step(5, &format!("Deleting user {user_id}"));
    if run.cleanup() {
        let deleted = run.observe("Delete User", run.api.delete_user(run.session, user_id).await);
        if deleted.is_some() {
            run.ledger.remove(EntityKind::User, user_id);
        }
    } else {
        run.reporter.note(&format!(
            "Cleanup disabled: user {user_id} intentionally retained"
        ));
    }
}

/// Second recovery tier: the username is already taken, so logging in as
/// that user may reveal its id.
async fn login_recovery<A: VendingApi>(
    run: &ScenarioRunner<'_, A>,
    username: &str,
) -> Option<u64> {
    run.reporter
        .note("Username already exists; attempting login to recover the id");
    let login = run.observe("Recovery Login", run.api.login(username, PASSWORD).await)?;
    login.id
}

/// Third recovery tier: scan the full user listing for the username.
async fn listing_scan<A: VendingApi>(run: &ScenarioRunner<'_, A>, username: &str) -> Option<u64> {
    run.reporter.note("Scanning the user listing for the username");
    let users = run.observe("Get All Users", run.api.list_users(run.session).await)?;
    users
        .into_iter()
        .find(|user| user.username == username)
        .map(|user| user.id)
}

/// Whether a creation outcome is the service's duplicate-username signal.
fn is_duplicate_signal<T>(result: &Result<Outcome<T>>) -> bool {
    match result {
        Ok(Outcome::Failure { status, message }) => {
            let lower = message.to_lowercase();
            *status == 409 || lower.contains("already exists") || lower.contains("duplicate")
        }
        _ => false,
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
