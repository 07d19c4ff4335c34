//! End-to-end scenario tests against a recording in-memory service.
//!
//! The fake implements the full API trait, hands out server-style ids,
//! and records every call in order, so these tests can assert on the
//! exact request sequence a run produces.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use vendflow::api::types::{
    CreateUserRequest, LoginData, Product, ProductRequest, PurchaseRequest, StockInfo,
    StockUpdateRequest, Transaction, TransactionItem, UpdateUserRequest, User,
};
use vendflow::api::{Outcome, Session, VendingApi};
use vendflow::common::Result;
use vendflow::report::Reporter;
use vendflow::scenario::{EntityKind, RunConfig, Scenario, ScenarioRunner};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Probe,
    Login(String),
    CreateUser(String),
    ListUsers,
    GetUser(u64),
    UpdateUser(u64),
    DeleteUser(u64),
    ListProducts,
    GetProduct(u64),
    Availability(u64),
    CreateProduct(String),
    UpdateProduct(u64),
    DeleteProduct(u64),
    UpdateStock(u64),
    Purchase(Vec<(u64, u32)>),
    ListTransactions,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<Call>,
    users: Vec<User>,
    products: Vec<Product>,
    transactions: Vec<Transaction>,
    next_id: u64,
    fail_login: bool,
    duplicate_username: bool,
    login_reveals_id: Option<u64>,
}

struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 100,
                ..FakeState::default()
            }),
        }
    }

    fn with_products(stock: &[(u64, i64)]) -> Self {
        let api = Self::new();
        {
            let mut state = api.state.lock().unwrap();
            for &(id, quantity) in stock {
                state.products.push(Product {
                    id,
                    name: format!("Seed {id}"),
                    price: 2.5,
                    description: None,
                    quantity: Some(quantity),
                });
            }
        }
        api
    }

    fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn success<T>(status: u16, body: T) -> Result<Outcome<T>> {
        Ok(Outcome::Success { status, body })
    }

    fn failure<T>(status: u16, message: &str) -> Result<Outcome<T>> {
        Ok(Outcome::Failure {
            status,
            message: message.to_string(),
        })
    }
}

#[async_trait]
impl VendingApi for FakeApi {
    async fn probe(&self) -> Result<u16> {
        self.lock().calls.push(Call::Probe);
        Ok(200)
    }

    async fn login(&self, username: &str, _password: &str) -> Result<Outcome<LoginData>> {
        let mut state = self.lock();
        state.calls.push(Call::Login(username.to_string()));
        if state.fail_login {
            return Self::failure(401, "Invalid credentials");
        }
        let id = state.login_reveals_id;
        Self::success(
            200,
            LoginData {
                token: "fake-token".to_string(),
                username: Some(username.to_string()),
                role: Some("ADMIN".to_string()),
                id,
                expires_in: Some(3600),
            },
        )
    }

    async fn create_user(
        &self,
        _session: &Session,
        request: &CreateUserRequest,
    ) -> Result<Outcome<User>> {
        let mut state = self.lock();
        state.calls.push(Call::CreateUser(request.username.clone()));
        if state.duplicate_username {
            return Self::failure(409, "Username already exists");
        }
        let id = state.next_id;
        state.next_id += 1;
        let user = User {
            id,
            username: request.username.clone(),
            role: request.role.clone(),
        };
        state.users.push(user.clone());
        Self::success(201, user)
    }

    async fn list_users(&self, _session: &Session) -> Result<Outcome<Vec<User>>> {
        let mut state = self.lock();
        state.calls.push(Call::ListUsers);
        Self::success(200, state.users.clone())
    }

    async fn get_user(&self, _session: &Session, id: u64) -> Result<Outcome<User>> {
        let mut state = self.lock();
        state.calls.push(Call::GetUser(id));
        match state.users.iter().find(|user| user.id == id) {
            Some(user) => Self::success(200, user.clone()),
            None => Self::failure(404, "User not found"),
        }
    }

    async fn update_user(
        &self,
        _session: &Session,
        id: u64,
        request: &UpdateUserRequest,
    ) -> Result<Outcome<User>> {
        let mut state = self.lock();
        state.calls.push(Call::UpdateUser(id));
        match state.users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.username = request.username.clone();
                user.role = request.role.clone();
                let user = user.clone();
                Self::success(200, user)
            }
            None => Self::failure(404, "User not found"),
        }
    }

    async fn delete_user(&self, _session: &Session, id: u64) -> Result<Outcome<Value>> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteUser(id));
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        if state.users.len() < before {
            Self::success(200, Value::Null)
        } else {
            Self::failure(404, "User not found")
        }
    }

    async fn list_products(&self) -> Result<Outcome<Vec<Product>>> {
        let mut state = self.lock();
        state.calls.push(Call::ListProducts);
        Self::success(200, state.products.clone())
    }

    async fn get_product(&self, id: u64) -> Result<Outcome<Product>> {
        let mut state = self.lock();
        state.calls.push(Call::GetProduct(id));
        match state.products.iter().find(|product| product.id == id) {
            Some(product) => Self::success(200, product.clone()),
            None => Self::failure(404, "Product not found"),
        }
    }

    async fn availability(&self, id: u64) -> Result<Outcome<StockInfo>> {
        let mut state = self.lock();
        state.calls.push(Call::Availability(id));
        match state.products.iter().find(|product| product.id == id) {
            Some(product) => Self::success(
                200,
                StockInfo {
                    quantity: product.quantity.unwrap_or(0),
                    min_threshold: None,
                },
            ),
            None => Self::failure(404, "Product not found"),
        }
    }

    async fn create_product(
        &self,
        _session: &Session,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>> {
        let mut state = self.lock();
        state.calls.push(Call::CreateProduct(request.name.clone()));
        let id = state.next_id;
        state.next_id += 1;
        let product = Product {
            id,
            name: request.name.clone(),
            price: request.price,
            description: Some(request.description.clone()),
            quantity: Some(request.quantity),
        };
        state.products.push(product.clone());
        Self::success(201, product)
    }

    async fn update_product(
        &self,
        _session: &Session,
        id: u64,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>> {
        let mut state = self.lock();
        state.calls.push(Call::UpdateProduct(id));
        match state.products.iter_mut().find(|product| product.id == id) {
            Some(product) => {
                product.name = request.name.clone();
                product.price = request.price;
                product.quantity = Some(request.quantity);
                let product = product.clone();
                Self::success(200, product)
            }
            None => Self::failure(404, "Product not found"),
        }
    }

    async fn delete_product(&self, _session: &Session, id: u64) -> Result<Outcome<Value>> {
        let mut state = self.lock();
        state.calls.push(Call::DeleteProduct(id));
        let before = state.products.len();
        state.products.retain(|product| product.id != id);
        if state.products.len() < before {
            Self::success(200, Value::Null)
        } else {
            Self::failure(404, "Product not found")
        }
    }

    async fn update_stock(
        &self,
        _session: &Session,
        id: u64,
        request: &StockUpdateRequest,
    ) -> Result<Outcome<StockInfo>> {
        let mut state = self.lock();
        state.calls.push(Call::UpdateStock(id));
        match state.products.iter_mut().find(|product| product.id == id) {
            Some(product) => {
                product.quantity = Some(request.quantity);
                Self::success(
                    200,
                    StockInfo {
                        quantity: request.quantity,
                        min_threshold: Some(request.min_threshold),
                    },
                )
            }
            None => Self::failure(404, "Product not found"),
        }
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<Outcome<Transaction>> {
        let mut state = self.lock();
        state.calls.push(Call::Purchase(
            request
                .items
                .iter()
                .map(|item| (item.product_id, item.quantity))
                .collect(),
        ));

        let mut total = 0.0;
        for item in &request.items {
            let Some(product) = state
                .products
                .iter()
                .find(|product| product.id == item.product_id)
            else {
                return Self::failure(404, "Product not found");
            };
            if product.quantity.unwrap_or(0) < item.quantity as i64 {
                return Self::failure(400, "Insufficient stock");
            }
            total += product.price * item.quantity as f64;
        }
        for item in &request.items {
            if let Some(product) = state
                .products
                .iter_mut()
                .find(|product| product.id == item.product_id)
            {
                product.quantity = product.quantity.map(|q| q - item.quantity as i64);
            }
        }

        let id = state.next_id;
        state.next_id += 1;
        let transaction = Transaction {
            id,
            total_amount: total,
            status: "COMPLETED".to_string(),
            items: request
                .items
                .iter()
                .map(|item| TransactionItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: None,
                })
                .collect(),
        };
        state.transactions.push(transaction.clone());
        Self::success(200, transaction)
    }

    async fn list_transactions(&self, _session: &Session) -> Result<Outcome<Vec<Transaction>>> {
        let mut state = self.lock();
        state.calls.push(Call::ListTransactions);
        Self::success(200, state.transactions.clone())
    }
}

fn run_config(scenarios: Vec<Scenario>, cleanup: bool) -> RunConfig {
    RunConfig { scenarios, cleanup }
}

async fn drive(api: &FakeApi, config: &RunConfig) -> vendflow::common::Result<()> {
    let reporter = Reporter::new(false);
    vendflow::cli::execute(api, &reporter, config, "admin", "admin123", Duration::ZERO).await
}

#[tokio::test]
async fn failed_login_gates_the_whole_run() {
    let api = FakeApi::new();
    api.lock().fail_login = true;

    let config = run_config(Scenario::ALL.to_vec(), true);
    let result = drive(&api, &config).await;

    assert!(result.is_err());
    assert_eq!(api.calls(), vec![Call::Login("admin".to_string())]);
}

#[tokio::test]
async fn no_cleanup_run_issues_zero_deletes() {
    let api = FakeApi::new();
    let config = run_config(vec![Scenario::Users, Scenario::Products], false);
    drive(&api, &config).await.unwrap();

    for call in api.calls() {
        assert!(
            !matches!(call, Call::DeleteUser(_) | Call::DeleteProduct(_)),
            "cleanup-disabled run issued a delete: {call:?}"
        );
    }
    // Everything created is retained server-side.
    let state = api.lock();
    assert_eq!(state.users.len(), 1);
    assert_eq!(state.products.len(), 11);
}

#[tokio::test]
async fn product_batch_runs_end_to_end_with_cleanup() {
    let api = FakeApi::new();
    let config = run_config(vec![Scenario::Products], true);
    drive(&api, &config).await.unwrap();

    let calls = api.calls();
    let created: Vec<String> = calls
        .iter()
        .filter_map(|call| match call {
            Call::CreateProduct(name) => Some(name.clone()),
            _ => None,
        })
        .collect();
    let expected: Vec<String> = (1..=11).map(|i| format!("Product {i}")).collect();
    assert_eq!(created, expected);

    // The first captured id gets the update, the second the delete probe,
    // and each verification fetch follows its mutation.
    let update_pos = calls
        .iter()
        .position(|call| *call == Call::UpdateProduct(100))
        .unwrap();
    let refetch_pos = calls
        .iter()
        .position(|call| *call == Call::GetProduct(100))
        .unwrap();
    assert!(update_pos < refetch_pos);
    assert!(calls.contains(&Call::UpdateStock(100)));
    let delete_pos = calls
        .iter()
        .position(|call| *call == Call::DeleteProduct(101))
        .unwrap();
    let verify_pos = calls
        .iter()
        .position(|call| *call == Call::GetProduct(101))
        .unwrap();
    assert!(delete_pos < verify_pos);

    // Cleanup removed everything the run created.
    assert!(api.lock().products.is_empty());
}

#[tokio::test]
async fn ledger_releases_ids_only_after_successful_deletes() {
    let api = FakeApi::new();
    let config = run_config(vec![Scenario::Products], false);

    let reporter = Reporter::new(false);
    let session = Session::authenticated("fake-token").unwrap();
    let mut runner = ScenarioRunner::new(&api, &session, &reporter, &config, Duration::ZERO);
    runner.run().await;

    // No deletes ran, so every captured id is still held, in capture order.
    let ids = runner.ledger().ids(EntityKind::Product).to_vec();
    assert_eq!(ids, (100..111).collect::<Vec<u64>>());
}

#[tokio::test]
async fn duplicate_username_recovers_id_via_login_before_any_listing() {
    let api = FakeApi::new();
    {
        let mut state = api.lock();
        state.duplicate_username = true;
        state.login_reveals_id = Some(42);
        state.users.push(User {
            id: 42,
            username: "occupied".to_string(),
            role: "USER".to_string(),
        });
    }

    let config = run_config(vec![Scenario::Users], false);
    let reporter = Reporter::new(false);
    let session = Session::authenticated("fake-token").unwrap();
    let mut runner = ScenarioRunner::new(&api, &session, &reporter, &config, Duration::ZERO);
    runner.run().await;

    assert_eq!(runner.ledger().ids(EntityKind::User), &[42]);

    let calls = api.calls();
    let create_pos = calls
        .iter()
        .position(|call| matches!(call, Call::CreateUser(_)))
        .unwrap();
    let login_pos = calls
        .iter()
        .position(|call| matches!(call, Call::Login(name) if name.starts_with("testuser_")))
        .expect("recovery login never happened");
    let first_listing = calls
        .iter()
        .position(|call| *call == Call::ListUsers)
        .unwrap();
    assert!(create_pos < login_pos);
    assert!(login_pos < first_listing);
}

#[tokio::test]
async fn zero_stock_blocks_every_purchase() {
    let api = FakeApi::with_products(&[(1, 0), (2, 0), (3, 0)]);
    let config = run_config(vec![Scenario::Purchase], true);
    drive(&api, &config).await.unwrap();

    let calls = api.calls();
    assert!(
        !calls.iter().any(|call| matches!(call, Call::Purchase(_))),
        "purchase issued against zero-stock products"
    );
    // Availability was still probed before each skipped attempt.
    assert!(calls.iter().any(|call| matches!(call, Call::Availability(_))));
}

#[tokio::test]
async fn stocked_candidates_get_the_full_attempt_sequence() {
    let api = FakeApi::with_products(&[(1, 50), (2, 50), (3, 50), (4, 50)]);
    let config = run_config(vec![Scenario::Purchase], true);
    drive(&api, &config).await.unwrap();

    let purchases: Vec<Vec<(u64, u32)>> = api
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Purchase(items) => Some(items),
            _ => None,
        })
        .collect();

    assert_eq!(purchases.len(), 6);
    // Candidates come from the first three browsed products only.
    for items in &purchases {
        for (id, _) in items {
            assert!(*id <= 3, "purchase targeted a non-candidate product {id}");
        }
    }
    assert_eq!(purchases[0], vec![(1, 1)]);
    assert_eq!(purchases[3], vec![(1, 1), (2, 2)]);
    assert_eq!(purchases[4], vec![(1, 1), (2, 1), (3, 1)]);
}

#[tokio::test]
async fn payments_scenario_is_a_single_read() {
    let api = FakeApi::new();
    let config = run_config(vec![Scenario::Payments], true);
    drive(&api, &config).await.unwrap();

    let calls = api.calls();
    assert_eq!(
        calls,
        vec![
            Call::Login("admin".to_string()),
            Call::ListTransactions
        ]
    );
}

#[tokio::test]
async fn mixed_run_keeps_configuration_order() {
    let api = FakeApi::with_products(&[(1, 10)]);
    let config = run_config(vec![Scenario::Payments, Scenario::Users], true);
    drive(&api, &config).await.unwrap();

    let calls = api.calls();
    let transactions_pos = calls
        .iter()
        .position(|call| *call == Call::ListTransactions)
        .unwrap();
    let create_user_pos = calls
        .iter()
        .position(|call| matches!(call, Call::CreateUser(_)))
        .unwrap();
    assert!(transactions_pos < create_user_pos);
}
