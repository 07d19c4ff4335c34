//! HTTP API surface of the vending-machine service
//!
//! One trait method per endpoint. Every response is decoded exactly once,
//! at this boundary, into a tagged [`Outcome`]; nothing downstream inspects
//! raw bodies. Scenarios run against the trait so tests can substitute an
//! in-memory fake for the reqwest client.

pub mod client;
pub mod session;
pub mod types;

pub use client::HttpApi;
pub use session::Session;

use async_trait::async_trait;
use serde_json::Value;

use crate::common::Result;
use types::{
    CreateUserRequest, LoginData, Product, ProductRequest, PurchaseRequest, StockInfo,
    StockUpdateRequest, Transaction, UpdateUserRequest, User,
};

/// Result of one endpoint call, decoded at the HTTP boundary.
///
/// Transport and decoding problems are crate [`crate::Error`]s instead;
/// a `Failure` always carries a status the server actually returned.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success { status: u16, body: T },
    Failure { status: u16, message: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Outcome::Success { status, .. } => *status,
            Outcome::Failure { status, .. } => *status,
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success { body, .. } => Some(body),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success { body, .. } => Some(body),
            Outcome::Failure { .. } => None,
        }
    }
}

/// The vending-machine service's HTTP contract.
///
/// Methods that hit bearer-protected endpoints take the [`Session`] built
/// by the login gate; public endpoints take none.
#[async_trait]
pub trait VendingApi {
    /// Connectivity precheck with a short timeout. Startup gate only;
    /// any response status counts as reachable.
    async fn probe(&self) -> Result<u16>;

    async fn login(&self, username: &str, password: &str) -> Result<Outcome<LoginData>>;

    async fn create_user(
        &self,
        session: &Session,
        request: &CreateUserRequest,
    ) -> Result<Outcome<User>>;
    async fn list_users(&self, session: &Session) -> Result<Outcome<Vec<User>>>;
    async fn get_user(&self, session: &Session, id: u64) -> Result<Outcome<User>>;
    async fn update_user(
        &self,
        session: &Session,
        id: u64,
        request: &UpdateUserRequest,
    ) -> Result<Outcome<User>>;
    async fn delete_user(&self, session: &Session, id: u64) -> Result<Outcome<Value>>;

    async fn list_products(&self) -> Result<Outcome<Vec<Product>>>;
    async fn get_product(&self, id: u64) -> Result<Outcome<Product>>;
    async fn availability(&self, id: u64) -> Result<Outcome<StockInfo>>;
    async fn create_product(
        &self,
        session: &Session,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>>;
    async fn update_product(
        &self,
        session: &Session,
        id: u64,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>>;
    async fn delete_product(&self, session: &Session, id: u64) -> Result<Outcome<Value>>;
    async fn update_stock(
        &self,
        session: &Session,
        id: u64,
        request: &StockUpdateRequest,
    ) -> Result<Outcome<StockInfo>>;

    async fn purchase(&self, request: &PurchaseRequest) -> Result<Outcome<Transaction>>;
    async fn list_transactions(&self, session: &Session) -> Result<Outcome<Vec<Transaction>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let success: Outcome<u32> = Outcome::Success {
            status: 200,
            body: 7,
        };
        assert!(success.is_success());
        assert_eq!(success.status(), 200);
        assert_eq!(success.as_success(), Some(&7));
        assert_eq!(success.into_success(), Some(7));

        let failure: Outcome<u32> = Outcome::Failure {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert!(!failure.is_success());
        assert_eq!(failure.status(), 404);
        assert_eq!(failure.as_success(), None);
        assert_eq!(failure.into_success(), None);
    }
}
