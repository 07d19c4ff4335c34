//! Wire types for the vending-machine HTTP API
//!
//! The auth endpoints wrap their payload in a success/message/data
//! envelope; inventory and transaction endpoints return plain DTOs.
//! Field names follow the service's camelCase JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Envelope used by the auth endpoints. The `Option` fields deserialize
/// to `None` when absent without a `default` attribute, which would drag
/// a `Default` bound onto the payload type.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Not every gateway build returns the account id here; the user
    /// scenario falls back to a listing scan when it is absent.
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// A user account. The role is a server-defined enumeration (observed
/// SUPER_ADMIN, ADMIN, USER) and is carried as an opaque string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub role: String,
}

/// A catalog product as returned by the inventory endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub quantity: i64,
}

/// Live stock information for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    pub quantity: i64,
    #[serde(default)]
    pub min_threshold: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdateRequest {
    pub quantity: i64,
    pub min_threshold: i64,
}

/// Pass-through payment label; the client never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub payment_method: PaymentMethod,
}

/// One purchase call: an ordered item list plus the payment label
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub items: Vec<PurchaseItem>,
    pub payment_info: PaymentInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub items: Vec<TransactionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub product_id: u64,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<f64>,
}
