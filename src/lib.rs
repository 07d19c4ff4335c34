//! Vendflow CLI - a scripted workflow driver for a vending-machine service
//!
//! Drives the service's HTTP API through fixed scenarios (user management,
//! product management, payment listing, customer purchases), threading
//! server-issued identifiers between dependent calls.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod report;
pub mod scenario;

// Re-export commonly used types for tests
pub use api::{Outcome, Session, VendingApi};
pub use common::{Error, Result};
