//! Common utilities: errors, settings, logging

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
