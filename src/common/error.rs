//! Error types for the vendflow CLI
//!
//! Only the startup gates (connectivity probe, login) abort a run; every
//! other call site reports its failure and continues, so most variants
//! here surface as narration rather than process exit.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vendflow CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Startup gates (fatal to the whole run) ===
    #[error("Cannot reach the vending-machine service at {url}: {reason}")]
    Probe { url: String, reason: String },

    #[error("Login failed with status {status}: {message}")]
    LoginFailed { status: u16, message: String },

    #[error("Login response was malformed: {0}")]
    LoginMalformed(String),

    // === Transport / decoding ===
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    // === Configuration ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings file: {0}")]
    ConfigParse(String),

    // === IO ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a connectivity probe error
    pub fn probe(url: &str, reason: impl ToString) -> Self {
        Self::Probe {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a response-decoding error
    pub fn decode(url: &str, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a login-failed error
    pub fn login_failed(status: u16, message: impl ToString) -> Self {
        Self::LoginFailed {
            status,
            message: message.to_string(),
        }
    }
}
