//! Authenticated session state
//!
//! A Session is produced once by a successful login and then only read:
//! its header set rides on every authenticated call for the rest of the
//! run. Nothing is persisted across runs.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::common::{Error, Result};

#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    headers: HeaderMap,
}

impl Session {
    /// Session without a credential: JSON content type only.
    pub fn anonymous() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            token: None,
            headers,
        }
    }

    /// Session with a bearer credential installed.
    pub fn authenticated(token: &str) -> Result<Self> {
        let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            Error::LoginMalformed(format!("token is not a valid header value: {e}"))
        })?;

        let mut session = Self::anonymous();
        session.headers.insert(AUTHORIZATION, value);
        session.token = Some(token.to_string());
        Ok(session)
    }

    /// Header set attached to every request issued under this session.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
