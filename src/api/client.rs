//! reqwest implementation of the vending-machine API
//!
//! Every endpoint funnels through one of the `execute_*` helpers, which
//! decode the body exactly once and log the wire detail at debug level.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::common::{Error, Result};

use super::session::Session;
use super::types::{
    CreateUserRequest, Envelope, LoginData, Product, ProductRequest, PurchaseRequest, StockInfo,
    StockUpdateRequest, Transaction, UpdateUserRequest, User,
};
use super::{Outcome, VendingApi};

/// HTTP client for the vending-machine API gateway
pub struct HttpApi {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, probe_timeout: Duration) -> Result<Self> {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            probe_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request against a plain-DTO endpoint and decode the body
    /// into a tagged outcome.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Outcome<T>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), body = %text, "response");

        if status.is_success() {
            serde_json::from_str(&text)
                .map(|body| Outcome::Success {
                    status: status.as_u16(),
                    body,
                })
                .map_err(|e| Error::decode(url, e))
        } else {
            Ok(Outcome::Failure {
                status: status.as_u16(),
                message: failure_message(&text),
            })
        }
    }

    /// Like [`execute`](Self::execute), for endpoints whose success body is
    /// incidental (deletes): an empty or unparseable 2xx body becomes null
    /// instead of a decode error.
    async fn execute_value(&self, request: RequestBuilder, url: &str) -> Result<Outcome<Value>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), body = %text, "response");

        if status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
            };
            Ok(Outcome::Success {
                status: status.as_u16(),
                body,
            })
        } else {
            Ok(Outcome::Failure {
                status: status.as_u16(),
                message: failure_message(&text),
            })
        }
    }

    /// Issue a request against an auth endpoint and unwrap the
    /// success/message/data envelope. The gateway reports some domain
    /// failures with a 2xx status and `success == false`.
    async fn execute_enveloped<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Outcome<T>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), body = %text, "response");

        let envelope: Envelope<T> =
            serde_json::from_str(&text).map_err(|e| Error::decode(url, e))?;

        if status.is_success() && envelope.success {
            match envelope.data {
                Some(body) => Ok(Outcome::Success {
                    status: status.as_u16(),
                    body,
                }),
                None => Err(Error::decode(url, "success envelope without a data field")),
            }
        } else {
            Ok(Outcome::Failure {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            })
        }
    }

    /// Envelope variant for deletes, where `data` is legitimately null.
    async fn execute_enveloped_value(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Outcome<Value>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), body = %text, "response");

        let envelope: Envelope<Value> =
            serde_json::from_str(&text).map_err(|e| Error::decode(url, e))?;

        if status.is_success() && envelope.success {
            Ok(Outcome::Success {
                status: status.as_u16(),
                body: envelope.data.unwrap_or(Value::Null),
            })
        } else {
            Ok(Outcome::Failure {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            })
        }
    }
}

/// Pull the server's message out of a failure body, falling back to the
/// raw text.
fn failure_message(text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[async_trait]
impl VendingApi for HttpApi {
    async fn probe(&self) -> Result<u16> {
        let url = self.url("/api/inventory/products");
        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| Error::probe(&self.base_url, e))?;
        Ok(response.status().as_u16())
    }

    async fn login(&self, username: &str, password: &str) -> Result<Outcome<LoginData>> {
        let url = self.url("/api/auth/login");
        let payload = serde_json::json!({ "username": username, "password": password });
        self.execute_enveloped(self.client.post(&url).json(&payload), &url)
            .await
    }

    async fn create_user(
        &self,
        session: &Session,
        request: &CreateUserRequest,
    ) -> Result<Outcome<User>> {
        let url = self.url("/api/auth/users");
        self.execute_enveloped(
            self.client
                .post(&url)
                .headers(session.headers().clone())
                .json(request),
            &url,
        )
        .await
    }

    async fn list_users(&self, session: &Session) -> Result<Outcome<Vec<User>>> {
        let url = self.url("/api/auth/users");
        self.execute_enveloped(
            self.client.get(&url).headers(session.headers().clone()),
            &url,
        )
        .await
    }

    async fn get_user(&self, session: &Session, id: u64) -> Result<Outcome<User>> {
        let url = self.url(&format!("/api/auth/users/{id}"));
        self.execute_enveloped(
            self.client.get(&url).headers(session.headers().clone()),
            &url,
        )
        .await
    }

    async fn update_user(
        &self,
        session: &Session,
        id: u64,
        request: &UpdateUserRequest,
    ) -> Result<Outcome<User>> {
        let url = self.url(&format!("/api/auth/users/{id}"));
        self.execute_enveloped(
            self.client
                .put(&url)
                .headers(session.headers().clone())
                .json(request),
            &url,
        )
        .await
    }

    async fn delete_user(&self, session: &Session, id: u64) -> Result<Outcome<Value>> {
        let url = self.url(&format!("/api/auth/users/{id}"));
        self.execute_enveloped_value(
            self.client.delete(&url).headers(session.headers().clone()),
            &url,
        )
        .await
    }

    async fn list_products(&self) -> Result<Outcome<Vec<Product>>> {
        let url = self.url("/api/inventory/products");
        self.execute(self.client.get(&url), &url).await
    }

    async fn get_product(&self, id: u64) -> Result<Outcome<Product>> {
        let url = self.url(&format!("/api/inventory/products/{id}"));
        self.execute(self.client.get(&url), &url).await
    }

    async fn availability(&self, id: u64) -> Result<Outcome<StockInfo>> {
        let url = self.url(&format!("/api/inventory/availability/{id}"));
        self.execute(self.client.get(&url), &url).await
    }

    async fn create_product(
        &self,
        session: &Session,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>> {
        let url = self.url("/api/admin/inventory/products");
        self.execute(
            self.client
                .post(&url)
                .headers(session.headers().clone())
                .json(request),
            &url,
        )
        .await
    }

    async fn update_product(
        &self,
        session: &Session,
        id: u64,
        request: &ProductRequest,
    ) -> Result<Outcome<Product>> {
        let url = self.url(&format!("/api/admin/inventory/products/{id}"));
        self.execute(
            self.client
                .put(&url)
                .headers(session.headers().clone())
                .json(request),
            &url,
        )
        .await
    }

    async fn delete_product(&self, session: &Session, id: u64) -> Result<Outcome<Value>> {
        let url = self.url(&format!("/api/admin/inventory/products/{id}"));
        self.execute_value(
            self.client.delete(&url).headers(session.headers().clone()),
            &url,
        )
        .await
    }

    async fn update_stock(
        &self,
        session: &Session,
        id: u64,
        request: &StockUpdateRequest,
    ) -> Result<Outcome<StockInfo>> {
        let url = self.url(&format!("/api/admin/inventory/stock/{id}"));
        self.execute(
            self.client
                .put(&url)
                .headers(session.headers().clone())
                .json(request),
            &url,
        )
        .await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<Outcome<Transaction>> {
        let url = self.url("/api/transaction/purchase");
        self.execute(self.client.post(&url).json(request), &url).await
    }

    async fn list_transactions(&self, session: &Session) -> Result<Outcome<Vec<Transaction>>> {
        let url = self.url("/api/admin/payment/transactions");
        self.execute(
            self.client.get(&url).headers(session.headers().clone()),
            &url,
        )
        .await
    }
}
