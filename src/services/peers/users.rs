use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::services::peers::PeerError;

/// Read-only access to the user directory service
///
/// Pure proxy semantics: bodies come back untouched and non-2xx statuses are
/// surfaced to the caller instead of being mapped.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserDirectoryClient: Send + Sync {
    async fn fetch_user(&self, user_id: u64) -> Result<Value, PeerError>;

    async fn fetch_users(&self) -> Result<Value, PeerError>;
}

/// HTTP client for the user directory service
#[derive(Clone)]
pub struct HttpUserClient {
    http_client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl HttpUserClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            timeout,
        }
    }

    async fn get_json(&self, url: String) -> Result<Value, PeerError> {
        let response = self
            .http_client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.json().await.unwrap_or(Value::Null);
            return Err(PeerError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl UserDirectoryClient for HttpUserClient {
    async fn fetch_user(&self, user_id: u64) -> Result<Value, PeerError> {
        self.get_json(format!("{}/api/users/{}", self.base_url, user_id))
            .await
    }

    async fn fetch_users(&self) -> Result<Value, PeerError> {
        self.get_json(format!("{}/api/users", self.base_url)).await
    }
}
