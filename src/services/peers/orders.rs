use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::models::OrderRecord;
use crate::services::peers::PeerError;

/// Source of a user's order history
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OrderHistoryClient: Send + Sync {
    /// Product ids from the user's past orders, in order, duplicates included
    async fn purchase_history(&self, user_id: u64) -> Result<Vec<u64>, PeerError>;
}

/// HTTP client for the order history service
#[derive(Clone)]
pub struct HttpOrderClient {
    http_client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl HttpOrderClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl OrderHistoryClient for HttpOrderClient {
    async fn purchase_history(&self, user_id: u64) -> Result<Vec<u64>, PeerError> {
        let url = format!("{}/api/orders/user/{}", self.base_url, user_id);

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

        // Rows without a usable product_id are skipped rather than failing
        // the whole history
        let rows: Vec<Value> = response.json().await?;
        let product_ids: Vec<u64> = rows
            .iter()
            .filter_map(|row| serde_json::from_value::<OrderRecord>(row.clone()).ok())
            .map(|record| record.product_id)
            .collect();

        tracing::debug!(
            user_id,
            orders = rows.len(),
            products = product_ids.len(),
            "Fetched order history"
        );

        Ok(product_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_projects_product_ids_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/user/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 100, "product_id": 1, "quantity": 2},
                {"id": 101, "product_id": 3, "quantity": 1},
                {"id": 102, "product_id": 1, "quantity": 5},
            ])))
            .mount(&server)
            .await;

        let client = HttpOrderClient::new(server.uri(), Duration::from_secs(2));
        let history = client.purchase_history(7).await.unwrap();

        // Duplicates pass through as-is; dedup happens downstream
        assert_eq!(history, vec![1, 3, 1]);
    }

    #[tokio::test]
    async fn test_skips_rows_without_product_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/user/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 100, "product_id": 2},
                {"id": 101, "note": "malformed row"},
            ])))
            .mount(&server)
            .await;

        let client = HttpOrderClient::new(server.uri(), Duration::from_secs(2));
        let history = client.purchase_history(7).await.unwrap();

        assert_eq!(history, vec![2]);
    }

    #[tokio::test]
    async fn test_non_2xx_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/user/7"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})),
            )
            .mount(&server)
            .await;

        let client = HttpOrderClient::new(server.uri(), Duration::from_secs(2));
        let err = client.purchase_history(7).await.unwrap_err();

        match err {
            PeerError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body["error"], "maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_peer_times_out_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders/user/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpOrderClient::new(server.uri(), Duration::from_millis(50));
        let err = client.purchase_history(7).await.unwrap_err();

        assert!(matches!(err, PeerError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_transport_error() {
        // Nothing listens on this port
        let client = HttpOrderClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(200),
        );
        let err = client.purchase_history(7).await.unwrap_err();

        assert!(matches!(err, PeerError::Transport(_)));
    }
}
