//! HTTP client implementation for the Diet Service API.
//!
//! This module provides a reqwest-based implementation of the [`DietService`](crate::DietService) trait.

use crate::config::Config;
use crate::profile::{OptimizeRequest, TdeeRequest};
use crate::{CalorieEstimate, DietResult, DietService, DietServiceError, Product, ServiceHealth};
use async_trait::async_trait;

/// Client for the Diet Service API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestDietClient {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestDietClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Diet Service (e.g., "http://localhost:5000")
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url)
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DietServiceError> {
        let resp = request.send().await?;
        Self::handle_response(resp).await
    }

    /// Execute a request with no expected response body.
    async fn execute_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), DietServiceError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DietServiceError::Api(error_message(
                &body,
                status.as_u16(),
            )));
        }
        Ok(())
    }

    /// Handle a response, separating the three failure classes: non-2xx
    /// statuses become `Api` errors carrying the server-provided message,
    /// and a 2xx body with a top-level `error` field becomes a `Service`
    /// error rather than a parsed result.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, DietServiceError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(DietServiceError::Api(error_message(
                &body,
                status.as_u16(),
            )));
        }
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| decode_error(e, &body))?;
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return Err(DietServiceError::Service(message.to_string()));
        }
        serde_json::from_value(value).map_err(|e| decode_error(e, &body))
    }
}

/// Pull the `error` field out of a JSON error body, falling back to
/// `HTTP {status}` when the body has none.
fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn decode_error(err: serde_json::Error, body: &str) -> DietServiceError {
    let body_snippet: String = body.chars().take(256).collect();
    DietServiceError::Decode(format!("{err} - body: {body_snippet}"))
}

#[async_trait]
impl DietService for ReqwestDietClient {
    async fn estimate_calories(
        &self,
        request: &TdeeRequest,
    ) -> Result<CalorieEstimate, DietServiceError> {
        let url = format!("{}/tdee", self.base_url);
        let estimate: CalorieEstimate =
            self.execute_json(self.client.post(&url).json(request)).await?;
        tracing::debug!(
            kcal = estimate.kcal,
            method = estimate.method.as_deref(),
            "calorie estimate received"
        );
        Ok(estimate)
    }

    async fn optimize_diet(
        &self,
        request: &OptimizeRequest,
    ) -> Result<DietResult, DietServiceError> {
        let url = format!("{}/optimize", self.base_url);
        let result: DietResult =
            self.execute_json(self.client.post(&url).json(request)).await?;
        tracing::debug!(
            products = result.entries().len(),
            status = %result.status,
            "optimization result received"
        );
        Ok(result)
    }

    async fn list_products(&self) -> Result<Vec<Product>, DietServiceError> {
        let url = format!("{}/api/products", self.base_url);
        self.execute_json(self.client.get(&url)).await
    }

    async fn update_product_price(
        &self,
        product_id: i64,
        price: f64,
    ) -> Result<(), DietServiceError> {
        let url = format!("{}/api/products/{}", self.base_url, product_id);
        let body = serde_json::json!({ "price": price });
        self.execute_empty(self.client.put(&url).json(&body)).await
    }

    async fn health(&self) -> Result<ServiceHealth, DietServiceError> {
        let url = format!("{}/health", self.base_url);
        self.execute_json(self.client.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_body_error_field() {
        assert_eq!(error_message(r#"{"error": "bad input"}"#, 400), "bad input");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(error_message("<html>oops</html>", 502), "HTTP 502");
        assert_eq!(error_message(r#"{"detail": "nope"}"#, 404), "HTTP 404");
    }

    #[test]
    fn decode_error_truncates_body_snippet() {
        let body = "x".repeat(1000);
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let DietServiceError::Decode(message) = decode_error(err, &body) else {
            panic!("expected decode error");
        };
        assert!(message.len() < 600);
    }
}
