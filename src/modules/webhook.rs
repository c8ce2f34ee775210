//! Outbound webhook used to hand new complaints to the notification workflow.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::core::config::WebhookConfig;
use crate::core::error::{AppError, Result};

/// Receiver of JSON notifications.
///
/// Callers treat delivery as best-effort: an `Err` here is for logging, never for
/// failing the request that triggered it.
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    async fn post_json(&self, payload: &Value) -> Result<()>;
}

pub struct HttpWebhookNotifier {
    client: Client,
    url: String,
}

impl HttpWebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    async fn post_json(&self, payload: &Value) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Webhook unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Webhook responded with {}",
                status
            )));
        }

        debug!("Webhook accepted notification with {}", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_webhook_is_an_error() {
        // Port 9 (discard) on loopback is closed in test environments
        let notifier = HttpWebhookNotifier::new(&WebhookConfig {
            url: "http://127.0.0.1:9/hook".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = notifier.post_json(&json!({"title": "x"})).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
