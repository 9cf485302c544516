//! Outbound enquiry relay: one fire-and-forget webhook POST per submission.

use std::time::Duration;

use async_trait::async_trait;
use atelier_core::{AppConfig, DomainError, DomainResult, EnquiryDraft, EnquiryNotifier};

/// [`EnquiryNotifier`] that POSTs the draft as JSON to a configured webhook
/// (a mail relay or chat hook). With no URL configured the notifier is
/// disabled and reports success, which keeps local development working
/// without a relay.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    #[must_use]
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    /// Builds the relay client from application config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        if config.enquiry_webhook_url.is_none() {
            tracing::warn!(
                "ATELIER_ENQUIRY_WEBHOOK_URL not set; enquiry notifications are disabled"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.enquiry_webhook_timeout_secs))
            .build()?;

        Ok(Self::new(client, config.enquiry_webhook_url.clone()))
    }
}

#[async_trait]
impl EnquiryNotifier for WebhookNotifier {
    /// Single attempt, no retry. A failure or non-2xx response surfaces as
    /// [`DomainError::Channel`]; the caller tells the visitor to try again
    /// later.
    async fn notify(&self, draft: &EnquiryDraft) -> DomainResult<()> {
        let Some(url) = self.url.as_deref() else {
            tracing::debug!(
                product = %draft.product_name,
                "enquiry notification skipped; no webhook configured"
            );
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| DomainError::channel(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::channel(format!(
                "relay returned {}",
                response.status()
            )));
        }

        tracing::info!(product = %draft.product_name, "enquiry relayed");
        Ok(())
    }
}
