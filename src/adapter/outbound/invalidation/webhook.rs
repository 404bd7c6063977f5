//! Revalidation webhook.
//!
//! Posts the stale page paths to the hosting framework so cached renders of
//! the catalog are regenerated on the next request.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::infrastructure::config::revalidate::RevalidateConfig;
use crate::port::{CatalogChange, Invalidator};

/// HTTP revalidation webhook client.
#[derive(Debug)]
pub struct WebhookInvalidator {
    client: Client,
    url: String,
    paths: Vec<String>,
    secret: Option<String>,
}

impl WebhookInvalidator {
    /// Create a webhook client for `url` invalidating `paths`.
    #[must_use]
    pub fn new(url: impl Into<String>, paths: Vec<String>, secret: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            paths,
            secret,
        }
    }

    /// Build from configuration. Returns `None` when disabled or no URL is set.
    #[must_use]
    pub fn from_config(config: &RevalidateConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let url = config.url.as_deref()?;
        Some(Self::new(url, config.paths.clone(), config.secret.clone()))
    }

    fn payload<'a>(&'a self, change: &'a CatalogChange) -> Payload<'a> {
        Payload {
            paths: &self.paths,
            reason: change.reason(),
            id: change.id().as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    paths: &'a [String],
    reason: &'static str,
    id: &'a str,
}

#[async_trait]
impl Invalidator for WebhookInvalidator {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn invalidate(&self, change: &CatalogChange) -> Result<()> {
        let mut request = self.client.post(&self.url).json(&self.payload(change));
        if let Some(secret) = &self.secret {
            request = request.bearer_auth(secret);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Invalidation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Invalidation(format!(
                "{} answered {}",
                self.url,
                status.as_u16()
            )));
        }

        debug!(paths = ?self.paths, id = %change.id(), "Revalidation requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectId;

    #[test]
    fn payload_serialization() {
        let webhook = WebhookInvalidator::new(
            "https://example.com/api/revalidate",
            vec!["/".to_string(), "/projects".to_string()],
            None,
        );
        let change = CatalogChange::Removed {
            id: ProjectId::new("p1"),
        };

        let json = serde_json::to_value(webhook.payload(&change)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "paths": ["/", "/projects"],
                "reason": "removed",
                "id": "p1",
            })
        );
    }

    #[test]
    fn from_config_requires_enabled_and_url() {
        let mut config = RevalidateConfig::default();
        assert!(WebhookInvalidator::from_config(&config).is_none());

        config.enabled = true;
        assert!(WebhookInvalidator::from_config(&config).is_none());

        config.url = Some("https://example.com/api/revalidate".to_string());
        config.secret = Some("s3cret".to_string());
        let webhook = WebhookInvalidator::from_config(&config).unwrap();
        assert_eq!(webhook.url, "https://example.com/api/revalidate");
        assert_eq!(webhook.secret.as_deref(), Some("s3cret"));
        assert_eq!(webhook.name(), "webhook");
    }
}
