//! Page-cache revalidation configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the revalidation webhook secret.
pub const REVALIDATE_SECRET_ENV: &str = "FOLIO_REVALIDATE_SECRET";

fn default_paths() -> Vec<String> {
    vec!["/".to_string(), "/projects".to_string()]
}

/// Revalidation webhook settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevalidateConfig {
    /// Send invalidation signals to the webhook.
    #[serde(default)]
    pub enabled: bool,
    /// Webhook endpoint. Required when enabled.
    #[serde(default)]
    pub url: Option<String>,
    /// Page paths that render the catalog.
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,
    /// Bearer secret, loaded from [`REVALIDATE_SECRET_ENV`].
    #[serde(skip)]
    pub secret: Option<String>,
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            paths: default_paths(),
            secret: None,
        }
    }
}
