//! Blob store configuration.

use serde::{Deserialize, Serialize};

/// Environment variable holding the blob read/write token.
pub const BLOB_TOKEN_ENV: &str = "BLOB_READ_WRITE_TOKEN";

/// Key prefix every project record lives under.
pub const DEFAULT_PREFIX: &str = "projects/";

fn default_api_url() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_api_version() -> String {
    "7".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Remote blob API settings.
///
/// The token is loaded from [`BLOB_TOKEN_ENV`], never from the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobConfig {
    /// Base URL of the blob API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Value sent in the `x-api-version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Key prefix for project records. Must end with `/`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Read/write token.
    #[serde(skip)]
    pub token: Option<String>,
}

impl BlobConfig {
    /// Whether a non-empty token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_version: default_api_version(),
            prefix: default_prefix(),
            token: None,
        }
    }
}
