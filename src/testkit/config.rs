//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::blob::BlobConfig;
use crate::infrastructure::config::settings::Config;

/// Default configuration with no secrets, independent of the process env.
pub fn offline() -> Config {
    Config::parse_toml_with_env("", |_| None).expect("default config is valid")
}

/// Blob configuration pointing at `api_url` with a token set.
pub fn blob(api_url: &str) -> BlobConfig {
    BlobConfig {
        api_url: api_url.to_string(),
        token: Some("test-token".to_string()),
        ..BlobConfig::default()
    }
}
