//! Logging configuration and initialization.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Raise the level for `-v` flags: one means `info`, two `debug`,
    /// three or more `trace`. Zero keeps the configured level.
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let level = match verbose {
            0 => return self,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.level = level.to_string();
        self
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Logs go to
    /// stderr so command output on stdout stays clean.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        // A subscriber may already be installed (tests, embedding callers).
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}
