use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// A required project field is missing or blank.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for the "missing or blank" case.
    #[must_use]
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

/// Blob backend errors that abort a whole operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("blob store is not configured: {credential} is not set")]
    Unconfigured { credential: &'static str },

    #[error("blob store unavailable: {0}")]
    Unavailable(String),

    #[error("blob store answered {status} for {context}")]
    Status { status: u16, context: String },

    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// True when the failure is an operator-correctable missing credential.
    #[must_use]
    pub const fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Unconfigured { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalidation failed: {0}")]
    Invalidation(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
