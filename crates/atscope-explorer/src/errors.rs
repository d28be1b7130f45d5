use atscope_core::NormalizationError;
use atscope_identity::ResolutionError;
use thiserror::Error;

/// Errors returned by a record or repository fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The service answered with an XRPC error body.
    #[error("{error} (status {status})")]
    Xrpc {
        /// HTTP status code.
        status: u16,
        /// XRPC error name (`RecordNotFound`, `InvalidRequest`, ...).
        error: String,
        /// Human-readable message, when the service sent one.
        message: Option<String>,
    },
    /// The request did not complete.
    #[error("{0}")]
    Transport(String),
    /// The response body was not the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl FetchError {
    /// User-facing notice: the service's message verbatim, or a generic one.
    pub fn notice(&self) -> String {
        match self {
            FetchError::Xrpc {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::Transport(message) => message.clone(),
            other => format!("Invalid Record: {}", other),
        }
    }
}

/// Errors produced while loading a view.
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// The input could not be normalized.
    #[error("invalid input: {0}")]
    Normalization(#[from] NormalizationError),
    /// The authority could not be resolved.
    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
    /// The record or repository could not be fetched.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The view needs a deeper coordinate than the one given.
    #[error("'{0}' does not name a record")]
    IncompleteCoordinate(String),
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Another view was mounted before this one finished loading.
    #[error("view superseded by a newer navigation")]
    Superseded,
}

impl ExplorerError {
    /// User-facing notice for the failure.
    pub fn notice(&self) -> String {
        match self {
            ExplorerError::Resolution(e) => e.notice().to_string(),
            ExplorerError::Fetch(e) => e.notice(),
            other => other.to_string(),
        }
    }
}

/// Errors loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid YAML for the configuration schema.
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
