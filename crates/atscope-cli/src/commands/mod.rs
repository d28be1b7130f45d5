pub mod link;
pub mod normalize;
pub mod record;
pub mod render;
pub mod repo;
pub mod resolve;

use atscope_core::{Endpoint, NormalizationError};
use thiserror::Error;

/// Result type shared by all commands.
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Command failures that do not come from a library crate.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no external link for {0}")]
    NoLink(String),
    #[error("'{0}' names an endpoint, not a repository")]
    NotARepository(String),
}

/// Parses a `--pds` argument: a bare host or an absolute URL.
pub fn pds_endpoint(pds: &str) -> Result<Endpoint, NormalizationError> {
    if pds.contains("://") {
        Endpoint::from_url(pds)
    } else if pds.is_empty() || pds.contains('/') {
        Err(NormalizationError::InvalidEndpoint(pds.to_string()))
    } else {
        Ok(Endpoint::new(pds))
    }
}
