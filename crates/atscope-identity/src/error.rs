use thiserror::Error;

/// Notice shown to the user for every resolution failure.
pub const RESOLUTION_NOTICE: &str = "Could not resolve AT URI";

/// Errors that can occur while resolving an identity.
///
/// None of these are retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The handle did not resolve to a DID.
    #[error("handle not found: {handle} ({reason})")]
    HandleNotFound {
        /// Handle that was looked up.
        handle: String,
        /// Why the lookup failed.
        reason: String,
    },
    /// The DID document could not be fetched or decoded.
    #[error("DID document unavailable for {did}: {reason}")]
    DidDocumentUnavailable {
        /// DID whose document was requested.
        did: String,
        /// Why the document is unavailable.
        reason: String,
    },
    /// The DID document declares no repository-hosting service.
    #[error("no serving endpoint declared by {0}")]
    NoServingEndpoint(String),
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl ResolutionError {
    /// User-facing notice for this failure.
    pub fn notice(&self) -> &'static str {
        RESOLUTION_NOTICE
    }
}
