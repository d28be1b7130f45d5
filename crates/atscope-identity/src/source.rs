use crate::document::DidDocument;
use crate::error::ResolutionError;
use async_trait::async_trait;
use atscope_core::{Did, Handle};

/// Resolves handles to DIDs.
#[async_trait]
pub trait HandleResolver: Send + Sync {
    /// Looks up the DID currently claimed by `handle`.
    ///
    /// Fails with [`ResolutionError::HandleNotFound`].
    async fn resolve_handle(&self, handle: &Handle) -> Result<Did, ResolutionError>;
}

/// Fetches DID documents.
#[async_trait]
pub trait DidDocumentSource: Send + Sync {
    /// Fetches the current document for `did`.
    ///
    /// Fails with [`ResolutionError::DidDocumentUnavailable`].
    async fn fetch_document(&self, did: &Did) -> Result<DidDocument, ResolutionError>;
}
