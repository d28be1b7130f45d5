use crate::document::DidDocument;
use crate::error::ResolutionError;
use crate::http::{DirectoryConfig, HttpDirectory};
use crate::source::{DidDocumentSource, HandleResolver};
use atscope_core::{Authority, Did};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

/// A DID together with the endpoint hosting its repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentity {
    /// The repository's DID.
    pub did: Did,
    /// Base URL of the repository-hosting service.
    pub serving_endpoint: Url,
}

/// Resolves authorities to DIDs and serving endpoints.
///
/// DID documents are cached per DID after the first successful fetch and
/// reused for the resolver's lifetime. Concurrent first fetches of one DID
/// may both reach the network; both insert the same document.
pub struct IdentityResolver {
    handles: Arc<dyn HandleResolver>,
    documents: Arc<dyn DidDocumentSource>,
    cache: RwLock<HashMap<Did, Arc<DidDocument>>>,
}

impl IdentityResolver {
    /// Creates a resolver over the given lookups.
    pub fn new(handles: Arc<dyn HandleResolver>, documents: Arc<dyn DidDocumentSource>) -> Self {
        Self {
            handles,
            documents,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a resolver backed by [`HttpDirectory`].
    pub fn from_config(config: DirectoryConfig) -> Result<Self, ResolutionError> {
        let directory = Arc::new(HttpDirectory::new(config)?);
        Ok(Self::new(directory.clone(), directory))
    }

    /// Resolves an authority to a DID; DIDs are returned unchanged.
    pub async fn resolve_did(&self, authority: &Authority) -> Result<Did, ResolutionError> {
        match authority {
            Authority::Did(did) => Ok(did.clone()),
            Authority::Handle(handle) => {
                let did = self.handles.resolve_handle(handle).await?;
                tracing::debug!(%handle, %did, "handle resolved");
                Ok(did)
            }
        }
    }

    /// Returns the DID document, fetching it only on a cache miss.
    pub async fn did_document(&self, did: &Did) -> Result<Arc<DidDocument>, ResolutionError> {
        if let Some(document) = self.cached_document(did).await {
            tracing::debug!(%did, "DID document cache hit");
            return Ok(document);
        }

        let document = match self.documents.fetch_document(did).await {
            Ok(document) => Arc::new(document),
            Err(e) => {
                tracing::warn!(%did, error = %e, "DID document fetch failed");
                return Err(e);
            }
        };
        self.cache
            .write()
            .await
            .insert(did.clone(), document.clone());
        Ok(document)
    }

    /// Resolves an authority to its DID and serving endpoint.
    pub async fn resolve_serving_endpoint(
        &self,
        authority: &Authority,
    ) -> Result<ResolvedIdentity, ResolutionError> {
        let did = self.resolve_did(authority).await?;
        let document = self.did_document(&did).await?;
        let serving_endpoint = document
            .serving_endpoint()
            .ok_or_else(|| ResolutionError::NoServingEndpoint(did.to_string()))?;

        tracing::info!(%did, endpoint = %serving_endpoint, "identity resolved");
        Ok(ResolvedIdentity {
            did,
            serving_endpoint,
        })
    }

    /// Cached document for `did`, without network access.
    pub async fn cached_document(&self, did: &Did) -> Option<Arc<DidDocument>> {
        self.cache.read().await.get(did).cloned()
    }

    /// Number of cached documents.
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }
}
