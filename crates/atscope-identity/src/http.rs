//! HTTP client for handle resolution and DID document directories.

use crate::document::DidDocument;
use crate::error::ResolutionError;
use crate::source::{DidDocumentSource, HandleResolver};
use async_trait::async_trait;
use atscope_core::{Did, Handle};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where identities are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// PLC directory base URL for `did:plc` documents.
    pub plc_directory: String,
    /// XRPC service answering `com.atproto.identity.resolveHandle`.
    pub handle_resolver: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            plc_directory: "https://plc.directory".to_string(),
            handle_resolver: "https://public.api.bsky.app".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResolveHandleOutput {
    did: String,
}

/// Resolves handles over XRPC and fetches DID documents over HTTPS.
///
/// `did:plc` documents come from the PLC directory, `did:web` documents from
/// the host's `/.well-known/did.json`.
pub struct HttpDirectory {
    config: DirectoryConfig,
    client: Client,
}

impl HttpDirectory {
    /// Creates a directory client.
    pub fn new(config: DirectoryConfig) -> Result<Self, ResolutionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResolutionError::HttpClient(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// URL of the handle resolution call for `handle`.
    pub fn handle_url(&self, handle: &Handle) -> String {
        format!(
            "{}/xrpc/com.atproto.identity.resolveHandle?handle={}",
            self.config.handle_resolver.trim_end_matches('/'),
            urlencoding::encode(handle.as_str())
        )
    }

    /// URL of the DID document for `did`.
    pub fn document_url(&self, did: &Did) -> Result<String, ResolutionError> {
        match did.method() {
            "plc" => Ok(format!(
                "{}/{}",
                self.config.plc_directory.trim_end_matches('/'),
                did
            )),
            "web" => {
                // host[%3Aport][:path:segments]
                let mut segments = did.method_specific_id().split(':');
                let host = segments.next().unwrap_or("").replace("%3A", ":");
                if host.is_empty() {
                    return Err(unavailable(did, "malformed did:web identifier"));
                }
                let path: Vec<&str> = segments.collect();
                if path.is_empty() {
                    Ok(format!("https://{}/.well-known/did.json", host))
                } else {
                    Ok(format!("https://{}/{}/did.json", host, path.join("/")))
                }
            }
            method => Err(unavailable(
                did,
                &format!("unsupported DID method '{}'", method),
            )),
        }
    }
}

fn unavailable(did: &Did, reason: &str) -> ResolutionError {
    ResolutionError::DidDocumentUnavailable {
        did: did.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl HandleResolver for HttpDirectory {
    async fn resolve_handle(&self, handle: &Handle) -> Result<Did, ResolutionError> {
        let not_found = |reason: String| ResolutionError::HandleNotFound {
            handle: handle.to_string(),
            reason,
        };

        let url = self.handle_url(handle);
        tracing::debug!(%url, "resolving handle");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| not_found(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(not_found(format!("status {}: {}", status, body)));
        }

        let output: ResolveHandleOutput = response
            .json()
            .await
            .map_err(|e| not_found(e.to_string()))?;
        Did::parse(output.did).map_err(|e| not_found(e.to_string()))
    }
}

#[async_trait]
impl DidDocumentSource for HttpDirectory {
    async fn fetch_document(&self, did: &Did) -> Result<DidDocument, ResolutionError> {
        let url = self.document_url(did)?;
        tracing::debug!(%url, "fetching DID document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(did, &e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(unavailable(did, "not found"));
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(unavailable(did, &format!("status {}", status)));
        }

        let document: DidDocument = response
            .json()
            .await
            .map_err(|e| unavailable(did, &e.to_string()))?;
        if document.id != did.as_str() {
            return Err(unavailable(
                did,
                &format!("document describes {}", document.id),
            ));
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> HttpDirectory {
        HttpDirectory::new(DirectoryConfig::default()).unwrap()
    }

    #[test]
    fn plc_documents_come_from_directory() {
        let url = directory()
            .document_url(&Did::new("did:plc:oisofpd7lj26yvgiivf3lxsi"))
            .unwrap();
        assert_eq!(url, "https://plc.directory/did:plc:oisofpd7lj26yvgiivf3lxsi");
    }

    #[test]
    fn web_documents_come_from_well_known() {
        let dir = directory();
        assert_eq!(
            dir.document_url(&Did::new("did:web:example.com")).unwrap(),
            "https://example.com/.well-known/did.json"
        );
        assert_eq!(
            dir.document_url(&Did::new("did:web:localhost%3A8080")).unwrap(),
            "https://localhost:8080/.well-known/did.json"
        );
        assert_eq!(
            dir.document_url(&Did::new("did:web:example.com:users:alice")).unwrap(),
            "https://example.com/users/alice/did.json"
        );
    }

    #[test]
    fn unknown_methods_are_unavailable() {
        assert!(matches!(
            directory().document_url(&Did::new("did:key:z6Mk")),
            Err(ResolutionError::DidDocumentUnavailable { .. })
        ));
    }

    #[test]
    fn handle_url_is_encoded() {
        let url = directory().handle_url(&Handle::new("alice.test"));
        assert_eq!(
            url,
            "https://public.api.bsky.app/xrpc/com.atproto.identity.resolveHandle?handle=alice.test"
        );
    }
}
