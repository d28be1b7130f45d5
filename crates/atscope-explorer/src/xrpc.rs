//! XRPC client for reading records and repository descriptions.

use crate::errors::FetchError;
use async_trait::async_trait;
use atscope_core::{Authority, Nsid, RecordKey};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Output of `com.atproto.repo.getRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutput {
    /// AT URI of the record.
    pub uri: String,
    /// CID of the record version, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// The record value.
    pub value: Value,
}

/// Output of `com.atproto.repo.describeRepo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoDescription {
    /// Current handle.
    pub handle: String,
    /// Repository DID.
    pub did: String,
    /// DID document as served by the repository host.
    pub did_doc: Value,
    /// Collections that hold at least one record.
    #[serde(default)]
    pub collections: Vec<String>,
    /// Whether the handle resolves back to this DID.
    #[serde(default)]
    pub handle_is_correct: bool,
}

/// Reads records and repository descriptions from a serving endpoint.
///
/// `repo` may be a DID or a handle; services accept either.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches one record.
    async fn get_record(
        &self,
        service: &Url,
        repo: &Authority,
        collection: &Nsid,
        rkey: &RecordKey,
    ) -> Result<RecordOutput, FetchError>;

    /// Describes a repository.
    async fn describe_repo(&self, service: &Url, repo: &Authority) -> Result<RepoDescription, FetchError>;
}

#[derive(Debug, Deserialize)]
struct XrpcErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Unauthenticated XRPC client over HTTP.
pub struct XrpcClient {
    client: Client,
}

impl XrpcClient {
    /// Creates a client with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    /// URL of an XRPC query with the given parameters.
    pub fn query_url(service: &Url, method: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/xrpc/{}", service.as_str().trim_end_matches('/'), method);
        let query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    async fn query<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        tracing::debug!(%url, "XRPC query");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let parsed: Option<XrpcErrorBody> = serde_json::from_str(&body).ok();
            let (error, message) = match parsed {
                Some(b) => (b.error.unwrap_or_else(|| "Unknown".to_string()), b.message),
                None => ("Unknown".to_string(), None),
            };
            tracing::warn!(status, %error, "XRPC query failed");
            return Err(FetchError::Xrpc {
                status,
                error,
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for XrpcClient {
    async fn get_record(
        &self,
        service: &Url,
        repo: &Authority,
        collection: &Nsid,
        rkey: &RecordKey,
    ) -> Result<RecordOutput, FetchError> {
        let url = Self::query_url(
            service,
            "com.atproto.repo.getRecord",
            &[
                ("repo", repo.as_str()),
                ("collection", collection.as_str()),
                ("rkey", rkey.as_str()),
            ],
        );
        self.query(&url).await
    }

    async fn describe_repo(&self, service: &Url, repo: &Authority) -> Result<RepoDescription, FetchError> {
        let url = Self::query_url(
            service,
            "com.atproto.repo.describeRepo",
            &[("repo", repo.as_str())],
        );
        self.query(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_record_url() {
        let service = Url::parse("https://pds.example.com").unwrap();
        let url = XrpcClient::query_url(
            &service,
            "com.atproto.repo.getRecord",
            &[
                ("repo", "did:plc:abc"),
                ("collection", "app.bsky.feed.post"),
                ("rkey", "3k"),
            ],
        );
        assert_eq!(
            url,
            "https://pds.example.com/xrpc/com.atproto.repo.getRecord?repo=did%3Aplc%3Aabc&collection=app.bsky.feed.post&rkey=3k"
        );
    }

    #[test]
    fn record_output_tolerates_missing_cid() {
        let output: RecordOutput = serde_json::from_str(
            r#"{"uri":"at://did:plc:abc/app.bsky.feed.post/3k","value":{"text":"hi"}}"#,
        )
        .unwrap();
        assert!(output.cid.is_none());
        assert_eq!(output.value["text"], "hi");
    }
}
