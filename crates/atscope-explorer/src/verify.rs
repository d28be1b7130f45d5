//! Authentication boundary for fetched records.

use crate::xrpc::RecordOutput;
use async_trait::async_trait;
use atscope_identity::DidDocument;
use serde::{Deserialize, Serialize};

/// Validity indicator shown next to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Not checked (yet), or no verifier configured.
    #[default]
    Unknown,
    /// The record authenticated against its repository's keys.
    Valid,
    /// Authentication failed; the record is still shown.
    Invalid,
}

/// Authenticates a record against the DID document of its repository.
///
/// Implementations live outside this workspace; the explorer only consumes
/// the verdict.
#[async_trait]
pub trait RecordVerifier: Send + Sync {
    /// Returns `Err(reason)` when the record does not authenticate.
    async fn verify(&self, record: &RecordOutput, document: &DidDocument) -> Result<(), String>;
}
