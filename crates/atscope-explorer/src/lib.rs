//! View pipeline of the AT Protocol record explorer.
//!
//! An [`Explorer`] turns user input into views:
//! - [`Explorer::navigate`] normalizes input and routes it, resolving handles to DIDs
//! - [`Explorer::load_record`] resolves, fetches, authenticates, renders and links one record
//! - [`Explorer::load_repo`] describes a repository and its DID document
//! - [`Explorer::load_record_at`] and [`Explorer::load_repo_at`] do the same
//!   against a serving endpoint the user names, without identity resolution
//!
//! Views publish progress to the shared [`AppState`]. Each view holds a
//! [`ViewTicket`]; once a newer view is mounted, the older one can no longer
//! write state and abandons its load with [`ExplorerError::Superseded`].
//!
#![deny(missing_docs)]

/// Explorer configuration.
pub mod config;
/// Error types.
pub mod errors;
/// The explorer facade.
pub mod explorer;
/// Navigation from raw input.
pub mod navigate;
/// The record view.
pub mod record_view;
/// The repository view.
pub mod repo_view;
/// Application state store.
pub mod state;
/// Record authentication boundary.
pub mod verify;
/// XRPC record source.
pub mod xrpc;

pub use config::{ExplorerConfig, CONFIG_ENV};
pub use errors::{ConfigError, ExplorerError, FetchError};
pub use explorer::Explorer;
pub use navigate::Navigation;
pub use record_view::{LoadedRecord, LOADING_NOTICE, VALIDATING_NOTICE};
pub use repo_view::{did_document_link, plc_log_link, CollectionEntry, KeyEntry, RepoSummary, ServiceEntry};
pub use state::{AppState, Theme, ViewSnapshot, ViewTicket};
pub use verify::{RecordVerifier, Validity};
pub use xrpc::{RecordOutput, RecordSource, RepoDescription, XrpcClient};
