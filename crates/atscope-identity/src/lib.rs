//! Identity resolution for AT Protocol repositories.
//!
//! Resolves the authority of a [`Coordinate`](atscope_core::Coordinate) to a
//! DID and to the serving endpoint (PDS) that hosts its repository:
//!
//! ```rust,no_run
//! use atscope_core::Authority;
//! use atscope_identity::{DirectoryConfig, IdentityResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = IdentityResolver::from_config(DirectoryConfig::default())?;
//! let identity = resolver
//!     .resolve_serving_endpoint(&Authority::classify("alice.bsky.social"))
//!     .await?;
//! println!("{} is hosted at {}", identity.did, identity.serving_endpoint);
//! # Ok(())
//! # }
//! ```
//!
//! DID documents are cached by DID for the lifetime of the resolver; there
//! is no eviction.
//!
#![deny(missing_docs)]

/// DID document model.
pub mod document;
/// Error types for resolution.
pub mod error;
/// HTTP implementations of the lookup traits.
pub mod http;
/// Caching resolver.
pub mod resolver;
/// Lookup traits for handles and DID documents.
pub mod source;

pub use document::{DidDocument, Service, VerificationMethod, PDS_SERVICE_TYPE};
pub use error::{ResolutionError, RESOLUTION_NOTICE};
pub use http::{DirectoryConfig, HttpDirectory};
pub use resolver::{IdentityResolver, ResolvedIdentity};
pub use source::{DidDocumentSource, HandleResolver};
