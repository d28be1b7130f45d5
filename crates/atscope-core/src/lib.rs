//! Core primitives for locating AT Protocol records.
//!
//! This crate provides:
//! - Identifier newtypes (`Did`, `Handle`, `Nsid`, `RecordKey`) with pattern validation
//! - Normalization of free-form user input into a repository [`Coordinate`]
//!   or an [`Endpoint`] reference
//! - The static table of third-party deep links keyed by collection
//!
//! Everything here is synchronous and performs no network access.
//!
#![deny(missing_docs)]

/// Repository coordinates and input normalization.
pub mod coordinate;
/// Core identifiers and newtypes.
pub mod identifiers;
/// Collection-keyed external deep-link templates.
pub mod links;
/// Validation helpers used by identifier types.
pub mod validation;

pub use coordinate::{normalize, Authority, Coordinate, Endpoint, NormalizationError, NormalizedInput};
pub use identifiers::{Did, Handle, Nsid, RecordKey};
pub use links::{ExternalLink, LinkTemplateEntry, LinkTemplateRegistry, TemplateFn};
pub use validation::ValidationError;
