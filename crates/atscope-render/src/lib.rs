//! Rendering of arbitrary record values into presentation trees.
//!
//! A record value is any JSON document. The renderer walks it depth-first and
//! produces a [`PresentationNode`] tree in which:
//! - strings are classified as cross-references (`at://` URIs, DIDs),
//!   external hyperlinks, or plain text
//! - mappings are inspected once for the blob descriptor shape and gain an
//!   inline image or video when they describe one
//! - mapping keys are always listed in ascending order
//!
//! Rendering is total: every JSON value produces a node.
//!
#![deny(missing_docs)]

/// Shape classification for strings and mappings.
pub mod classify;
/// Presentation tree node types.
pub mod node;
/// The recursive value renderer.
pub mod renderer;
/// Plain-text serialization of presentation trees.
pub mod text;

pub use classify::{classify_mapping, classify_string, BlobDescriptor, BlobRef, MappingShape, StringShape};
pub use node::{BlobMedia, MappingEntry, PresentationNode};
pub use renderer::{copy_text, render, RenderOptions, ValueRenderer, DEFAULT_MAX_DEPTH};
pub use text::to_text;
