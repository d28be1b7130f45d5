use serde::Serialize;
use serde_json::Number;

/// Inline media attached to a mapping that describes a blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "media", rename_all = "snake_case")]
pub enum BlobMedia {
    /// Image thumbnail with a link to the full-size asset.
    Image {
        /// Thumbnail URL.
        thumbnail: String,
        /// Full-size asset URL, opened in a new context.
        full_size: String,
    },
    /// Video player source.
    Video {
        /// Repository that owns the blob.
        did: String,
        /// Content link of the blob.
        cid: String,
        /// Streaming playlist URL.
        playlist: String,
    },
}

/// One `key: value` line of a mapping listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingEntry {
    /// Mapping key.
    pub key: String,
    /// Text placed on the clipboard when the key is activated.
    pub copy_text: String,
    /// Rendered value.
    pub value: PresentationNode,
}

/// Node of a rendered record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationNode {
    /// Uninterpreted string.
    Text {
        /// The string.
        text: String,
    },
    /// Navigable link to another view of this application.
    CrossReference {
        /// Displayed string.
        text: String,
        /// Internal route (`/at/...`).
        route: String,
    },
    /// External URL, opened in a new context.
    Hyperlink {
        /// Link target and displayed text.
        href: String,
    },
    /// Numeric literal.
    Number {
        /// The number as parsed.
        value: Number,
    },
    /// Boolean literal.
    Boolean {
        /// The flag.
        value: bool,
    },
    /// JSON `null`.
    Null,
    /// Ordered list of rendered elements.
    Sequence {
        /// Elements in source order.
        items: Vec<PresentationNode>,
    },
    /// Key/value listing, optionally preceded by blob media.
    Mapping {
        /// Inline media when the mapping is an image or video blob.
        #[serde(skip_serializing_if = "Option::is_none")]
        media: Option<BlobMedia>,
        /// Entries in ascending key order.
        entries: Vec<MappingEntry>,
    },
    /// Placeholder for a value nested beyond the depth ceiling.
    TooDeep {
        /// Depth at which rendering stopped.
        depth: usize,
    },
}

impl PresentationNode {
    /// Keys of a mapping node in listing order; empty for other nodes.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            PresentationNode::Mapping { entries, .. } => {
                entries.iter().map(|e| e.key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Looks up the rendered value of a mapping entry.
    pub fn get(&self, key: &str) -> Option<&PresentationNode> {
        match self {
            PresentationNode::Mapping { entries, .. } => {
                entries.iter().find(|e| e.key == key).map(|e| &e.value)
            }
            _ => None,
        }
    }

    /// Blob media of a mapping node.
    pub fn media(&self) -> Option<&BlobMedia> {
        match self {
            PresentationNode::Mapping { media, .. } => media.as_ref(),
            _ => None,
        }
    }
}
