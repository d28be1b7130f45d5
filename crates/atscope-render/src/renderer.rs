use crate::classify::{classify_mapping, classify_string, BlobDescriptor, MappingShape, StringShape};
use crate::node::{BlobMedia, MappingEntry, PresentationNode};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Nesting depth beyond which values render as [`PresentationNode::TooDeep`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings for building media URLs and bounding recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Image CDN base URL.
    pub cdn_base: String,
    /// Video streaming base URL.
    pub video_base: String,
    /// Depth ceiling for nested values.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cdn_base: "https://cdn.bsky.app".to_string(),
            video_base: "https://video.bsky.app".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Renders record values into presentation trees.
#[derive(Debug, Clone, Default)]
pub struct ValueRenderer {
    options: RenderOptions,
}

impl ValueRenderer {
    /// Creates a renderer with the provided options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `value`, building blob media URLs under `repo_did`.
    ///
    /// Deterministic for fixed inputs and never fails.
    pub fn render(&self, value: &Value, repo_did: &str) -> PresentationNode {
        self.render_at(value, repo_did, 0)
    }

    fn render_at(&self, value: &Value, repo_did: &str, depth: usize) -> PresentationNode {
        if depth > self.options.max_depth {
            tracing::warn!(depth, "record value exceeds depth ceiling");
            return PresentationNode::TooDeep { depth };
        }

        match value {
            Value::String(s) => render_string(s),
            Value::Number(n) => PresentationNode::Number { value: n.clone() },
            Value::Bool(b) => PresentationNode::Boolean { value: *b },
            Value::Null => PresentationNode::Null,
            Value::Array(items) => PresentationNode::Sequence {
                items: items
                    .iter()
                    .map(|item| self.render_at(item, repo_did, depth + 1))
                    .collect(),
            },
            Value::Object(map) => {
                let media = match classify_mapping(value) {
                    MappingShape::ImageBlob(blob) => Some(self.image_media(&blob, repo_did)),
                    MappingShape::VideoBlob(blob) => Some(self.video_media(&blob, repo_did)),
                    MappingShape::OtherBlob(_) | MappingShape::Plain => None,
                };
                PresentationNode::Mapping {
                    media,
                    entries: self.render_entries(map, repo_did, depth),
                }
            }
        }
    }

    fn render_entries(
        &self,
        map: &Map<String, Value>,
        repo_did: &str,
        depth: usize,
    ) -> Vec<MappingEntry> {
        let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(key, child)| {
                let value = self.render_at(child, repo_did, depth + 1);
                // Past the ceiling the subtree is not listed, so nothing to copy.
                let copy_text = match value {
                    PresentationNode::TooDeep { .. } => String::new(),
                    _ => copy_text(child),
                };
                MappingEntry {
                    key: key.clone(),
                    copy_text,
                    value,
                }
            })
            .collect()
    }

    fn image_media(&self, blob: &BlobDescriptor, repo_did: &str) -> BlobMedia {
        let cid = &blob.reference.link;
        BlobMedia::Image {
            thumbnail: format!(
                "{}/img/feed_thumbnail/plain/{}/{}@jpeg",
                self.options.cdn_base, repo_did, cid
            ),
            full_size: format!(
                "{}/img/feed_fullsize/plain/{}/{}@jpeg",
                self.options.cdn_base, repo_did, cid
            ),
        }
    }

    fn video_media(&self, blob: &BlobDescriptor, repo_did: &str) -> BlobMedia {
        let cid = &blob.reference.link;
        BlobMedia::Video {
            did: repo_did.to_string(),
            cid: cid.clone(),
            playlist: format!(
                "{}/watch/{}/{}/playlist.m3u8",
                self.options.video_base, repo_did, cid
            ),
        }
    }
}

fn render_string(s: &str) -> PresentationNode {
    match classify_string(s) {
        StringShape::AtUri(route) | StringShape::Did(route) => PresentationNode::CrossReference {
            text: s.to_string(),
            route,
        },
        StringShape::Url => PresentationNode::Hyperlink {
            href: s.to_string(),
        },
        StringShape::Plain => PresentationNode::Text {
            text: s.to_string(),
        },
    }
}

/// Renders with default options.
pub fn render(value: &Value, repo_did: &str) -> PresentationNode {
    ValueRenderer::default().render(value, repo_did)
}

/// Clipboard payload for a mapping value.
///
/// The value's JSON text, with one pair of surrounding quotes removed so a
/// string copies as its bare contents.
pub fn copy_text(value: &Value) -> String {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let quoted = QUOTED.get_or_init(|| Regex::new(r#"^"(.+)"$"#).expect("invalid regex"));

    let json = serde_json::to_string(value).unwrap_or_default();
    quoted.replace(&json, "$1").into_owned()
}
