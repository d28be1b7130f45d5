//! Plain-text serialization of presentation trees.
//!
//! One line per scalar, two spaces of indentation per nesting level.
//! Cross-references are printed as `text -> route`, hyperlinks in angle
//! brackets.

use crate::node::{BlobMedia, PresentationNode};
use std::fmt::Write;

/// Formats a node tree as indented text.
pub fn to_text(node: &PresentationNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn inline(node: &PresentationNode) -> Option<String> {
    match node {
        PresentationNode::Text { text } => Some(text.clone()),
        PresentationNode::CrossReference { text, route } => Some(format!("{} -> {}", text, route)),
        PresentationNode::Hyperlink { href } => Some(format!("<{}>", href)),
        PresentationNode::Number { value } => Some(value.to_string()),
        PresentationNode::Boolean { value } => Some(value.to_string()),
        PresentationNode::Null => Some("null".to_string()),
        PresentationNode::TooDeep { .. } => Some("(too deep)".to_string()),
        PresentationNode::Sequence { items } if items.is_empty() => Some("[]".to_string()),
        PresentationNode::Mapping { media: None, entries } if entries.is_empty() => {
            Some("{}".to_string())
        }
        _ => None,
    }
}

fn write_node(out: &mut String, node: &PresentationNode, indent: usize) {
    let pad = "  ".repeat(indent);

    if let Some(line) = inline(node) {
        let _ = writeln!(out, "{}{}", pad, line);
        return;
    }

    match node {
        PresentationNode::Sequence { items } => {
            for item in items {
                match inline(item) {
                    Some(line) => {
                        let _ = writeln!(out, "{}- {}", pad, line);
                    }
                    None => {
                        let _ = writeln!(out, "{}-", pad);
                        write_node(out, item, indent + 1);
                    }
                }
            }
        }
        PresentationNode::Mapping { media, entries } => {
            match media {
                Some(BlobMedia::Image {
                    thumbnail,
                    full_size,
                }) => {
                    let _ = writeln!(out, "{}[image] <{}> full size <{}>", pad, thumbnail, full_size);
                }
                Some(BlobMedia::Video { playlist, .. }) => {
                    let _ = writeln!(out, "{}[video] <{}>", pad, playlist);
                }
                None => {}
            }
            for entry in entries {
                match inline(&entry.value) {
                    Some(line) => {
                        let _ = writeln!(out, "{}{}: {}", pad, entry.key, line);
                    }
                    None => {
                        let _ = writeln!(out, "{}{}:", pad, entry.key);
                        write_node(out, &entry.value, indent + 1);
                    }
                }
            }
        }
        _ => {}
    }
}
