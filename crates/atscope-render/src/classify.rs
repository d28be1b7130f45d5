use atscope_core::coordinate::AT_SCHEME;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// MIME type rendered with the inline video player.
pub const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Content link of a blob (`{"$link": "<cid>"}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlobRef {
    /// CID of the blob bytes.
    #[serde(rename = "$link")]
    pub link: String,
}

/// Blob descriptor embedded in a record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlobDescriptor {
    /// Type marker; `blob` for descriptors.
    #[serde(rename = "$type")]
    pub kind: String,
    /// Content link.
    #[serde(rename = "ref")]
    pub reference: BlobRef,
    /// Declared MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Structural classification of a mapping, computed once before rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingShape {
    /// Blob with an `image/*` MIME type.
    ImageBlob(BlobDescriptor),
    /// Blob with the video container MIME type.
    VideoBlob(BlobDescriptor),
    /// Blob of any other type; rendered as a plain listing.
    OtherBlob(BlobDescriptor),
    /// Anything else.
    Plain,
}

/// Classifies a mapping value. Non-mapping values are `Plain`.
pub fn classify_mapping(value: &Value) -> MappingShape {
    if !value.is_object() {
        return MappingShape::Plain;
    }
    let blob = match BlobDescriptor::deserialize(value) {
        Ok(blob) if blob.kind == "blob" => blob,
        _ => return MappingShape::Plain,
    };
    if blob.mime_type.starts_with("image/") {
        MappingShape::ImageBlob(blob)
    } else if blob.mime_type == VIDEO_MIME_TYPE {
        MappingShape::VideoBlob(blob)
    } else {
        MappingShape::OtherBlob(blob)
    }
}

/// Classification of a string leaf, in dispatch priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringShape {
    /// `at://` URI without spaces; carries the internal route.
    AtUri(String),
    /// `did:` identifier; carries the internal route.
    Did(String),
    /// Absolute URL.
    Url,
    /// Plain text.
    Plain,
}

/// Classifies a string leaf.
///
/// The `at://` test only rejects values containing a space character, not
/// general whitespace; malformed URIs without spaces still link.
pub fn classify_string(s: &str) -> StringShape {
    if let Some(rest) = s.strip_prefix(AT_SCHEME) {
        if !s.contains(' ') {
            return StringShape::AtUri(format!("/at/{}", rest));
        }
    }
    if s.starts_with("did:") {
        return StringShape::Did(format!("/at/{}", s));
    }
    if Url::parse(s).is_ok() {
        return StringShape::Url;
    }
    StringShape::Plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_blob_shape() {
        let value = json!({
            "$type": "blob",
            "ref": { "$link": "bafkreiabc" },
            "mimeType": "image/jpeg",
            "size": 1234
        });
        match classify_mapping(&value) {
            MappingShape::ImageBlob(blob) => assert_eq!(blob.reference.link, "bafkreiabc"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn video_and_other_blobs() {
        let video = json!({ "$type": "blob", "ref": { "$link": "bafy" }, "mimeType": "video/mp4" });
        assert!(matches!(classify_mapping(&video), MappingShape::VideoBlob(_)));

        let text = json!({ "$type": "blob", "ref": { "$link": "bafy" }, "mimeType": "text/plain" });
        assert!(matches!(classify_mapping(&text), MappingShape::OtherBlob(_)));
    }

    #[test]
    fn near_miss_shapes_are_plain() {
        let wrong_type = json!({ "$type": "app.bsky.embed.images", "ref": { "$link": "x" }, "mimeType": "image/png" });
        let no_link = json!({ "$type": "blob", "ref": "x", "mimeType": "image/png" });
        let no_mime = json!({ "$type": "blob", "ref": { "$link": "x" } });
        for value in [wrong_type, no_link, no_mime, json!([1, 2]), json!("blob")] {
            assert_eq!(classify_mapping(&value), MappingShape::Plain, "{}", value);
        }
    }

    #[test]
    fn string_priority() {
        assert_eq!(
            classify_string("at://did:plc:abc/app.bsky.feed.post/xyz"),
            StringShape::AtUri("/at/did:plc:abc/app.bsky.feed.post/xyz".into())
        );
        assert_eq!(classify_string("did:plc:abc"), StringShape::Did("/at/did:plc:abc".into()));
        assert_eq!(classify_string("https://example.com/a"), StringShape::Url);
        assert_eq!(classify_string("hello world"), StringShape::Plain);
    }

    #[test]
    fn at_uri_with_space_is_not_a_cross_reference() {
        assert!(!matches!(
            classify_string("at://did:plc:abc and more"),
            StringShape::AtUri(_)
        ));
    }
}
