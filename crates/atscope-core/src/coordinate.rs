use crate::identifiers::{Did, Handle, Nsid, RecordKey};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// Scheme marker of AT URIs.
pub const AT_SCHEME: &str = "at://";

/// Collection substituted for the `/post/` segment of first-party post URLs.
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// Origins of the first-party web front-ends whose URLs name records rather than nodes.
const FIRST_PARTY_ORIGINS: [&str; 2] = ["https://bsky.app/", "https://main.bsky.dev/"];

/// Profile URL prefixes stripped down to the bare authority.
const PROFILE_PREFIXES: [&str; 2] = [
    "https://bsky.app/profile/",
    "https://main.bsky.dev/profile/",
];

/// Errors returned when user input cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// Nothing remained after trimming and stripping prefixes.
    #[error("input is empty")]
    Empty,
    /// A path segment between two separators was empty (`alice//rkey`).
    #[error("empty path segment in '{0}'")]
    EmptySegment(String),
    /// More than `authority/collection/rkey` was supplied.
    #[error("too many path segments in '{0}'")]
    TooManySegments(String),
    /// A first-party URL that is not a profile or post link.
    #[error("unsupported first-party URL '{0}'")]
    UnsupportedUrl(String),
    /// An absolute URL that does not name a host.
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),
    /// A string that is not a complete `at://repo/collection/rkey` URI.
    #[error("not a record AT URI: '{0}'")]
    NotAnAtUri(String),
}

/// The repository a coordinate points into: a DID or a handle that resolves to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Authority {
    /// A decentralized identifier.
    Did(Did),
    /// A handle that still needs resolution.
    Handle(Handle),
}

impl Authority {
    /// Classifies a raw authority segment by its `did:` prefix; no syntax validation.
    pub fn classify(segment: &str) -> Self {
        if segment.starts_with("did:") {
            Authority::Did(Did::new(segment))
        } else {
            Authority::Handle(Handle::new(segment))
        }
    }

    /// Returns the authority as it appears in URIs.
    pub fn as_str(&self) -> &str {
        match self {
            Authority::Did(did) => did.as_str(),
            Authority::Handle(handle) => handle.as_str(),
        }
    }

    /// Returns the DID when the authority is already one.
    pub fn as_did(&self) -> Option<&Did> {
        match self {
            Authority::Did(did) => Some(did),
            Authority::Handle(_) => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Authority::Did(did) => Did::parse(did.as_str()).map(|_| ()),
            Authority::Handle(handle) => Handle::parse(handle.as_str()).map(|_| ()),
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical location of a repository, a collection, or a single record.
///
/// `rkey` is only ever present together with `collection`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Repository owner.
    pub authority: Authority,
    /// Collection NSID, if the coordinate goes deeper than the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Nsid>,
    /// Record key within the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rkey: Option<RecordKey>,
}

impl Coordinate {
    /// Coordinate naming a whole repository.
    pub fn repo(authority: Authority) -> Self {
        Self {
            authority,
            collection: None,
            rkey: None,
        }
    }

    /// Coordinate naming one record.
    pub fn record(authority: Authority, collection: Nsid, rkey: RecordKey) -> Self {
        Self {
            authority,
            collection: Some(collection),
            rkey: Some(rkey),
        }
    }

    /// Splits `authority[/collection[/rkey]]` into a coordinate.
    ///
    /// Trailing separators are ignored; empty inner segments are rejected.
    pub fn from_path(path: &str) -> Result<Self, NormalizationError> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(NormalizationError::Empty);
        }

        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.len() > 3 {
            return Err(NormalizationError::TooManySegments(path.to_string()));
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(NormalizationError::EmptySegment(path.to_string()));
        }

        Ok(Self {
            authority: Authority::classify(segments[0]),
            collection: segments.get(1).map(|s| Nsid::new(*s)),
            rkey: segments.get(2).map(|s| RecordKey::new(*s)),
        })
    }

    /// Parses a complete record URI of the form `at://repo/collection/rkey`.
    pub fn from_at_uri(uri: &str) -> Result<Self, NormalizationError> {
        let parts: Vec<&str> = uri.split('/').collect();
        // expected: ["at:", "", repo, collection, rkey]
        if parts.len() != 5 || parts[0] != "at:" || !parts[1].is_empty() {
            return Err(NormalizationError::NotAnAtUri(uri.to_string()));
        }
        if parts[2..].iter().any(|s| s.is_empty()) {
            return Err(NormalizationError::NotAnAtUri(uri.to_string()));
        }
        Ok(Self::record(
            Authority::classify(parts[2]),
            Nsid::new(parts[3]),
            RecordKey::new(parts[4]),
        ))
    }

    /// Returns the same coordinate rooted at a different authority.
    pub fn with_authority(&self, authority: Authority) -> Self {
        Self {
            authority,
            collection: self.collection.clone(),
            rkey: self.rkey.clone(),
        }
    }

    /// Returns the coordinate path without scheme: `authority[/collection[/rkey]]`.
    pub fn path(&self) -> String {
        let mut path = self.authority.as_str().to_string();
        if let Some(collection) = &self.collection {
            path.push('/');
            path.push_str(collection.as_str());
            if let Some(rkey) = &self.rkey {
                path.push('/');
                path.push_str(rkey.as_str());
            }
        }
        path
    }

    /// Internal application route for this coordinate (`/at/<path>`).
    pub fn route(&self) -> String {
        format!("/at/{}", self.path())
    }

    /// Strictly validates every part of the coordinate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.authority.validate()?;
        match (&self.collection, &self.rkey) {
            (None, Some(rkey)) => Err(ValidationError::DanglingRecordKey(rkey.to_string())),
            (Some(collection), rkey) => {
                Nsid::parse(collection.as_str())?;
                if let Some(rkey) = rkey {
                    RecordKey::parse(rkey.as_str())?;
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", AT_SCHEME, self.path())
    }
}

/// A network node named directly by the user, e.g. a PDS host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Host, with `:port` when one was given.
    pub host: String,
}

impl Endpoint {
    /// Wraps a bare host (`pds.example.com`, `localhost:2583`).
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// Extracts the host of an absolute URL; path, query and fragment are discarded.
    pub fn from_url(input: &str) -> Result<Self, NormalizationError> {
        let url = Url::parse(input)
            .map_err(|_| NormalizationError::InvalidEndpoint(input.to_string()))?;
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| NormalizationError::InvalidEndpoint(input.to_string()))?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Ok(Self { host })
    }

    /// Base URL for requests; plain HTTP only for `localhost`.
    pub fn base_url(&self) -> String {
        if self.host.starts_with("localhost") {
            format!("http://{}", self.host)
        } else {
            format!("https://{}", self.host)
        }
    }

    /// Internal application route for the endpoint view.
    pub fn route(&self) -> String {
        format!("/{}", self.host)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

/// Outcome of normalizing user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedInput {
    /// A repository, collection or record coordinate.
    Record(Coordinate),
    /// A direct reference to a network node.
    Endpoint(Endpoint),
}

/// Normalizes free-form input into a coordinate or an endpoint reference.
///
/// Accepts bare DIDs and handles, AT URIs with or without `at://`, and
/// first-party profile/post URLs. Any other absolute `http(s)` URL is an
/// endpoint reference. Deterministic and free of I/O.
pub fn normalize(input: &str) -> Result<NormalizedInput, NormalizationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(NormalizationError::Empty);
    }

    let first_party = FIRST_PARTY_ORIGINS.iter().any(|o| input.starts_with(o));
    if !first_party && (input.starts_with("https://") || input.starts_with("http://")) {
        return Endpoint::from_url(input).map(NormalizedInput::Endpoint);
    }

    let mut rest = input.strip_prefix(AT_SCHEME).unwrap_or(input);
    if first_party {
        rest = PROFILE_PREFIXES
            .iter()
            .find_map(|prefix| rest.strip_prefix(prefix))
            .ok_or_else(|| NormalizationError::UnsupportedUrl(input.to_string()))?;
    }

    let rewritten = rest.replacen("/post/", &format!("/{}/", POST_COLLECTION), 1);
    Coordinate::from_path(&rewritten).map(NormalizedInput::Record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str) -> Coordinate {
        match normalize(input).unwrap() {
            NormalizedInput::Record(c) => c,
            other => panic!("expected coordinate, got {:?}", other),
        }
    }

    #[test]
    fn bare_did_is_authority_only() {
        let c = record("did:plc:oisofpd7lj26yvgiivf3lxsi");
        assert_eq!(
            c.authority,
            Authority::Did(Did::new("did:plc:oisofpd7lj26yvgiivf3lxsi"))
        );
        assert!(c.collection.is_none());
        assert!(c.rkey.is_none());
    }

    #[test]
    fn bare_handle_is_authority_only() {
        let c = record("alice.example.com");
        assert_eq!(c.authority, Authority::Handle(Handle::new("alice.example.com")));
    }

    #[test]
    fn at_uri_with_and_without_scheme() {
        let with = record("at://did:plc:abc/app.bsky.feed.post/xyz");
        let without = record("did:plc:abc/app.bsky.feed.post/xyz");
        assert_eq!(with, without);
        assert_eq!(with.collection.unwrap().as_str(), "app.bsky.feed.post");
        assert_eq!(with.rkey.unwrap().as_str(), "xyz");
    }

    #[test]
    fn profile_post_url_is_rewritten() {
        let c = record("https://bsky.app/profile/mary.my.id/post/3kenlltlvus2u");
        assert_eq!(c.authority.as_str(), "mary.my.id");
        assert_eq!(c.collection.unwrap().as_str(), POST_COLLECTION);
        assert_eq!(c.rkey.unwrap().as_str(), "3kenlltlvus2u");

        let mirror = record("https://main.bsky.dev/profile/did:plc:abc");
        assert_eq!(mirror, Coordinate::repo(Authority::classify("did:plc:abc")));
    }

    #[test]
    fn foreign_urls_are_endpoints() {
        assert_eq!(
            normalize("https://pds.bsky.mom").unwrap(),
            NormalizedInput::Endpoint(Endpoint::new("pds.bsky.mom"))
        );
        assert_eq!(
            normalize("http://localhost:2583/xrpc").unwrap(),
            NormalizedInput::Endpoint(Endpoint::new("localhost:2583"))
        );
    }

    #[test]
    fn localhost_uses_plain_http() {
        assert_eq!(Endpoint::new("localhost:2583").base_url(), "http://localhost:2583");
        assert_eq!(Endpoint::new("pds.bsky.mom").base_url(), "https://pds.bsky.mom");
        assert_eq!(Endpoint::new("pds.bsky.mom").route(), "/pds.bsky.mom");
    }

    #[test]
    fn first_party_non_profile_url_is_rejected() {
        assert!(matches!(
            normalize("https://bsky.app/settings"),
            Err(NormalizationError::UnsupportedUrl(_))
        ));
    }

    #[test]
    fn empty_and_malformed_inputs() {
        assert_eq!(normalize("   "), Err(NormalizationError::Empty));
        assert_eq!(normalize("at://"), Err(NormalizationError::Empty));
        assert!(matches!(
            normalize("alice.test//xyz"),
            Err(NormalizationError::EmptySegment(_))
        ));
        assert!(matches!(
            normalize("alice.test/a.b.c/xyz/extra"),
            Err(NormalizationError::TooManySegments(_))
        ));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        assert_eq!(record("alice.test/app.bsky.feed.like/"), record("alice.test/app.bsky.feed.like"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "did:plc:abc",
            "alice.test/app.bsky.feed.post",
            "at://did:plc:abc/app.bsky.feed.post/xyz",
            "https://bsky.app/profile/alice.test/post/3kenlltlvus2u",
            "alice.test/post",
        ];
        for input in inputs {
            let once = record(input);
            let twice = record(&once.to_string());
            assert_eq!(once, twice, "input {}", input);
        }
    }

    #[test]
    fn strict_at_uri_parsing() {
        let c = Coordinate::from_at_uri("at://did:plc:abc/app.bsky.feed.post/xyz").unwrap();
        assert_eq!(c.route(), "/at/did:plc:abc/app.bsky.feed.post/xyz");
        assert!(Coordinate::from_at_uri("at://did:plc:abc/app.bsky.feed.post").is_err());
        assert!(Coordinate::from_at_uri("did:plc:abc/app.bsky.feed.post/xyz").is_err());
    }

    #[test]
    fn validate_checks_every_part() {
        assert!(record("alice.test/app.bsky.feed.post/xyz").validate().is_ok());
        assert!(record("alice/app.bsky.feed.post/xyz").validate().is_err());
        assert!(record("alice.test/post").validate().is_err());
        let dangling = Coordinate {
            authority: Authority::classify("alice.test"),
            collection: None,
            rkey: Some(RecordKey::new("xyz")),
        };
        assert_eq!(
            dangling.validate(),
            Err(ValidationError::DanglingRecordKey("xyz".into()))
        );
    }
}
