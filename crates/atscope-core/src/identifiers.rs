use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Self::is_valid(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns true if `value` matches the identifier syntax.
            pub fn is_valid(value: &str) -> bool {
                Regex::new($pattern).expect("invalid regex").is_match(value)
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    Did,
    "Decentralized identifier such as `did:plc:oisofpd7lj26yvgiivf3lxsi` or `did:web:example.com`.",
    r"^did:[a-z]+:[a-zA-Z0-9._:%-]*[a-zA-Z0-9._-]$"
);
newtype!(
    Handle,
    "DNS-shaped account alias like `alice.bsky.social`.",
    r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$"
);
newtype!(
    Nsid,
    "Namespaced collection identifier like `app.bsky.feed.post`.",
    r"^[a-zA-Z]([a-zA-Z0-9-]{0,62})?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,62})?)+\.[a-zA-Z][a-zA-Z0-9]{0,62}$"
);
newtype!(
    RecordKey,
    "Opaque key of one record within a collection (`3l2zpbbhuvw2h`, `self`).",
    r"^[A-Za-z0-9._:~-]{1,512}$"
);

impl Did {
    /// Returns the DID method (`plc`, `web`, ...).
    pub fn method(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or("")
    }

    /// Returns the method-specific identifier (everything after `did:<method>:`).
    pub fn method_specific_id(&self) -> &str {
        self.0.splitn(3, ':').nth(2).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_parts() {
        let did = Did::parse("did:web:example.com").unwrap();
        assert_eq!(did.method(), "web");
        assert_eq!(did.method_specific_id(), "example.com");
    }

    #[test]
    fn handle_rejects_single_label() {
        assert!(Handle::parse("alice.example.com").is_ok());
        assert!(matches!(
            Handle::parse("alice"),
            Err(ValidationError::PatternMismatch { field: "Handle", .. })
        ));
    }

    #[test]
    fn nsid_needs_three_segments() {
        assert!(Nsid::is_valid("app.bsky.feed.post"));
        assert!(Nsid::is_valid("blue.linkat.board"));
        assert!(!Nsid::is_valid("app.bsky"));
        assert!(!Nsid::is_valid("post"));
    }

    #[test]
    fn record_key_charset() {
        assert!(RecordKey::is_valid("3l2zpbbhuvw2h"));
        assert!(RecordKey::is_valid("self"));
        assert!(!RecordKey::is_valid("has space"));
        assert!(!RecordKey::is_valid(""));
    }
}
