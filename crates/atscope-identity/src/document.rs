use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Service type of the repository-hosting service.
pub const PDS_SERVICE_TYPE: &str = "AtprotoPersonalDataServer";

/// Service id fragment of the repository-hosting service.
const PDS_SERVICE_FRAGMENT: &str = "#atproto_pds";

/// Service entry of a DID document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service id, usually a fragment like `#atproto_pds`.
    pub id: String,
    /// Service type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Endpoint; a URL string for every service this crate reads.
    pub service_endpoint: Value,
}

impl Service {
    /// Endpoint as a string, when it is one.
    pub fn endpoint(&self) -> Option<&str> {
        self.service_endpoint.as_str()
    }

    fn is_pds(&self) -> bool {
        self.id.ends_with(PDS_SERVICE_FRAGMENT) || self.kind == PDS_SERVICE_TYPE
    }
}

/// Verification method (signing key) of a DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Method id, `<did>#<fragment>`.
    pub id: String,
    /// Key type (`Multikey`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Controlling DID.
    #[serde(default)]
    pub controller: String,
    /// Multibase-encoded public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
}

impl VerificationMethod {
    /// `#fragment` part of the id.
    pub fn fragment(&self) -> String {
        match self.id.split_once('#') {
            Some((_, fragment)) => format!("#{}", fragment),
            None => self.id.clone(),
        }
    }
}

/// DID document describing an identity's keys, aliases and services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// The DID this document describes.
    pub id: String,
    /// Aliases, typically `at://<handle>`.
    #[serde(default)]
    pub also_known_as: Vec<String>,
    /// Signing keys.
    #[serde(default)]
    pub verification_method: Vec<VerificationMethod>,
    /// Declared services.
    #[serde(default)]
    pub service: Vec<Service>,
}

impl DidDocument {
    /// Endpoint of the repository-hosting service, if one is declared with a valid URL.
    pub fn serving_endpoint(&self) -> Option<Url> {
        self.service
            .iter()
            .filter(|s| s.is_pds())
            .find_map(|s| s.endpoint().and_then(|e| Url::parse(e).ok()))
    }

    /// Handles claimed through `at://` aliases.
    pub fn handles(&self) -> Vec<&str> {
        self.also_known_as
            .iter()
            .filter_map(|aka| aka.strip_prefix("at://"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plc_document() -> DidDocument {
        serde_json::from_value(json!({
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": "did:plc:oisofpd7lj26yvgiivf3lxsi",
            "alsoKnownAs": ["at://alice.test"],
            "verificationMethod": [{
                "id": "did:plc:oisofpd7lj26yvgiivf3lxsi#atproto",
                "type": "Multikey",
                "controller": "did:plc:oisofpd7lj26yvgiivf3lxsi",
                "publicKeyMultibase": "zQ3shXjHeiBuRCKmM36cuYnm7YEMzhGnCmCyW92sRJ9pribSF"
            }],
            "service": [{
                "id": "#atproto_pds",
                "type": "AtprotoPersonalDataServer",
                "serviceEndpoint": "https://pds.example.com"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn finds_pds_endpoint() {
        let doc = plc_document();
        assert_eq!(
            doc.serving_endpoint().unwrap().as_str(),
            "https://pds.example.com/"
        );
        assert_eq!(doc.handles(), vec!["alice.test"]);
        assert_eq!(doc.verification_method[0].fragment(), "#atproto");
    }

    #[test]
    fn pds_matched_by_type_or_fragment() {
        let mut doc = plc_document();
        doc.service[0].id = "did:web:example.com#other".into();
        assert!(doc.serving_endpoint().is_some());

        doc.service[0].kind = "BskyFeedGenerator".into();
        assert!(doc.serving_endpoint().is_none());
    }

    #[test]
    fn non_string_endpoint_is_ignored() {
        let mut doc = plc_document();
        doc.service[0].service_endpoint = json!({"uri": "https://pds.example.com"});
        assert!(doc.serving_endpoint().is_none());
    }
}
