//! The repository view: collections and identity details of one repository.

use crate::errors::ExplorerError;
use crate::explorer::Explorer;
use crate::record_view::{endpoint_url, LOADING_NOTICE};
use crate::state::ViewTicket;
use atscope_core::{Authority, Coordinate, Did, Endpoint, Nsid};
use atscope_identity::DidDocument;
use serde::Serialize;
use url::Url;

/// Host of the PLC operation log browser.
pub const PLC_LOG_BASE: &str = "https://boat.kelinci.net/plc-oplogs";

/// A collection listed by the repository, with its application route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
    /// Collection NSID.
    pub nsid: String,
    /// Route of the collection view.
    pub route: String,
}

/// One service declared in the DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    /// Service id (`#atproto_pds`, ...).
    pub id: String,
    /// Service endpoint.
    pub endpoint: String,
}

/// One verification method declared in the DID document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    /// `#fragment` of the method id.
    pub id: String,
    /// Multibase-encoded public key, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
}

/// Summary of a repository for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    /// Repository DID.
    pub did: String,
    /// Current handle as reported by the repository host.
    pub handle: String,
    /// Whether the handle resolves back to the DID.
    pub handle_is_correct: bool,
    /// Serving endpoint the description came from.
    pub serving_endpoint: String,
    /// Collections holding at least one record.
    pub collections: Vec<CollectionEntry>,
    /// `alsoKnownAs` aliases.
    pub identities: Vec<String>,
    /// Declared services.
    pub services: Vec<ServiceEntry>,
    /// Declared verification methods.
    pub verification_methods: Vec<KeyEntry>,
    /// Where the DID document can be viewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_document_link: Option<String>,
    /// Operation log browser, for `did:plc` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plc_log_link: Option<String>,
}

impl Explorer {
    /// Describes the repository owned by `authority` as a new view.
    pub async fn load_repo(&self, authority: &Authority) -> Result<RepoSummary, ExplorerError> {
        let ticket = self.state.begin_view();
        self.state.set_notice(ticket, LOADING_NOTICE);

        let identity = match self.resolver.resolve_serving_endpoint(authority).await {
            Ok(identity) => identity,
            Err(e) => return self.fail(ticket, e.into()),
        };
        self.ensure_active(ticket)?;

        let pds = identity
            .serving_endpoint
            .host_str()
            .unwrap_or_default()
            .to_string();
        let repo = Authority::Did(identity.did);
        self.describe(ticket, identity.serving_endpoint, pds, &repo).await
    }

    /// Describes a repository hosted by a named endpoint, skipping identity resolution.
    pub async fn load_repo_at(
        &self,
        endpoint: &Endpoint,
        authority: &Authority,
    ) -> Result<RepoSummary, ExplorerError> {
        let ticket = self.state.begin_view();
        self.state.set_notice(ticket, LOADING_NOTICE);

        let service = match endpoint_url(endpoint) {
            Ok(service) => service,
            Err(e) => return self.fail(ticket, e),
        };
        self.describe(ticket, service, endpoint.host.clone(), authority).await
    }

    async fn describe(
        &self,
        ticket: ViewTicket,
        service: Url,
        pds: String,
        repo: &Authority,
    ) -> Result<RepoSummary, ExplorerError> {
        self.state.set_pds(ticket, Some(pds));

        let description = match self.records.describe_repo(&service, repo).await {
            Ok(description) => description,
            Err(e) => return self.fail(ticket, e.into()),
        };
        self.ensure_active(ticket)?;

        let did = Did::new(description.did.as_str());
        // Prefer the document served alongside the description; fall back to
        // the one resolution cached.
        let document = match serde_json::from_value::<DidDocument>(description.did_doc.clone()) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::debug!(error = %e, "describeRepo returned no usable didDoc");
                self.resolver
                    .cached_document(&did)
                    .await
                    .map(|d| d.as_ref().clone())
            }
        };

        self.state.set_notice(ticket, "");
        Ok(summarize(
            &did,
            &service,
            description.handle,
            description.handle_is_correct,
            description.collections,
            document.as_ref(),
        ))
    }
}

fn summarize(
    did: &Did,
    serving_endpoint: &Url,
    handle: String,
    handle_is_correct: bool,
    collections: Vec<String>,
    document: Option<&DidDocument>,
) -> RepoSummary {
    let collections = collections
        .into_iter()
        .map(|nsid| {
            let route = Coordinate {
                authority: Authority::Did(did.clone()),
                collection: Some(Nsid::new(nsid.as_str())),
                rkey: None,
            }
            .route();
            CollectionEntry { nsid, route }
        })
        .collect();

    let (identities, services, verification_methods) = match document {
        Some(doc) => (
            doc.also_known_as.clone(),
            doc.service
                .iter()
                .map(|s| ServiceEntry {
                    id: s.id.clone(),
                    endpoint: s
                        .endpoint()
                        .map(str::to_string)
                        .unwrap_or_else(|| s.service_endpoint.to_string()),
                })
                .collect(),
            doc.verification_method
                .iter()
                .map(|m| KeyEntry {
                    id: m.fragment(),
                    public_key_multibase: m.public_key_multibase.clone(),
                })
                .collect(),
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    RepoSummary {
        did: did.to_string(),
        handle,
        handle_is_correct,
        serving_endpoint: serving_endpoint.to_string(),
        collections,
        identities,
        services,
        verification_methods,
        did_document_link: did_document_link(did),
        plc_log_link: plc_log_link(did),
    }
}

/// Human-viewable location of the DID document.
pub fn did_document_link(did: &Did) -> Option<String> {
    match did.method() {
        "plc" => Some(format!("https://plc.directory/{}", did)),
        "web" => Some(format!(
            "https://{}/.well-known/did.json",
            did.method_specific_id()
        )),
        _ => None,
    }
}

/// PLC operation log browser link; `did:plc` only.
pub fn plc_log_link(did: &Did) -> Option<String> {
    (did.method() == "plc").then(|| format!("{}?q={}", PLC_LOG_BASE, did))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_links_by_method() {
        let plc = Did::new("did:plc:abc");
        assert_eq!(
            did_document_link(&plc).as_deref(),
            Some("https://plc.directory/did:plc:abc")
        );
        assert_eq!(
            plc_log_link(&plc).as_deref(),
            Some("https://boat.kelinci.net/plc-oplogs?q=did:plc:abc")
        );

        let web = Did::new("did:web:example.com");
        assert_eq!(
            did_document_link(&web).as_deref(),
            Some("https://example.com/.well-known/did.json")
        );
        assert_eq!(plc_log_link(&web), None);

        assert_eq!(did_document_link(&Did::new("did:key:z6Mk")), None);
    }
}
