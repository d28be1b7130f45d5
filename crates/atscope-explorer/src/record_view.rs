//! The record view: resolve, fetch, authenticate, render, link.

use crate::errors::ExplorerError;
use crate::explorer::Explorer;
use crate::state::ViewTicket;
use crate::verify::Validity;
use crate::xrpc::RecordOutput;
use atscope_core::{
    Authority, Coordinate, Endpoint, ExternalLink, NormalizationError, Nsid, RecordKey,
};
use atscope_identity::{DidDocument, ResolutionError};
use atscope_render::PresentationNode;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Notice shown while a record is being fetched.
pub const LOADING_NOTICE: &str = "Loading...";
/// Notice shown while a fetched record is being authenticated.
pub const VALIDATING_NOTICE: &str = "Validating...";

/// A fetched and rendered record.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedRecord {
    /// Coordinate the view was opened with.
    pub coordinate: Coordinate,
    /// Repository the record was requested from: the resolved DID, or the
    /// authority as given when the serving endpoint was named directly.
    pub repo: Authority,
    /// Endpoint the record was fetched from.
    pub serving_endpoint: Url,
    /// Raw `getRecord` output.
    pub record: RecordOutput,
    /// Outcome of authentication.
    pub validity: Validity,
    /// Third-party deep link; absent when authentication failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_link: Option<ExternalLink>,
    /// Presentation tree of the whole `getRecord` output.
    pub node: PresentationNode,
    /// Ticket of the view that produced this record.
    #[serde(skip)]
    pub ticket: ViewTicket,
}

/// Request target shared by both record view entry points.
struct RecordRequest<'a> {
    coordinate: &'a Coordinate,
    repo: Authority,
    service: Url,
    pds: String,
    collection: &'a Nsid,
    rkey: &'a RecordKey,
}

impl Explorer {
    /// Loads the record named by `coordinate` as a new view.
    ///
    /// The coordinate must carry a collection and a record key. Progress and
    /// failures are published as notices on the state store; an
    /// authentication failure still yields the record, flagged invalid.
    pub async fn load_record(&self, coordinate: &Coordinate) -> Result<LoadedRecord, ExplorerError> {
        let ticket = self.begin_record_view();
        let (collection, rkey) = self.record_path(ticket, coordinate)?;

        let identity = match self
            .resolver
            .resolve_serving_endpoint(&coordinate.authority)
            .await
        {
            Ok(identity) => identity,
            Err(e) => return self.fail(ticket, e.into()),
        };
        self.ensure_active(ticket)?;

        let pds = identity
            .serving_endpoint
            .host_str()
            .unwrap_or_default()
            .to_string();
        let request = RecordRequest {
            coordinate,
            repo: Authority::Did(identity.did),
            service: identity.serving_endpoint,
            pds,
            collection,
            rkey,
        };
        self.fetch_record(ticket, request).await
    }

    /// Loads a record from a named serving endpoint, skipping identity resolution.
    pub async fn load_record_at(
        &self,
        endpoint: &Endpoint,
        coordinate: &Coordinate,
    ) -> Result<LoadedRecord, ExplorerError> {
        let ticket = self.begin_record_view();
        let (collection, rkey) = self.record_path(ticket, coordinate)?;

        let service = match endpoint_url(endpoint) {
            Ok(service) => service,
            Err(e) => return self.fail(ticket, e),
        };
        let request = RecordRequest {
            coordinate,
            repo: coordinate.authority.clone(),
            service,
            pds: endpoint.host.clone(),
            collection,
            rkey,
        };
        self.fetch_record(ticket, request).await
    }

    fn begin_record_view(&self) -> ViewTicket {
        let ticket = self.state.begin_view();
        self.state.set_notice(ticket, LOADING_NOTICE);
        self.state.set_validity(ticket, Validity::Unknown);
        ticket
    }

    fn record_path<'c>(
        &self,
        ticket: ViewTicket,
        coordinate: &'c Coordinate,
    ) -> Result<(&'c Nsid, &'c RecordKey), ExplorerError> {
        match (&coordinate.collection, &coordinate.rkey) {
            (Some(collection), Some(rkey)) => Ok((collection, rkey)),
            _ => self.fail(
                ticket,
                ExplorerError::IncompleteCoordinate(coordinate.to_string()),
            ),
        }
    }

    async fn fetch_record(
        &self,
        ticket: ViewTicket,
        request: RecordRequest<'_>,
    ) -> Result<LoadedRecord, ExplorerError> {
        self.state.set_pds(ticket, Some(request.pds));

        let record = match self
            .records
            .get_record(&request.service, &request.repo, request.collection, request.rkey)
            .await
        {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(uri = %request.coordinate, error = %e, "record fetch failed");
                self.state.set_validity(ticket, Validity::Invalid);
                return self.fail(ticket, e.into());
            }
        };
        self.ensure_active(ticket)?;
        self.state.set_notice(ticket, VALIDATING_NOTICE);

        let repo = record_repo(&record.uri).unwrap_or_else(|| request.repo.as_str());
        let validity = self.authenticate(ticket, repo, &record).await?;

        let external_link = match validity {
            Validity::Invalid => None,
            _ => self.links.apply_uri(&record.uri),
        };
        let value = serde_json::to_value(&record).unwrap_or_default();
        let node = self.renderer.render(&value, repo);

        if validity != Validity::Invalid {
            self.state.set_notice(ticket, "");
        }
        tracing::info!(uri = %record.uri, ?validity, "record loaded");

        Ok(LoadedRecord {
            coordinate: request.coordinate.clone(),
            repo: request.repo,
            serving_endpoint: request.service,
            record,
            validity,
            external_link,
            node,
            ticket,
        })
    }

    /// Runs the verifier against the DID document of `repo`.
    ///
    /// A document that cannot be obtained fails authentication.
    async fn authenticate(
        &self,
        ticket: ViewTicket,
        repo: &str,
        record: &RecordOutput,
    ) -> Result<Validity, ExplorerError> {
        let Some(verifier) = &self.verifier else {
            return Ok(Validity::Unknown);
        };

        let outcome = match self.repo_document(repo).await {
            Ok(document) => verifier.verify(record, &document).await,
            Err(e) => Err(e.notice().to_string()),
        };
        self.ensure_active(ticket)?;

        let validity = match outcome {
            Ok(()) => Validity::Valid,
            Err(reason) => {
                tracing::warn!(uri = %record.uri, %reason, "record failed authentication");
                self.state.set_notice(ticket, reason);
                Validity::Invalid
            }
        };
        self.state.set_validity(ticket, validity);
        Ok(validity)
    }

    async fn repo_document(&self, repo: &str) -> Result<Arc<DidDocument>, ResolutionError> {
        let did = self.resolver.resolve_did(&Authority::classify(repo)).await?;
        self.resolver.did_document(&did).await
    }
}

/// Request URL of a named endpoint.
pub(crate) fn endpoint_url(endpoint: &Endpoint) -> Result<Url, ExplorerError> {
    Url::parse(&endpoint.base_url())
        .map_err(|_| NormalizationError::InvalidEndpoint(endpoint.host.clone()).into())
}

/// Repository segment of a record URI (`at://<repo>/...`).
fn record_repo(uri: &str) -> Option<&str> {
    uri.split('/').nth(2).filter(|repo| !repo.is_empty())
}
