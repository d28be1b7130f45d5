//! Navigation from raw user input.

use crate::errors::ExplorerError;
use crate::explorer::Explorer;
use atscope_core::{normalize, Authority, Coordinate, Endpoint, NormalizedInput};
use serde::Serialize;

/// Where an input leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    /// An endpoint view, routed `/<host>`.
    Endpoint {
        /// The endpoint named by the input.
        endpoint: Endpoint,
        /// Application route.
        route: String,
    },
    /// A repository, collection or record view, routed `/at/<did>/...`.
    Record {
        /// The coordinate with its authority resolved to a DID.
        coordinate: Coordinate,
        /// Application route.
        route: String,
    },
}

impl Navigation {
    /// Application route of the destination.
    pub fn route(&self) -> &str {
        match self {
            Navigation::Endpoint { route, .. } | Navigation::Record { route, .. } => route,
        }
    }
}

impl Explorer {
    /// Normalizes `input` and resolves its authority so the route names a DID.
    ///
    /// The serving endpoint is resolved as well, which warms the DID
    /// document cache for the view that follows.
    pub async fn navigate(&self, input: &str) -> Result<Navigation, ExplorerError> {
        match normalize(input)? {
            NormalizedInput::Endpoint(endpoint) => {
                let route = endpoint.route();
                Ok(Navigation::Endpoint { endpoint, route })
            }
            NormalizedInput::Record(coordinate) => {
                let identity = self
                    .resolver
                    .resolve_serving_endpoint(&coordinate.authority)
                    .await?;
                let coordinate = coordinate.with_authority(Authority::Did(identity.did));
                let route = coordinate.route();
                tracing::debug!(%route, "navigating");
                Ok(Navigation::Record { coordinate, route })
            }
        }
    }
}
