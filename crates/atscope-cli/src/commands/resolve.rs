//! Resolve command implementation.

use super::CommandResult;
use crate::output;
use atscope_core::{normalize, NormalizedInput};
use atscope_explorer::ExplorerConfig;
use atscope_identity::IdentityResolver;

pub async fn run(config: &ExplorerConfig, input: &str, json: bool) -> CommandResult {
    let coordinate = match normalize(input)? {
        NormalizedInput::Record(coordinate) => coordinate,
        NormalizedInput::Endpoint(endpoint) => {
            // Endpoints need no resolution.
            if json {
                println!("{}", output::format_json(&endpoint));
            } else {
                println!("{}", output::format_field("ENDPOINT", &endpoint.base_url()));
            }
            return Ok(());
        }
    };

    let resolver = IdentityResolver::from_config(config.directory_config())?;
    let identity = resolver
        .resolve_serving_endpoint(&coordinate.authority)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "resolution failed");
            e.notice()
        })?;

    if json {
        println!("{}", output::format_json(&identity));
    } else {
        println!("{}", output::format_field("DID", identity.did.as_str()));
        println!("{}", output::format_field("PDS", identity.serving_endpoint.as_str()));
    }
    Ok(())
}
