//! Repo command implementation.

use super::{pds_endpoint, CommandError, CommandResult};
use crate::output;
use atscope_core::{normalize, NormalizedInput};
use atscope_explorer::{Explorer, ExplorerConfig};

pub async fn run(
    config: &ExplorerConfig,
    input: &str,
    pds: Option<&str>,
    json: bool,
) -> CommandResult {
    let endpoint = pds.map(pds_endpoint).transpose()?;
    let authority = match normalize(input)? {
        NormalizedInput::Record(coordinate) => coordinate.authority,
        NormalizedInput::Endpoint(endpoint) => {
            return Err(CommandError::NotARepository(endpoint.base_url()).into())
        }
    };

    let explorer = Explorer::from_config(config)?;
    let summary = match &endpoint {
        Some(endpoint) => explorer.load_repo_at(endpoint, &authority).await,
        None => explorer.load_repo(&authority).await,
    };
    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => return Err(e.notice().into()),
    };

    if json {
        println!("{}", output::format_json(&summary));
        return Ok(());
    }

    output::print_header(&summary.did);
    let handle = if summary.handle_is_correct {
        summary.handle.clone()
    } else {
        format!("{} (invalid)", summary.handle)
    };
    println!("{}", output::format_field("HANDLE", &handle));
    println!("{}", output::format_field("PDS", &summary.serving_endpoint));
    for alias in &summary.identities {
        println!("{}", output::format_field("ALIAS", alias));
    }
    for service in &summary.services {
        println!("{}", output::format_field("SERVICE", &format!("{} {}", service.id, service.endpoint)));
    }
    for key in &summary.verification_methods {
        let multibase = key.public_key_multibase.as_deref().unwrap_or("-");
        println!("{}", output::format_field("KEY", &format!("{} {}", key.id, multibase)));
    }
    if let Some(link) = &summary.did_document_link {
        println!("{}", output::format_field("DID DOC", link));
    }
    if let Some(link) = &summary.plc_log_link {
        println!("{}", output::format_field("PLC LOGS", link));
    }

    println!();
    output::print_header("COLLECTIONS");
    for collection in &summary.collections {
        println!("{:<40} {}", collection.nsid, collection.route);
    }
    Ok(())
}
