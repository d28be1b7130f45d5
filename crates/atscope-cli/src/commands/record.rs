//! Record command implementation.

use super::{pds_endpoint, CommandResult};
use crate::output;
use atscope_core::{normalize, NormalizedInput};
use atscope_explorer::{Explorer, ExplorerConfig, ExplorerError, Navigation, Validity};
use atscope_render::to_text;

pub async fn run(
    config: &ExplorerConfig,
    input: &str,
    pds: Option<&str>,
    json: bool,
) -> CommandResult {
    let explorer = Explorer::from_config(config)?;

    let loaded = match pds {
        Some(pds) => {
            let endpoint = pds_endpoint(pds)?;
            // The named host serves the repository as given; nothing to resolve.
            let coordinate = match normalize(input)? {
                NormalizedInput::Record(coordinate) => coordinate,
                NormalizedInput::Endpoint(endpoint) => {
                    return Err(ExplorerError::IncompleteCoordinate(endpoint.base_url()).into())
                }
            };
            explorer.load_record_at(&endpoint, &coordinate).await
        }
        None => {
            let coordinate = match explorer.navigate(input).await {
                Ok(Navigation::Record { coordinate, .. }) => coordinate,
                Ok(Navigation::Endpoint { endpoint, .. }) => {
                    return Err(ExplorerError::IncompleteCoordinate(endpoint.base_url()).into())
                }
                Err(e) => return Err(e.notice().into()),
            };
            explorer.load_record(&coordinate).await
        }
    };
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Err(e.notice().into()),
    };

    if json {
        println!("{}", output::format_json(&loaded));
        return Ok(());
    }

    let notice = explorer.state().snapshot().notice;
    output::print_header(&loaded.record.uri);
    println!("{}", output::format_field("PDS", loaded.serving_endpoint.as_str()));
    if let Some(cid) = &loaded.record.cid {
        println!("{}", output::format_field("CID", cid));
    }
    let validity = match loaded.validity {
        Validity::Valid => "valid",
        Validity::Invalid => "invalid",
        Validity::Unknown => "not verified",
    };
    println!("{}", output::format_field("VALIDITY", validity));
    if !notice.is_empty() {
        println!("{}", output::format_field("NOTICE", &notice));
    }
    if let Some(link) = &loaded.external_link {
        println!("{}", output::format_field(&link.label, &link.link));
    }
    println!();
    print!("{}", to_text(&loaded.node));
    Ok(())
}
