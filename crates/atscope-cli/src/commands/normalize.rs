//! Normalize command implementation.

use super::CommandResult;
use crate::output;
use atscope_core::{normalize, NormalizedInput};

pub fn run(input: &str, json: bool) -> CommandResult {
    let normalized = normalize(input)?;

    if json {
        println!("{}", output::format_json(&normalized));
        return Ok(());
    }

    match &normalized {
        NormalizedInput::Record(coordinate) => {
            println!("{}", output::format_field("URI", &coordinate.to_string()));
            println!("{}", output::format_field("AUTHORITY", coordinate.authority.as_str()));
            if let Some(collection) = &coordinate.collection {
                println!("{}", output::format_field("COLLECTION", collection.as_str()));
            }
            if let Some(rkey) = &coordinate.rkey {
                println!("{}", output::format_field("RKEY", rkey.as_str()));
            }
            println!("{}", output::format_field("ROUTE", &coordinate.route()));
        }
        NormalizedInput::Endpoint(endpoint) => {
            println!("{}", output::format_field("ENDPOINT", &endpoint.base_url()));
            println!("{}", output::format_field("ROUTE", &endpoint.route()));
        }
    }
    Ok(())
}
