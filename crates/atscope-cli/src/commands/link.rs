//! Link command implementation.

use super::{CommandError, CommandResult};
use atscope_core::LinkTemplateRegistry;

pub fn run(uri: &str) -> CommandResult {
    let link = LinkTemplateRegistry::new()
        .apply_uri(uri)
        .ok_or_else(|| CommandError::NoLink(uri.to_string()))?;
    println!("{}: {}", link.label, link.link);
    Ok(())
}
