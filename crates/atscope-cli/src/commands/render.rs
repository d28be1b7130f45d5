//! Render command implementation.

use super::{CommandError, CommandResult};
use crate::output;
use atscope_explorer::ExplorerConfig;
use atscope_render::{to_text, ValueRenderer};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;

pub fn run(config: &ExplorerConfig, file: Option<PathBuf>, repo: &str, json: bool) -> CommandResult {
    // Read JSON from file or stdin
    let json_str = match file {
        Some(path) => std::fs::read_to_string(&path).map_err(|source| CommandError::Read {
            path: path.display().to_string(),
            source,
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // serde_json rejects nesting past 128 levels, so a `(too deep)` leaf only
    // appears when `max_depth` is configured below that.
    let value: Value = serde_json::from_str(&json_str).map_err(CommandError::Json)?;
    let node = ValueRenderer::new(config.render_options()).render(&value, repo);

    if json {
        println!("{}", output::format_json(&node));
    } else {
        print!("{}", to_text(&node));
    }
    Ok(())
}
