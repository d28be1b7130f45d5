//! Output formatting utilities.

use serde::Serialize;

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a labelled line of a detail listing.
pub fn format_field(label: &str, value: &str) -> String {
    format!("{:<12} {}", label, value)
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("{}", title);
    println!("{}", "-".repeat(title.len().max(12)));
}
