//! Terminal output helpers for consistent CLI formatting

use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Check if color output is enabled
fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message (green checkmark)
pub fn print_success(message: &str) {
    if use_color() {
        println!("\x1b[32m✓\x1b[0m {}", message);
    } else {
        println!("OK: {}", message);
    }
}

/// Print a failure message (red cross)
pub fn print_failure(message: &str) {
    if use_color() {
        println!("\x1b[31m✗\x1b[0m {}", message);
    } else {
        println!("FAILED: {}", message);
    }
}

/// Print a warning message (yellow)
pub fn print_warning(message: &str) {
    if use_color() {
        eprintln!("\x1b[33mWarning:\x1b[0m {}", message);
    } else {
        eprintln!("Warning: {}", message);
    }
}

/// Render any serializable value as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to encode JSON output: {e}")))
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", render_json(value)?);
    Ok(())
}
