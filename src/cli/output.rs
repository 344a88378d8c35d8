//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Lines read from one input file, trailing newlines stripped.
#[derive(Debug, Serialize)]
pub struct FileLines {
    /// Path the lines were read from.
    pub path: String,
    /// Extracted lines in stream order.
    pub lines: Vec<String>,
}

/// One line emitted during interleaved reading.
#[derive(Debug, Serialize)]
pub struct InterleavedLine {
    /// Path the line was read from.
    pub path: String,
    /// Line content, trailing newline stripped.
    pub line: String,
}

/// Formats the `cat` result.
#[must_use]
pub fn format_cat(files: &[FileLines], number: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let mut line_no = 1_usize;
            for file in files {
                for line in &file.lines {
                    if number {
                        let _ = write!(output, "{line_no:>6}\t");
                        line_no += 1;
                    }
                    output.push_str(line);
                    output.push('\n');
                }
            }
            output
        }
        OutputFormat::Json => format_json(&files),
    }
}

/// Formats the `interleave` result in emission order.
#[must_use]
pub fn format_interleave(lines: &[InterleavedLine], tag: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for entry in lines {
                if tag {
                    let _ = write!(output, "{}: ", entry.path);
                }
                output.push_str(&entry.line);
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => format_json(&lines),
    }
}

/// Formats an error for the selected output format.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
    }
}

/// Serializes a value as pretty JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}
