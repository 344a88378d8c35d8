//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Commands consume the
//! assembler as an ordinary caller would: open the files, hand the raw
//! descriptors to [`LineAssembler`], and call until end-of-stream.

use crate::assembly::{FdSource, LineAssembler};
use crate::cli::output::{
    FileLines, InterleavedLine, OutputFormat, format_cat, format_interleave,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::Line;
use crate::error::{CommandError, Result};
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if a file cannot be opened or a read fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Cat { files, number } => cmd_cat(files, *number, cli.chunk_size, format),
        Commands::Interleave { files, tag } => {
            cmd_interleave(files, *tag, cli.chunk_size, format)
        }
    }
}

/// Opens a file named on the command line.
fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        CommandError::FileOpen {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Renders a line for output, trailing newline stripped.
fn render(line: &Line) -> String {
    String::from_utf8_lossy(line.without_newline()).into_owned()
}

fn cmd_cat(
    paths: &[PathBuf],
    number: bool,
    chunk_size: usize,
    format: OutputFormat,
) -> Result<String> {
    let mut assembler = LineAssembler::with_chunk_size(FdSource::new(), chunk_size)?;
    let mut files = Vec::new();

    for path in paths {
        let file = open_input(path)?;
        let fd = file.as_raw_fd();
        debug!(path = %path.display(), fd, "reading file");

        let lines = assembler.read_all_lines(fd)?;
        files.push(FileLines {
            path: path.display().to_string(),
            lines: lines.iter().map(render).collect(),
        });
    }

    Ok(format_cat(&files, number, format))
}

fn cmd_interleave(
    paths: &[PathBuf],
    tag: bool,
    chunk_size: usize,
    format: OutputFormat,
) -> Result<String> {
    let mut assembler = LineAssembler::with_chunk_size(FdSource::new(), chunk_size)?;

    // Open every input up front; the handles stay alive (and the
    // descriptors valid) until all streams are drained.
    let mut inputs = Vec::new();
    for path in paths {
        inputs.push((path.display().to_string(), open_input(path)?));
    }

    let mut active = vec![true; inputs.len()];
    let mut remaining = inputs.len();
    let mut emitted = Vec::new();

    while remaining > 0 {
        for (idx, (name, file)) in inputs.iter().enumerate() {
            if !active[idx] {
                continue;
            }
            match assembler.read_line(file.as_raw_fd())? {
                Some(line) => emitted.push(InterleavedLine {
                    path: name.clone(),
                    line: render(&line),
                }),
                None => {
                    debug!(path = %name, "stream drained");
                    active[idx] = false;
                    remaining -= 1;
                }
            }
        }
    }

    Ok(format_interleave(&emitted, tag, format))
}
