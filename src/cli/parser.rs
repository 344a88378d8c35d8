//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::assembly::DEFAULT_CHUNK_SIZE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lineq-rs: buffered line extraction over raw file descriptors.
///
/// Reads files one line at a time through per-descriptor byte queues,
/// demonstrating interleaved reading from independent descriptors.
#[derive(Parser, Debug)]
#[command(name = "lineq-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bytes requested per underlying read.
    ///
    /// Any value >= 1 produces identical output; smaller values cost more
    /// reads.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "LINEQ_CHUNK_SIZE", global = true)]
    pub chunk_size: usize,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print each file line by line, one file after another.
    Cat {
        /// Files to read.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number the output lines.
        #[arg(short = 'n', long)]
        number: bool,
    },

    /// Alternate between files, reading one line from each per round.
    ///
    /// Exercises multi-descriptor isolation: pending bytes of one file are
    /// never mixed into another file's lines.
    Interleave {
        /// Files to read.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Prefix each line with its source file name.
        #[arg(short, long)]
        tag: bool,
    },
}
