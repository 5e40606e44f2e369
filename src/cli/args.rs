//! Defines the command-line arguments and subcommands for the ast-builder CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::render::QuoteStyle;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ast-builder",
    version,
    about = "Turns an ESTree program into the builder calls that reconstruct it."
)]
pub struct AstBuilderArgs {
    /// Log more (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print one builder call per top-level statement of a program.
    Convert {
        /// ESTree JSON of a Program (or a File wrapping one).
        #[arg(required = true)]
        file: PathBuf,
        /// JavaScript source the JSON was parsed from, for error spans.
        #[arg(long)]
        source: Option<PathBuf>,
        /// Object the builder calls hang off.
        #[arg(long)]
        namespace: Option<String>,
        /// Quote style for string arguments.
        #[arg(long, value_enum)]
        quote: Option<QuoteStyle>,
        /// Output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Config file (defaults to ./ast-builder.yaml when present).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Round-trip programs through the ESTree builders and compare.
    Check {
        /// A JSON file, or a directory searched for `*.json`.
        #[arg(default_value = "tests/fixtures")]
        path: PathBuf,
    },
    /// List every supported builder with its signature.
    Builders,
}
