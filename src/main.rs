//! Command line interface for ast-builder.
//!
//! Reads ESTree JSON produced by an external JavaScript parser and prints the
//! builder calls that reconstruct each top-level statement.

use ast_builder::cli::{self, args::AstBuilderArgs};
use clap::Parser;

fn main() {
    let args = AstBuilderArgs::parse();

    if cfg!(debug_assertions) | cfg!(test) {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init();
    } else {
        let level = match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        colog::default_builder().filter_level(level).init();
    }

    cli::run(args);
}
