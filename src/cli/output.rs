//! Handles all user-facing output for the CLI.
//!
//! Colors go through `termcolor` so they disappear when stdout is not a
//! terminal; the check report's diffs come from `difference`.

use difference::{Changeset, Difference};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::registry::signatures;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints lines verbatim to stdout.
pub fn print_lines(lines: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Prints `ok   <label>` in green or `FAILED <label>` in red.
pub fn print_status(passed: bool, label: &str, detail: Option<&str>) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let (color, word) = if passed {
        (Color::Green, "ok    ")
    } else {
        (Color::Red, "FAILED")
    };
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stdout, "{}", word)?;
    stdout.reset()?;
    match detail {
        Some(detail) => writeln!(stdout, " {}: {}", label, detail),
        None => writeln!(stdout, " {}", label),
    }
}

/// Prints a colored line diff from `expected` to `actual`.
pub fn print_mismatch(expected: &str, actual: &str) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let changeset = Changeset::new(expected, actual, "\n");
    print_diff(&mut stdout, &changeset.diffs)
}

/// Prints the builder table, one `Tag  builder(params)` row per node type.
pub fn print_signatures() -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let width = signatures().map(|s| s.node_type.tag().len()).max().unwrap_or(0);
    for sig in signatures() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{:<width$}", sig.node_type.tag(), width = width)?;
        stdout.reset()?;
        writeln!(stdout, "  {}", sig)?;
    }
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_diff(stdout: &mut StandardStream, diffs: &[Difference]) -> io::Result<()> {
    for diff in diffs {
        match diff {
            Difference::Same(x) => {
                stdout.reset()?;
                for line in x.lines() {
                    writeln!(stdout, " {}", line)?;
                }
            }
            Difference::Add(x) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                for line in x.lines() {
                    writeln!(stdout, "+{}", line)?;
                }
            }
            Difference::Rem(x) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                for line in x.lines() {
                    writeln!(stdout, "-{}", line)?;
                }
            }
        }
    }
    stdout.reset()
}
