//! Terminal output for finished commands.
//!
//! Only the confirmation line goes to stdout; diagnostics go through `tracing`.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    let message = match &result.summary {
        CommandSummary::Scan(summary) => format!(
            "{} written to {}",
            summary.artifact.title(),
            summary.path.display()
        ),
        CommandSummary::Init(summary) => format!("Created {}", summary.path.display()),
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}
