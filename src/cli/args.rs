//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `components`: write the component inventory
//! - `i18n`: write the translation coverage report
//! - `queries`: write the data-fetching query map
//! - `routes`: write the route map
//! - `init`: create a `.stocktakerc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Components(cmd))
            | Some(Command::I18n(cmd))
            | Some(Command::Queries(cmd))
            | Some(Command::Routes(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all scan commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Frontend project root (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inventory exported components with their props, hooks and flags
    Components(ScanCommand),
    /// Compare translation keys used in code against locale files
    I18n(ScanCommand),
    /// List data-fetching hook calls and their cache keys
    Queries(ScanCommand),
    /// Extract the route tree from the router configuration
    Routes(ScanCommand),
    /// Initialize a new .stocktakerc.json configuration file
    Init,
}
