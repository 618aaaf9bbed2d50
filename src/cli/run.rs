use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, scan},
};

/// Dispatch to the command handler. Each scan is an independent run.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Components(cmd)) => scan::components(cmd),
        Some(Command::I18n(cmd)) => scan::i18n(cmd),
        Some(Command::Queries(cmd)) => scan::queries(cmd),
        Some(Command::Routes(cmd)) => scan::routes(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
