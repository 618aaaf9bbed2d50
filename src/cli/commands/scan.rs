//! The four scan commands: load, select, scan, write.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::{
    cli::args::ScanCommand,
    core::{AnalysisContext, ProjectContext, parsers::json::load_locales},
    inventory::{Artifact, write_artifact},
    scanners::{components, i18n, queries, routes},
};

pub fn components(cmd: ScanCommand) -> Result<CommandResult> {
    run_scan(&cmd, Artifact::Components, |_, ctx| {
        let records = components::scan(ctx);
        info!(components = records.len(), "component scan finished");
        Ok(records)
    })
}

pub fn i18n(cmd: ScanCommand) -> Result<CommandResult> {
    run_scan(&cmd, Artifact::I18nCoverage, |project, ctx| {
        let locales = load_locales(project.locales_dir(), &project.config.reference_locale)?;
        let report = i18n::scan(ctx, &locales);
        info!(
            used_keys = report.used_keys.len(),
            locales = locales.len(),
            "i18n scan finished"
        );
        Ok(report)
    })
}

pub fn queries(cmd: ScanCommand) -> Result<CommandResult> {
    run_scan(&cmd, Artifact::Queries, |_, ctx| {
        let records = queries::scan(ctx);
        info!(queries = records.len(), "query scan finished");
        Ok(records)
    })
}

pub fn routes(cmd: ScanCommand) -> Result<CommandResult> {
    run_scan(&cmd, Artifact::Routes, |_, ctx| {
        let nodes = routes::scan(ctx);
        info!(routes = nodes.len(), "route scan finished");
        Ok(nodes)
    })
}

/// Shared pipeline. `scan` returns the value to serialize.
fn run_scan<T, F>(cmd: &ScanCommand, artifact: Artifact, scan: F) -> Result<CommandResult>
where
    T: Serialize,
    F: FnOnce(&ProjectContext, &AnalysisContext) -> Result<T>,
{
    let project = ProjectContext::new(&cmd.common)?;
    let program = project.load_program()?;
    let selector = project.selector();
    let ctx = AnalysisContext::new(&program, &selector);

    let value = scan(&project, &ctx)?;
    let path = write_artifact(&project.output_dir(), artifact, &value)?;

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            artifact,
            path,
        }),
    })
}
