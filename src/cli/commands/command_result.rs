use std::path::PathBuf;

use crate::inventory::Artifact;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub artifact: Artifact,
    /// Absolute path of the written artifact.
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    /// Config file as written, relative to the working directory.
    pub path: PathBuf,
}

/// Result of running a stocktake command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}
