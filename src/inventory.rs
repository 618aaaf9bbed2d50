//! Writes scanner results as JSON artifacts under the output directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

/// One of the four inventory artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Components,
    I18nCoverage,
    Queries,
    Routes,
}

impl Artifact {
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Components => "components.json",
            Artifact::I18nCoverage => "i18n-coverage.json",
            Artifact::Queries => "queries.json",
            Artifact::Routes => "routes.json",
        }
    }

    /// Human-readable name used in the confirmation line.
    pub fn title(self) -> &'static str {
        match self {
            Artifact::Components => "Component inventory",
            Artifact::I18nCoverage => "I18n coverage report",
            Artifact::Queries => "Query map",
            Artifact::Routes => "Route map",
        }
    }
}

/// Serialize `value` to `<output_dir>/<artifact file>` and return the absolute path.
///
/// Uses 2-space indentation and adds a trailing newline. Parent directories
/// are created and any previous artifact is replaced. The JSON goes to a
/// sibling temp file first, so a failed write never leaves a partial artifact.
pub fn write_artifact<T: Serialize + ?Sized>(
    output_dir: &Path,
    artifact: Artifact,
    value: &T,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let path = output_dir.join(artifact.file_name());
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;

    let tmp_path = output_dir.join(format!(".{}.tmp", artifact.file_name()));
    fs::write(&tmp_path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
    if let Err(err) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("Failed to write file: {}", path.display()));
    }

    fs::canonicalize(&path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
