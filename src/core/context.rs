use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use swc_common::Span;
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        checker::TypeChecker,
        file_selector::SourceFileSelector,
        program::{Program, SourceFile},
    },
};

/// Project-level settings for a single run.
///
/// Configuration is loaded from `.stocktakerc.json` (searched upward from the
/// project root) and falls back to built-in defaults.
pub struct ProjectContext {
    pub config: Config,
    /// Absolute project root; every configured path is relative to it.
    pub root_dir: PathBuf,
}

impl ProjectContext {
    /// Create a context from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the root does not exist or the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_root(&root)
    }

    pub fn from_root(root: &Path) -> Result<Self> {
        let root_dir = fs::canonicalize(root)
            .with_context(|| format!("Project root not found: {}", root.display()))?;

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("no .stocktakerc.json found, using default configuration");
        }

        Ok(Self {
            config: config_result.config,
            root_dir,
        })
    }

    pub fn tsconfig_path(&self) -> PathBuf {
        self.config.resolve(&self.root_dir, &self.config.tsconfig)
    }

    pub fn source_root(&self) -> PathBuf {
        self.config.resolve(&self.root_dir, &self.config.source_root)
    }

    pub fn locales_dir(&self) -> PathBuf {
        self.config.resolve(&self.root_dir, &self.config.locales_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.resolve(&self.root_dir, &self.config.output_dir)
    }

    /// Load and parse every file reachable from the compiler configuration.
    pub fn load_program(&self) -> Result<Program> {
        let program = Program::load(&self.root_dir, &self.tsconfig_path())?;
        info!(files = program.files().len(), "program loaded");
        Ok(program)
    }

    pub fn selector(&self) -> SourceFileSelector {
        SourceFileSelector::new(self.source_root(), self.config.ignore_test_files)
    }
}

/// Everything a scanner needs: the program, its type checker and the selected files.
///
/// Passed explicitly to each scanner so independent runs never share state.
pub struct AnalysisContext<'p> {
    pub program: &'p Program,
    pub checker: TypeChecker<'p>,
    files: Vec<&'p SourceFile>,
}

impl<'p> AnalysisContext<'p> {
    pub fn new(program: &'p Program, selector: &SourceFileSelector) -> Self {
        let files: Vec<&'p SourceFile> = selector.select(program).collect();
        debug!(selected = files.len(), "source files selected");

        Self {
            program,
            checker: TypeChecker::new(program),
            files,
        }
    }

    /// Selected application files, in program order.
    pub fn files(&self) -> &[&'p SourceFile] {
        &self.files
    }

    pub fn snippet(&self, span: Span) -> String {
        self.program.snippet(span)
    }
}
