use std::path::PathBuf;

use glob::Pattern;

use crate::config::TEST_FILE_PATTERNS;
use crate::core::program::{Program, SourceFile};

/// Filters a program down to the application's own source files.
///
/// A file is selected when its absolute path lies under the source root, it is
/// not a declaration file, and (optionally) it is not a test, story or fixture.
pub struct SourceFileSelector {
    source_root: PathBuf,
    ignored: Vec<Pattern>,
}

impl SourceFileSelector {
    pub fn new(source_root: impl Into<PathBuf>, ignore_test_files: bool) -> Self {
        let ignored = if ignore_test_files {
            TEST_FILE_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            source_root: source_root.into(),
            ignored,
        }
    }

    pub fn matches(&self, file: &SourceFile) -> bool {
        file.path.starts_with(&self.source_root)
            && !file.is_declaration()
            && !self.ignored.iter().any(|p| p.matches(&file.rel_path))
    }

    /// Selected files in program order.
    pub fn select<'p>(&self, program: &'p Program) -> impl Iterator<Item = &'p SourceFile> {
        program.files().iter().filter(|file| self.matches(file))
    }
}
