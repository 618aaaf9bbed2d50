//! Program loading: compiler configuration → file set → parsed, span-addressable sources.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use swc_common::{FilePathMapping, SourceMap, SourceMapper, Span};
use swc_ecma_ast::Module;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::parsers::{
    jsx::{is_declaration_file, parse_source},
    tsconfig::{TsConfig, parse_tsconfig},
};
use crate::utils::relative_slash_path;

/// Extensions the loader picks up. Declaration files (`.d.ts`) are included and
/// only feed type resolution.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One parsed file of the program.
pub struct SourceFile {
    /// Position in [`Program::files`]; stable for the lifetime of the program.
    pub index: usize,
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the project root, `/`-separated.
    pub rel_path: String,
    /// Raw file contents.
    pub text: String,
    pub module: Module,
    swc_file: Arc<swc_common::SourceFile>,
}

impl SourceFile {
    pub fn is_declaration(&self) -> bool {
        self.path
            .file_name()
            .is_some_and(|name| is_declaration_file(&name.to_string_lossy()))
    }

    /// Byte offset of `span` from the start of this file.
    pub fn offset_of(&self, span: Span) -> u32 {
        span.lo.0.saturating_sub(self.swc_file.start_pos.0)
    }
}

/// A parsed set of source files sharing one `SourceMap`.
pub struct Program {
    source_map: Arc<SourceMap>,
    files: Vec<SourceFile>,
}

impl Program {
    /// Load every file reachable from the compiler configuration at `tsconfig_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration cannot be read or parsed, contains an
    /// invalid glob, or a matched file cannot be read. Files with syntax errors
    /// are skipped with a warning.
    pub fn load(root: &Path, tsconfig_path: &Path) -> Result<Self> {
        let config = parse_tsconfig(tsconfig_path)?;
        // `../tsconfig.json` must not leave `..` in file paths.
        let tsconfig_path = fs::canonicalize(tsconfig_path).with_context(|| {
            format!("Failed to resolve compiler configuration: {}", tsconfig_path.display())
        })?;
        let config_dir = tsconfig_path.parent().unwrap_or(root);
        let paths = discover_files(config_dir, &config)?;
        debug!(count = paths.len(), "discovered source files");

        let sources = paths
            .into_par_iter()
            .map(|path| {
                let code = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read source file: {}", path.display()))?;
                Ok((path, code))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_sources(root, sources))
    }

    /// Build a program from in-memory sources. Relative paths are joined to `root`.
    pub fn from_sources(root: impl Into<PathBuf>, sources: Vec<(PathBuf, String)>) -> Self {
        let root = root.into();
        let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));

        let mut sources: Vec<(PathBuf, String)> = sources
            .into_iter()
            .map(|(path, code)| {
                let path = if path.is_absolute() {
                    path
                } else {
                    root.join(path)
                };
                (path, code)
            })
            .collect();
        sources.sort_by(|a, b| a.0.cmp(&b.0));
        sources.dedup_by(|a, b| a.0 == b.0);

        let parsed: Vec<_> = sources
            .into_par_iter()
            .filter_map(
                |(path, code)| match parse_source(code.clone(), &path, Arc::clone(&source_map)) {
                    Ok(parsed) => Some((path, code, parsed)),
                    Err(err) => {
                        warn!("skipping {}: {:#}", path.display(), err);
                        None
                    }
                },
            )
            .collect();

        let files = parsed
            .into_iter()
            .enumerate()
            .map(|(index, (path, text, parsed))| SourceFile {
                index,
                rel_path: relative_slash_path(&path, &root),
                path,
                text,
                module: parsed.module,
                swc_file: parsed.source_file,
            })
            .collect();

        Self { source_map, files }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Source text covered by `span`; empty when the span is synthetic.
    pub fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == "node_modules" || name.starts_with('.'))
}

/// Expand a tsconfig-style pattern into glob patterns.
///
/// A wildcard-free pattern whose last segment has no extension names a
/// directory and matches everything beneath it.
fn expand_pattern(pattern: &str) -> Vec<String> {
    let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
    let has_wildcard = pattern.contains('*') || pattern.contains('?');
    let last_segment = pattern.rsplit('/').next().unwrap_or(pattern);

    if pattern.ends_with("**") {
        vec![format!("{}/*", pattern)]
    } else if !has_wildcard && !last_segment.contains('.') {
        vec![pattern.to_string(), format!("{}/**/*", pattern)]
    } else {
        vec![pattern.to_string()]
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .flat_map(|p| expand_pattern(p))
        .map(|p| Pattern::new(&p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
        .collect()
}

/// Walk `config_dir` and return every source file selected by the configuration.
pub fn discover_files(config_dir: &Path, config: &TsConfig) -> Result<Vec<PathBuf>> {
    let include = compile_patterns(&config.include_patterns())?;
    let exclude = compile_patterns(&config.exclude_patterns())?;
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for file in config.files.iter().flatten() {
        let path = config_dir.join(file);
        if path.is_file() {
            found.insert(path);
        } else {
            warn!("file listed in compiler configuration not found: {}", path.display());
        }
    }

    if include.is_empty() {
        return Ok(found.into_iter().collect());
    }

    let walker = WalkDir::new(config_dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
            continue;
        }

        let rel = relative_slash_path(entry.path(), config_dir);
        let included = include.iter().any(|p| p.matches_with(&rel, GLOB_OPTIONS));
        let excluded = exclude.iter().any(|p| p.matches_with(&rel, GLOB_OPTIONS));
        if included && !excluded {
            found.insert(entry.into_path());
        }
    }

    Ok(found.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceFileSelector;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_expand_pattern() {
        assert_eq!(expand_pattern("./src"), vec!["src", "src/**/*"]);
        assert_eq!(expand_pattern("src/**"), vec!["src/**/*"]);
        assert_eq!(expand_pattern("vite.config.ts"), vec!["vite.config.ts"]);
        assert_eq!(expand_pattern("src/**/*.tsx"), vec!["src/**/*.tsx"]);
    }

    #[test]
    fn test_load_respects_include_and_exclude() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "tsconfig.json",
            r#"{
  // app sources only
  "include": ["src"],
  "exclude": ["src/legacy"],
}"#,
        );
        write(root, "src/main.tsx", "export const a = 1;");
        write(root, "src/pages/Home.tsx", "export function Home() { return <div/>; }");
        write(root, "src/legacy/Old.tsx", "export const old = 1;");
        write(root, "src/styles.css", "body {}");
        write(root, "scripts/build.ts", "export {};");
        write(root, "node_modules/pkg/index.ts", "export {};");

        let program = Program::load(root, &root.join("tsconfig.json")).unwrap();
        let files: Vec<&str> = program.files().iter().map(|f| f.rel_path.as_str()).collect();

        assert_eq!(files, vec!["src/main.tsx", "src/pages/Home.tsx"]);
    }

    #[test]
    fn test_load_default_include_skips_node_modules() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "tsconfig.json", "{}");
        write(root, "src/a.ts", "export const a = 1;");
        write(root, "node_modules/pkg/index.ts", "export {};");

        let program = Program::load(root, &root.join("tsconfig.json")).unwrap();
        assert_eq!(program.files().len(), 1);
        assert_eq!(program.files()[0].rel_path, "src/a.ts");
    }

    #[test]
    fn test_load_malformed_config_is_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "tsconfig.json", r#"{"include": "#);
        assert!(Program::load(dir.path(), &dir.path().join("tsconfig.json")).is_err());
    }

    #[test]
    fn test_load_missing_config_is_error() {
        let dir = tempdir().unwrap();
        assert!(Program::load(dir.path(), &dir.path().join("tsconfig.json")).is_err());
    }

    #[test]
    fn test_load_config_above_root() {
        let dir = tempdir().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        write(&base, "tsconfig.json", r#"{"include": ["web/src"]}"#);
        write(&base, "web/src/A.tsx", "export const A = () => <div />;");
        let root = base.join("web");

        let program = Program::load(&root, &root.join("../tsconfig.json")).unwrap();
        let file = &program.files()[0];

        assert_eq!(program.files().len(), 1);
        assert_eq!(file.path, root.join("src/A.tsx"));
        assert_eq!(file.rel_path, "src/A.tsx");
        assert!(SourceFileSelector::new(root.join("src"), true).matches(file));
    }

    #[test]
    fn test_from_sources_skips_unparseable_files() {
        let program = Program::from_sources(
            "/project",
            vec![
                (PathBuf::from("src/b.ts"), "export const = ;".to_string()),
                (PathBuf::from("src/a.ts"), "export const a = 1;".to_string()),
            ],
        );
        assert_eq!(program.files().len(), 1);
        assert_eq!(program.files()[0].rel_path, "src/a.ts");
        assert_eq!(program.files()[0].index, 0);
    }

    #[test]
    fn test_snippet_and_offset() {
        let code = "const x = 1;\nexport const value = [1, 2];".to_string();
        let program = Program::from_sources(
            "/project",
            vec![(PathBuf::from("src/v.ts"), code.clone())],
        );
        let file = &program.files()[0];
        let span = swc_common::Spanned::span(&file.module.body[1]);

        assert_eq!(program.snippet(span), "export const value = [1, 2];");
        assert_eq!(file.offset_of(span) as usize, code.find("export").unwrap());
    }
}
