use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".stocktakerc.json";

/// Files never handed to a scanner when `ignoreTestFiles` is on.
pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.ts",
    "**/*.test.tsx",
    "**/*.spec.ts",
    "**/*.spec.tsx",
    "**/*.stories.ts",
    "**/*.stories.tsx",
    "**/__tests__/**",
    "**/__fixtures__/**",
    "**/__mocks__/**",
];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_tsconfig() -> String {
    "tsconfig.json".to_string()
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_locales_dir() -> String {
    "src/locales".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "docs/inventory".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tsconfig: default_tsconfig(),
            source_root: default_source_root(),
            locales_dir: default_locales_dir(),
            reference_locale: default_reference_locale(),
            output_dir: default_output_dir(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.source_root.trim().is_empty() {
            bail!("'sourceRoot' must not be empty");
        }
        if self.output_dir.trim().is_empty() {
            bail!("'outputDir' must not be empty");
        }
        if self.tsconfig.trim().is_empty() {
            bail!("'tsconfig' must not be empty");
        }
        Ok(())
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, root: &Path, configured: &str) -> PathBuf {
        let p = Path::new(configured);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            root.join(p.strip_prefix(".").unwrap_or(p))
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
