use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod components;
mod i18n;
mod init;
mod queries;
mod routes;

const BIN_NAME: &str = "stocktake";

const TSCONFIG: &str = r#"{
  // bundler-style config with comments and trailing commas
  "compilerOptions": { "jsx": "react-jsx", "outDir": "dist", },
  "include": ["src"],
}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with a `tsconfig.json` and the given files.
    pub fn with_project(files: &[(&str, &str)]) -> Result<Self> {
        let test = Self::new()?;
        test.write_file("tsconfig.json", TSCONFIG)?;
        for (path, content) in files {
            test.write_file(path, content)?;
        }
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn run(&self, subcommand: &str) -> Result<Output> {
        Ok(self.command().arg(subcommand).output()?)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Asserts a successful run that printed exactly the confirmation line.
pub fn assert_written(test: &CliTest, output: &Output, title: &str, file: &str) {
    assert!(
        output.status.success(),
        "command failed. stderr: {}",
        stderr(output)
    );
    let expected = test.root().join("docs/inventory").join(file);
    assert_eq!(
        stdout(output),
        format!("\u{2713} {} written to {}\n", title, expected.display())
    );
}

#[test]
fn test_help_without_command() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["components", "i18n", "queries", "routes", "init"] {
        assert!(out.contains(command), "help should list {}", command);
    }
    Ok(())
}

#[test]
fn test_missing_tsconfig_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", "export const App = () => <div />;")?;

    let output = test.run("components")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("Error: "));
    assert!(!test.root().join("docs/inventory/components.json").exists());
    Ok(())
}

#[test]
fn test_malformed_tsconfig_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("tsconfig.json", "{ \"include\": [ }")?;

    let output = test.run("queries")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tsconfig.json"));
    Ok(())
}

#[test]
fn test_root_option_and_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("web/tsconfig.app.json", TSCONFIG)?;
    test.write_file(
        "web/.stocktakerc.json",
        r#"{ "tsconfig": "tsconfig.app.json", "outputDir": "out" }"#,
    )?;
    test.write_file("web/src/Card.tsx", "export const Card = () => <div />;")?;

    let output = test.command().args(["components", "--root", "web"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let components = test.read_json("web/out/components.json")?;
    assert_eq!(components[0]["name"], "Card");
    Ok(())
}

#[test]
fn test_tsconfig_above_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("tsconfig.json", r#"{ "include": ["web/src"] }"#)?;
    test.write_file("web/.stocktakerc.json", r#"{ "tsconfig": "../tsconfig.json" }"#)?;
    test.write_file("web/src/A.tsx", "export const A = () => <div />;")?;

    let output = test.command().args(["components", "--root", "web"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let components = test.read_json("web/docs/inventory/components.json")?;
    assert_eq!(components[0]["name"], "A");
    assert_eq!(components[0]["filePath"], "src/A.tsx");
    Ok(())
}
