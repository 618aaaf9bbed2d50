use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run("init")?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\u{2713} Created .stocktakerc.json\n");

    let content = test.read_file(".stocktakerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    for field in [
        "tsconfig",
        "sourceRoot",
        "localesDir",
        "referenceLocale",
        "outputDir",
        "ignoreTestFiles",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{}'", field);
    }
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".stocktakerc.json", "{}")?;

    let output = test.run("init")?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .stocktakerc.json already exists\n");
    assert_eq!(test.read_file(".stocktakerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_project(&[(
        "src/App.tsx",
        "export function App() { return <div>Test</div>; }",
    )])?;

    test.run("init")?;
    let output = test.run("components")?;

    assert!(
        output.status.success(),
        "components should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
