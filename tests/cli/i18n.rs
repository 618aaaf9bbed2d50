use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, assert_written, stderr};

#[test]
fn test_i18n_coverage_report() -> Result<()> {
    let test = CliTest::with_project(&[
        (
            "src/pages/Page.tsx",
            r#"
export function Page() {
  const { t } = useTranslation();
  return (
    <header>
      <h1>{t("page.title")}</h1>
      <h2>{t("page.title")}</h2>
      <p>{i18n.t("page.subtitle", { name })}</p>
    </header>
  );
}
"#,
        ),
        (
            "src/locales/en.json",
            r#"{ "page": { "title": "Hello {{name}}", "footer": "Bye" } }"#,
        ),
        (
            "src/locales/ar.json",
            r#"{ "page": { "title": "مرحبا", "subtitle": "{{ name }}" } }"#,
        ),
    ])?;

    let output = test.run("i18n")?;
    assert_written(&test, &output, "I18n coverage report", "i18n-coverage.json");

    let report = test.read_json("docs/inventory/i18n-coverage.json")?;
    assert_eq!(
        report,
        json!({
            "usedKeys": ["page.subtitle", "page.title"],
            "missing": { "ar": [], "en": ["page.subtitle"] },
            "unused": { "ar": [], "en": ["page.footer"] },
            "duplicated": ["page.title"],
            "mismatchedInterpolation": { "page.title": ["ar"] }
        })
    );

    Ok(())
}

#[test]
fn test_malformed_locale_is_fatal() -> Result<()> {
    let test = CliTest::with_project(&[
        ("src/App.tsx", r#"t("a");"#),
        ("src/locales/en.json", "{ not json"),
    ])?;

    let output = test.run("i18n")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("en.json"));
    assert!(!test.root().join("docs/inventory/i18n-coverage.json").exists());
    Ok(())
}

#[test]
fn test_missing_locales_dir_is_fatal() -> Result<()> {
    let test = CliTest::with_project(&[("src/App.tsx", r#"t("a");"#)])?;

    let output = test.run("i18n")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"));
    Ok(())
}

#[test]
fn test_i18n_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_project(&[
        ("src/App.tsx", r#"t("b"); t("a"); t("b");"#),
        ("src/locales/en.json", r#"{ "a": "{{x}}", "c": "C" }"#),
        ("src/locales/fr.json", r#"{ "a": "{{y}}" }"#),
    ])?;

    test.run("i18n")?;
    let first = test.read_file("docs/inventory/i18n-coverage.json")?;
    test.run("i18n")?;
    let second = test.read_file("docs/inventory/i18n-coverage.json")?;

    assert_eq!(first, second);
    assert!(first.ends_with("}\n"));
    Ok(())
}
