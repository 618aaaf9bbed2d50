use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Flattened messages of a single locale: dot-joined leaf path → string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMessages {
    pub locale: String,
    pub file_path: PathBuf,
    pub entries: BTreeMap<String, String>,
}

impl LocaleMessages {
    pub fn new(locale: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            file_path: file_path.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

pub fn parse_locale_file(path: &Path, locale: &str) -> Result<LocaleMessages> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read locale file: {}", path.display()))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse locale file: {}", path.display()))?;

    if !json.is_object() {
        bail!(
            "Root of locale file must be an object: {}",
            path.display()
        );
    }

    let mut messages = LocaleMessages::new(locale, path);
    flatten_json(&json, String::new(), &mut messages.entries);
    Ok(messages)
}

fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Flatten a nested document into leaf paths.
///
/// Objects and arrays are descended into (arrays by index); every scalar,
/// `null` included, is a leaf. Non-string leaves keep their JSON text.
pub fn flatten_json(value: &Value, prefix: String, result: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join_key(&prefix, key), result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, join_key(&prefix, &index.to_string()), result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        scalar => {
            result.insert(prefix, scalar.to_string());
        }
    }
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
/// - "/path/to/locales/ja.json" -> Some("ja")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load every `<locale>.json` under `locales_dir`.
///
/// The reference locale (when present) comes first; the rest follow in file-name
/// order. Any unreadable or malformed file aborts the load.
pub fn load_locales(
    locales_dir: impl AsRef<Path>,
    reference_locale: &str,
) -> Result<Vec<LocaleMessages>> {
    let locales_dir = locales_dir.as_ref();

    if !locales_dir.exists() {
        bail!(
            "Locales directory '{}' does not exist.\n\
             Hint: Check your .stocktakerc.json 'localesDir' setting.",
            locales_dir.display()
        );
    }

    if !locales_dir.is_dir() {
        bail!("'{}' is not a directory.", locales_dir.display());
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(locales_dir)
        .with_context(|| format!("Failed to read directory: {}", locales_dir.display()))?
    {
        let path = entry?.path();
        if path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            files.push((locale, path));
        }
    }

    files.sort_by(|(a, _), (b, _)| {
        (a != reference_locale)
            .cmp(&(b != reference_locale))
            .then_with(|| a.cmp(b))
    });

    files
        .iter()
        .map(|(locale, path)| parse_locale_file(path, locale))
        .collect()
}
