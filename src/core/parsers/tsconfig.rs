//! Compiler configuration (`tsconfig.json`) parsing.
//!
//! tsconfig files are JSON with comments and trailing commas; both are
//! stripped before handing the text to serde_json.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub out_dir: Option<String>,
}

impl TsConfig {
    /// `include` patterns, defaulting to everything under the config directory.
    ///
    /// An explicit `files` list without `include` means "only those files".
    pub fn include_patterns(&self) -> Vec<String> {
        match (&self.include, &self.files) {
            (Some(include), _) => include.clone(),
            (None, Some(_)) => Vec::new(),
            (None, None) => vec!["**/*".to_string()],
        }
    }

    /// `exclude` patterns, defaulting to `node_modules` and the output directory.
    pub fn exclude_patterns(&self) -> Vec<String> {
        match &self.exclude {
            Some(exclude) => exclude.clone(),
            None => {
                let mut defaults = vec!["node_modules".to_string()];
                if let Some(out_dir) = &self.compiler_options.out_dir {
                    defaults.push(out_dir.clone());
                }
                defaults
            }
        }
    }
}

pub fn parse_tsconfig(path: &Path) -> Result<TsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read compiler configuration: {}", path.display()))?;

    parse_tsconfig_str(&content)
        .with_context(|| format!("Failed to parse compiler configuration: {}", path.display()))
}

pub fn parse_tsconfig_str(content: &str) -> Result<TsConfig> {
    let json = strip_json_comments(content);
    Ok(serde_json::from_str(&json)?)
}

/// Remove `//` and `/* */` comments and trailing commas outside of strings.
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}
