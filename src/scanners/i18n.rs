//! Translation key coverage: keys used in code versus keys declared per locale.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;
use swc_ecma_ast::CallExpr;
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::{
    AnalysisContext,
    helpers::{callee_name, string_literal},
    parsers::json::LocaleMessages,
};

/// Identifier (or member name) of the translation lookup function.
const TRANSLATION_FUNCTION: &str = "t";

static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").unwrap());

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nCoverageReport {
    pub used_keys: Vec<String>,
    /// Locale → used keys absent from that locale.
    pub missing: BTreeMap<String, Vec<String>>,
    /// Locale → declared keys never used in code.
    pub unused: BTreeMap<String, Vec<String>>,
    pub duplicated: Vec<String>,
    /// Key → locales whose placeholders differ from the reference locale.
    pub mismatched_interpolation: BTreeMap<String, Vec<String>>,
}

/// Literal keys passed to translation calls.
#[derive(Debug, Default)]
pub struct KeyUsage {
    pub used: BTreeSet<String>,
    /// Keys looked up more than once; always a subset of `used`.
    pub duplicated: BTreeSet<String>,
}

impl KeyUsage {
    fn record(&mut self, key: String) {
        if !self.used.contains(&key) {
            self.used.insert(key);
        } else {
            self.duplicated.insert(key);
        }
    }
}

struct TranslationCallCollector<'u> {
    usage: &'u mut KeyUsage,
}

impl Visit for TranslationCallCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if callee_name(&node.callee) == Some(TRANSLATION_FUNCTION)
            && let Some(arg) = node.args.first()
            && arg.spread.is_none()
            && let Some(key) = string_literal(&arg.expr)
        {
            self.usage.record(key);
        }

        node.visit_children_with(self);
    }
}

/// Walk every selected file for translation calls.
pub fn collect_key_usage(ctx: &AnalysisContext) -> KeyUsage {
    let mut usage = KeyUsage::default();
    for file in ctx.files() {
        let mut collector = TranslationCallCollector { usage: &mut usage };
        file.module.visit_with(&mut collector);
    }
    usage
}

/// Scan the selected files and compare the keys they use against `locales`.
///
/// `locales` must be in load order: the first entry is the interpolation reference.
pub fn scan(ctx: &AnalysisContext, locales: &[LocaleMessages]) -> I18nCoverageReport {
    let usage = collect_key_usage(ctx);
    debug!(
        used = usage.used.len(),
        duplicated = usage.duplicated.len(),
        "translation keys collected"
    );
    build_report(usage, locales)
}

pub fn build_report(usage: KeyUsage, locales: &[LocaleMessages]) -> I18nCoverageReport {
    let mut missing = BTreeMap::new();
    let mut unused = BTreeMap::new();

    for locale in locales {
        missing.insert(
            locale.locale.clone(),
            usage
                .used
                .iter()
                .filter(|key| !locale.contains_key(key))
                .cloned()
                .collect(),
        );
        unused.insert(
            locale.locale.clone(),
            locale
                .keys()
                .filter(|key| !usage.used.contains(*key))
                .cloned()
                .collect(),
        );
    }

    I18nCoverageReport {
        used_keys: usage.used.into_iter().collect(),
        missing,
        unused,
        duplicated: usage.duplicated.into_iter().collect(),
        mismatched_interpolation: mismatched_interpolation(locales),
    }
}

/// Sorted, unique placeholder names in a message: `"{{a}} {{ b }} {{a}}"` → `["a", "b"]`.
pub fn interpolation_tokens(message: &str) -> Vec<String> {
    INTERPOLATION_REGEX
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn mismatched_interpolation(locales: &[LocaleMessages]) -> BTreeMap<String, Vec<String>> {
    let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let Some((reference, others)) = locales.split_first() else {
        return result;
    };

    for (key, message) in &reference.entries {
        let expected = interpolation_tokens(message).join(",");
        for locale in others {
            if let Some(other) = locale.get(key)
                && interpolation_tokens(other).join(",") != expected
            {
                result
                    .entry(key.clone())
                    .or_default()
                    .push(locale.locale.clone());
            }
        }
    }

    result
}
