//! Data-fetching hook calls and their cache keys.

use std::collections::BTreeMap;

use serde::Serialize;
use swc_common::Spanned;
use swc_ecma_ast::{CallExpr, Expr, ExprOrSpread, ObjectLit};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::{
    AnalysisContext, SourceFile,
    helpers::{PropValue, callee_name, object_properties, unwrap_ts_expr},
};

const QUERY_HOOKS: &[&str] = &[
    "useQuery",
    "useSuspenseQuery",
    "useInfiniteQuery",
    "useSuspenseInfiniteQuery",
    "useMutation",
];

const QUERY_KEY_FIELD: &str = "queryKey";
const QUERY_FN_FIELD: &str = "queryFn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    /// `<filePath>:<offset>`; unique within one run only.
    pub id: String,
    pub file_path: String,
    pub hook: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_key: Option<String>,
    pub options: BTreeMap<String, String>,
}

struct QueryCallCollector<'a, 'p> {
    ctx: &'a AnalysisContext<'p>,
    file: &'a SourceFile,
    records: Vec<QueryRecord>,
}

impl Visit for QueryCallCollector<'_, '_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(hook) = callee_name(&node.callee)
            && QUERY_HOOKS.contains(&hook)
        {
            let (query_key, options) = self.extract(&node.args);
            self.records.push(QueryRecord {
                id: format!("{}:{}", self.file.rel_path, self.file.offset_of(node.span)),
                file_path: self.file.rel_path.clone(),
                hook: hook.to_string(),
                query_key,
                options,
            });
        }

        node.visit_children_with(self);
    }
}

impl QueryCallCollector<'_, '_> {
    fn extract(&self, args: &[ExprOrSpread]) -> (Option<String>, BTreeMap<String, String>) {
        let mut query_key = None;
        let mut options = BTreeMap::new();

        match args.first().map(|arg| unwrap_ts_expr(&arg.expr)) {
            Some(Expr::Array(array)) => {
                let elements: Vec<String> = array
                    .elems
                    .iter()
                    .flatten()
                    .map(|elem| self.ctx.snippet(elem.span()))
                    .collect();
                return (Some(elements.join(", ")), options);
            }
            Some(Expr::Object(object)) => {
                query_key = self.extract_object(object, &mut options);
            }
            _ => {}
        }

        if query_key.is_none()
            && let Some(Expr::Object(object)) = args.get(1).map(|arg| unwrap_ts_expr(&arg.expr))
        {
            query_key = self.extract_object(object, &mut options);
        }

        (query_key, options)
    }

    /// Copy option fields into `options` and return the `queryKey` text, if any.
    fn extract_object(
        &self,
        object: &ObjectLit,
        options: &mut BTreeMap<String, String>,
    ) -> Option<String> {
        let mut query_key = None;
        for (name, value) in object_properties(object) {
            let text = match value {
                PropValue::Expr(expr) => self.ctx.snippet(expr.span()),
                PropValue::Shorthand(ident) => ident.sym.to_string(),
            };
            match name.as_str() {
                QUERY_KEY_FIELD => query_key = Some(text),
                QUERY_FN_FIELD => {}
                _ => {
                    options.insert(name, text);
                }
            }
        }
        query_key
    }
}

/// Every recognized hook call in the selected files, in traversal order.
pub fn scan(ctx: &AnalysisContext) -> Vec<QueryRecord> {
    let mut records = Vec::new();
    for file in ctx.files() {
        let mut collector = QueryCallCollector {
            ctx,
            file,
            records: Vec::new(),
        };
        file.module.visit_with(&mut collector);
        if !collector.records.is_empty() {
            debug!(file = %file.rel_path, count = collector.records.len(), "query hooks found");
        }
        records.extend(collector.records);
    }
    records
}
