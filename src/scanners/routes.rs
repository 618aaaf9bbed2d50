//! Route tree extracted from the exported router configuration.
//!
//! Guard and wrapper detection is a substring search over the element's source
//! text, so a component merely named like a guard is reported as one.

use std::collections::BTreeSet;

use serde::Serialize;
use swc_common::Spanned;
use swc_ecma_ast::{
    ArrayLit, BlockStmtOrExpr, Decl, Expr, ModuleDecl, ModuleItem, ObjectLit, Pat, Prop, PropOrSpread,
};
use tracing::{debug, warn};

use crate::core::{
    AnalysisContext, SourceFile,
    helpers::{PropValue, extract_prop_name, object_properties, string_literal, unwrap_ts_expr},
};

/// Exported variable holding the router configuration.
const ROUTER_VARIABLE: &str = "router";

const LAZY_FIELD: &str = "lazy";

const GUARD_COMPONENTS: &[&str] = &["ProtectedRoute", "RequireAuth", "RequireRole", "GuestRoute"];

const WRAPPER_COMPONENTS: &[&str] = &["Suspense", "ErrorBoundary", "Layout"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub lazy: bool,
    pub file_path: String,
    pub guards: BTreeSet<String>,
    pub wrappers: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
}

/// Routes of the first router configuration found in the selected files.
///
/// Returns an empty list when no file exports one.
pub fn scan(ctx: &AnalysisContext) -> Vec<RouteNode> {
    for file in ctx.files() {
        if let Some(routes) = find_router_config(&file.module.body) {
            let nodes = build_routes(ctx, file, routes);
            debug!(file = %file.rel_path, top_level = nodes.len(), "router configuration found");
            return nodes;
        }
    }

    warn!(
        variable = ROUTER_VARIABLE,
        "no exported router configuration found"
    );
    Vec::new()
}

/// `export const router = createX([...])` → the array literal.
fn find_router_config(body: &[ModuleItem]) -> Option<&ArrayLit> {
    body.iter().find_map(|item| {
        let ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) = item else {
            return None;
        };
        let Decl::Var(var) = &export.decl else {
            return None;
        };
        var.decls.iter().find_map(|declarator| {
            let Pat::Ident(binding) = &declarator.name else {
                return None;
            };
            if &*binding.id.sym != ROUTER_VARIABLE {
                return None;
            }
            let Expr::Call(call) = unwrap_ts_expr(declarator.init.as_ref()?) else {
                return None;
            };
            let first = call.args.first()?;
            match unwrap_ts_expr(&first.expr) {
                Expr::Array(array) => Some(array),
                _ => None,
            }
        })
    })
}

fn build_routes(ctx: &AnalysisContext, file: &SourceFile, array: &ArrayLit) -> Vec<RouteNode> {
    array
        .elems
        .iter()
        .flatten()
        .filter(|elem| elem.spread.is_none())
        .filter_map(|elem| match unwrap_ts_expr(&elem.expr) {
            Expr::Object(object) => Some(build_route(ctx, file, object)),
            _ => None,
        })
        .collect()
}

fn build_route(ctx: &AnalysisContext, file: &SourceFile, object: &ObjectLit) -> RouteNode {
    let mut path = None;
    let mut element = None;
    let mut lazy = has_accessor(object, LAZY_FIELD);
    let mut children = None;

    for (name, value) in object_properties(object) {
        match name.as_str() {
            LAZY_FIELD => lazy = true,
            "path" => {
                if let PropValue::Expr(expr) = value {
                    path = string_literal(expr);
                }
            }
            "element" => {
                element = Some(match value {
                    PropValue::Expr(expr) => element_text(ctx, expr),
                    PropValue::Shorthand(ident) => ident.sym.to_string(),
                });
            }
            "children" => {
                if let PropValue::Expr(expr) = value
                    && let Expr::Array(array) = unwrap_ts_expr(expr)
                {
                    children = Some(build_routes(ctx, file, array));
                }
            }
            _ => {}
        }
    }

    let text = element.as_deref().unwrap_or_default();
    let id_suffix = path
        .as_deref()
        .or(element.as_deref())
        .unwrap_or("index");

    RouteNode {
        id: format!("{}:{}", file.rel_path, id_suffix),
        guards: names_in(text, GUARD_COMPONENTS),
        wrappers: names_in(text, WRAPPER_COMPONENTS),
        path,
        element,
        lazy,
        file_path: file.rel_path.clone(),
        children,
    }
}

/// `name() { ... }` or `get name() { ... }` on the object.
fn has_accessor(object: &ObjectLit, name: &str) -> bool {
    object.props.iter().any(|prop| {
        let PropOrSpread::Prop(prop) = prop else {
            return false;
        };
        let key = match &**prop {
            Prop::Method(method) => &method.key,
            Prop::Getter(getter) => &getter.key,
            _ => return false,
        };
        extract_prop_name(key).as_deref() == Some(name)
    })
}

/// JSX is kept as written; a function-valued element contributes its body.
fn element_text(ctx: &AnalysisContext, expr: &Expr) -> String {
    match unwrap_ts_expr(expr) {
        Expr::Arrow(arrow) => match &*arrow.body {
            BlockStmtOrExpr::Expr(body) => ctx.snippet(body.span()),
            BlockStmtOrExpr::BlockStmt(block) => ctx.snippet(block.span),
        },
        Expr::Fn(fn_expr) => fn_expr
            .function
            .body
            .as_ref()
            .map(|body| ctx.snippet(body.span))
            .unwrap_or_default(),
        other => ctx.snippet(other.span()),
    }
}

fn names_in(text: &str, names: &[&str]) -> BTreeSet<String> {
    names
        .iter()
        .filter(|name| text.contains(*name))
        .map(|name| name.to_string())
        .collect()
}
