//! Helper functions for AST node extraction.
//!
//! Pure functions with no state dependencies, shared by every scanner.

use swc_ecma_ast::{Callee, Expr, Ident, Lit, MemberProp, ObjectLit, Prop, PropName, PropOrSpread};

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
pub fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_ts_expr(&non_null.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// Literal string value of an expression: `"key"` or `` `key` `` (no substitutions).
pub fn string_literal(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        _ => None,
    }
}

/// Name a call is made through: `useQuery(...)` and `api.useQuery(...)` both give `useQuery`.
pub fn callee_name(callee: &Callee) -> Option<&str> {
    let Callee::Expr(expr) = callee else {
        return None;
    };
    match &**expr {
        Expr::Ident(ident) => Some(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Extract property name from a PropName node.
pub fn extract_prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// Value side of an object literal property.
#[derive(Clone, Copy)]
pub enum PropValue<'a> {
    /// `key: value`
    Expr(&'a Expr),
    /// `{ key }`
    Shorthand(&'a Ident),
}

/// Property assignments of an object literal, in source order.
///
/// Spreads, methods, getters and computed keys are skipped.
pub fn object_properties(obj: &ObjectLit) -> Vec<(String, PropValue<'_>)> {
    obj.props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => {
                    extract_prop_name(&kv.key).map(|name| (name, PropValue::Expr(&kv.value)))
                }
                Prop::Shorthand(ident) => {
                    Some((ident.sym.to_string(), PropValue::Shorthand(ident)))
                }
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        })
        .collect()
}
