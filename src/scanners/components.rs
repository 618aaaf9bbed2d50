//! Component inventory: exported view components, their props, hooks and flags.
//!
//! Only top-level statements are inspected for declarations. A declaration is
//! a component when it is exported, its name starts with an uppercase letter,
//! and (except for classes) its body renders JSX somewhere.
//!
//! The four per-file flags are raw-text heuristics over the whole file, not
//! bindings to a particular declaration: a file that memoizes one component
//! marks every component in it as memoized, and a string that happens to
//! contain `memo(` counts too.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;
use swc_common::Spanned;
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Callee, Class, ClassDecl, Decl, DefaultDecl, ExportSpecifier, Expr,
    FnDecl, Function, ImportSpecifier, JSXElement, JSXFragment, Module, ModuleDecl,
    ModuleExportName, ModuleItem, ObjectPatProp, Pat, Stmt, TsType, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::core::{
    AnalysisContext, Program, PropertyInfo, SourceFile,
    checker::entity_name,
    helpers::{callee_name, extract_prop_name, unwrap_ts_expr},
};
use crate::utils::{is_component_name, is_hook_name};

/// Callee text containing this marks a wrapped component as memoized.
const MEMO_WRAPPER: &str = "memo";

const FORWARD_REF_WRAPPER: &str = "forwardRef";

/// Import aliases of the in-house design system.
const DESIGN_SYSTEM_ALIASES: &[&str] = &["@/components/ui", "@/design-system"];

/// Import prefix of the third-party primitive component library.
const PRIMITIVE_LIBRARY_PREFIX: &str = "@radix-ui/";

/// Variable annotations whose first type argument is the props type.
const FUNCTION_COMPONENT_TYPES: &[&str] =
    &["FC", "FunctionComponent", "VFC", "VoidFunctionComponent"];

static IMPORT_SOURCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bfrom|\bimport)\s*\(?\s*['"]([^'"]+)['"]"#).unwrap()
});

static MEMO_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmemo\s*[<(]").unwrap());

static FORWARD_REF_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bforwardRef\s*[<(]").unwrap());

/// How a component is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    /// `function Button() { ... }`
    #[serde(rename = "function")]
    Function,
    /// `const Button = () => ...`
    #[serde(rename = "arrow")]
    Arrow,
    /// `const Input = forwardRef((props, ref) => ...)`
    #[serde(rename = "forwardRef")]
    ForwardRef,
    /// `const List = memo(() => ...)`
    #[serde(rename = "memo")]
    Memo,
    /// `class Legacy extends Component { ... }`
    #[serde(rename = "class")]
    Class,
}

/// Where a component lives, derived from its directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentCategory {
    Page,
    FeatureComponent,
    Feature,
    Route,
    Ui,
    Hook,
    Context,
    Shared,
}

impl ComponentCategory {
    /// Classify by directory segments of a `/`-separated path. First matching rule wins.
    pub fn from_path(rel_path: &str) -> Self {
        let segments: Vec<&str> = rel_path.split('/').collect();
        let dirs = &segments[..segments.len().saturating_sub(1)];
        let has = |name: &str| dirs.contains(&name);

        if has("pages") || has("app") {
            Self::Page
        } else if has("features") && has("components") {
            Self::FeatureComponent
        } else if has("features") {
            Self::Feature
        } else if has("routes") {
            Self::Route
        } else if has("ui") {
            Self::Ui
        } else if has("hooks") {
            Self::Hook
        } else if has("context") || has("contexts") {
            Self::Context
        } else {
            Self::Shared
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl From<PropertyInfo> for PropRecord {
    fn from(info: PropertyInfo) -> Self {
        Self {
            name: info.name,
            type_text: info.type_text,
            optional: info.optional,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub name: String,
    pub file_path: String,
    pub kind: ComponentKind,
    pub category: ComponentCategory,
    pub props: Vec<PropRecord>,
    pub hooks: Vec<String>,
    pub uses_design_system: bool,
    pub uses_primitives: bool,
    pub is_memo: bool,
    pub is_forward_ref: bool,
}

/// A function-valued node that may render JSX.
#[derive(Clone, Copy)]
enum FnLike<'a> {
    Function(&'a Function),
    Arrow(&'a ArrowExpr),
}

impl<'a> FnLike<'a> {
    fn first_param(self) -> Option<&'a Pat> {
        match self {
            FnLike::Function(function) => function.params.first().map(|p| &p.pat),
            FnLike::Arrow(arrow) => arrow.params.first(),
        }
    }

    fn renders_jsx(self) -> bool {
        match self {
            FnLike::Function(function) => function.body.as_ref().is_some_and(contains_jsx),
            FnLike::Arrow(arrow) => contains_jsx(&*arrow.body),
        }
    }
}

/// Syntactic shape of a component declaration.
enum Shape<'a> {
    Function(&'a Function),
    Arrow {
        arrow: &'a ArrowExpr,
        /// `const X: FC<Props> = ...` supplies `Props`.
        props_hint: Option<&'a TsType>,
    },
    Wrapped {
        callee: String,
        inner: FnLike<'a>,
        /// `forwardRef<Ref, Props>(...)` supplies `Props`.
        props_hint: Option<&'a TsType>,
    },
    Class(&'a Class),
}

impl Shape<'_> {
    fn kind(&self) -> ComponentKind {
        match self {
            Shape::Function(_) => ComponentKind::Function,
            Shape::Arrow { .. } => ComponentKind::Arrow,
            Shape::Wrapped { callee, .. } if callee.contains(MEMO_WRAPPER) => ComponentKind::Memo,
            Shape::Wrapped { .. } => ComponentKind::ForwardRef,
            Shape::Class(_) => ComponentKind::Class,
        }
    }
}

struct Candidate<'a> {
    name: String,
    shape: Shape<'a>,
}

/// Short-circuiting search for any JSX element or fragment.
#[derive(Default)]
struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_expr(&mut self, node: &Expr) {
        if !self.found {
            node.visit_children_with(self);
        }
    }

    fn visit_jsx_element(&mut self, _node: &JSXElement) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _node: &JSXFragment) {
        self.found = true;
    }
}

fn contains_jsx<N: VisitWith<JsxFinder>>(node: &N) -> bool {
    let mut finder = JsxFinder::default();
    node.visit_with(&mut finder);
    finder.found
}

/// Per-file raw-text flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FileFlags {
    uses_design_system: bool,
    uses_primitives: bool,
    is_memo: bool,
    is_forward_ref: bool,
}

impl FileFlags {
    fn detect(text: &str) -> Self {
        let sources: Vec<&str> = IMPORT_SOURCE_REGEX
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();

        Self {
            uses_design_system: sources
                .iter()
                .any(|s| DESIGN_SYSTEM_ALIASES.iter().any(|alias| s.contains(alias))),
            uses_primitives: sources.iter().any(|s| s.contains(PRIMITIVE_LIBRARY_PREFIX)),
            is_memo: MEMO_CALL_REGEX.is_match(text),
            is_forward_ref: FORWARD_REF_CALL_REGEX.is_match(text),
        }
    }
}

/// Scan the selected files and return every component, sorted by name.
pub fn scan(ctx: &AnalysisContext) -> Vec<ComponentRecord> {
    let mut records = Vec::new();

    for file in ctx.files() {
        let candidates = discover_candidates(ctx.program, &file.module);
        if candidates.is_empty() {
            continue;
        }

        let hooks = imported_hooks(&file.module);
        let flags = FileFlags::detect(&file.text);
        let category = ComponentCategory::from_path(&file.rel_path);
        debug!(file = %file.rel_path, count = candidates.len(), "components found");

        for candidate in candidates {
            records.push(ComponentRecord {
                kind: candidate.shape.kind(),
                props: extract_props(ctx, file, &candidate.shape),
                name: candidate.name,
                file_path: file.rel_path.clone(),
                category,
                hooks: hooks.clone(),
                uses_design_system: flags.uses_design_system,
                uses_primitives: flags.uses_primitives,
                is_memo: flags.is_memo,
                is_forward_ref: flags.is_forward_ref,
            });
        }
    }

    records.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.file_path.cmp(&b.file_path))
    });
    records
}

/// Top-level declarations of a module that may be exported by name later.
#[derive(Clone, Copy)]
enum LocalDecl<'a> {
    Fn(&'a FnDecl),
    Var(&'a VarDeclarator),
    Class(&'a ClassDecl),
}

fn discover_candidates<'a>(program: &Program, module: &'a Module) -> Vec<Candidate<'a>> {
    let mut locals: HashMap<String, LocalDecl<'a>> = HashMap::new();
    for item in &module.body {
        if let ModuleItem::Stmt(Stmt::Decl(decl)) = item {
            match decl {
                Decl::Fn(fn_decl) => {
                    locals.insert(fn_decl.ident.sym.to_string(), LocalDecl::Fn(fn_decl));
                }
                Decl::Class(class_decl) => {
                    locals.insert(class_decl.ident.sym.to_string(), LocalDecl::Class(class_decl));
                }
                Decl::Var(var) => {
                    for declarator in &var.decls {
                        if let Pat::Ident(binding) = &declarator.name {
                            locals.insert(binding.id.sym.to_string(), LocalDecl::Var(declarator));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let mut candidates = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |candidate: Candidate<'a>| {
        if seen.insert(candidate.name.clone()) {
            candidates.push(candidate);
        }
    };

    for item in &module.body {
        let ModuleItem::ModuleDecl(module_decl) = item else {
            continue;
        };
        match module_decl {
            ModuleDecl::ExportDecl(export) => match &export.decl {
                Decl::Fn(fn_decl) => {
                    if let Some(c) = function_candidate(&fn_decl.ident.sym, &fn_decl.function) {
                        push(c);
                    }
                }
                Decl::Class(class_decl) => {
                    if let Some(c) = class_candidate(&class_decl.ident.sym, &class_decl.class) {
                        push(c);
                    }
                }
                Decl::Var(var) => {
                    for declarator in &var.decls {
                        if let Some(c) = var_candidate(program, declarator) {
                            push(c);
                        }
                    }
                }
                _ => {}
            },
            ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
                DefaultDecl::Fn(fn_expr) => {
                    if let Some(ident) = &fn_expr.ident
                        && let Some(c) = function_candidate(&ident.sym, &fn_expr.function)
                    {
                        push(c);
                    }
                }
                DefaultDecl::Class(class_expr) => {
                    if let Some(ident) = &class_expr.ident
                        && let Some(c) = class_candidate(&ident.sym, &class_expr.class)
                    {
                        push(c);
                    }
                }
                DefaultDecl::TsInterfaceDecl(_) => {}
            },
            ModuleDecl::ExportNamed(named) if named.src.is_none() && !named.type_only => {
                for specifier in &named.specifiers {
                    if let ExportSpecifier::Named(spec) = specifier
                        && !spec.is_type_only
                        && let ModuleExportName::Ident(orig) = &spec.orig
                        && let Some(local) = locals.get(orig.sym.as_str())
                        && let Some(c) = local_candidate(program, *local)
                    {
                        push(c);
                    }
                }
            }
            ModuleDecl::ExportDefaultExpr(export) => {
                if let Expr::Ident(ident) = unwrap_ts_expr(&export.expr)
                    && let Some(local) = locals.get(ident.sym.as_str())
                    && let Some(c) = local_candidate(program, *local)
                {
                    push(c);
                }
            }
            _ => {}
        }
    }

    candidates
}

fn local_candidate<'a>(program: &Program, local: LocalDecl<'a>) -> Option<Candidate<'a>> {
    match local {
        LocalDecl::Fn(fn_decl) => function_candidate(&fn_decl.ident.sym, &fn_decl.function),
        LocalDecl::Class(class_decl) => class_candidate(&class_decl.ident.sym, &class_decl.class),
        LocalDecl::Var(declarator) => var_candidate(program, declarator),
    }
}

fn function_candidate<'a>(name: &str, function: &'a Function) -> Option<Candidate<'a>> {
    (is_component_name(name) && FnLike::Function(function).renders_jsx()).then(|| Candidate {
        name: name.to_string(),
        shape: Shape::Function(function),
    })
}

fn class_candidate<'a>(name: &str, class: &'a Class) -> Option<Candidate<'a>> {
    is_component_name(name).then(|| Candidate {
        name: name.to_string(),
        shape: Shape::Class(class),
    })
}

fn var_candidate<'a>(program: &Program, declarator: &'a VarDeclarator) -> Option<Candidate<'a>> {
    let Pat::Ident(binding) = &declarator.name else {
        return None;
    };
    let name = binding.id.sym.as_str();
    if !is_component_name(name) {
        return None;
    }

    let annotation = binding.type_ann.as_ref().map(|ann| &*ann.type_ann);
    let shape = match unwrap_ts_expr(declarator.init.as_ref()?) {
        Expr::Arrow(arrow) => FnLike::Arrow(arrow).renders_jsx().then(|| Shape::Arrow {
            arrow,
            props_hint: annotation.and_then(function_component_props),
        })?,
        Expr::Fn(fn_expr) => FnLike::Function(&fn_expr.function)
            .renders_jsx()
            .then(|| Shape::Function(&fn_expr.function))?,
        Expr::Call(call) => {
            let (inner, props_hint) = wrapped_function(call)?;
            let Callee::Expr(callee) = &call.callee else {
                return None;
            };
            inner.renders_jsx().then(|| Shape::Wrapped {
                callee: program.snippet(callee.span()),
                inner,
                props_hint,
            })?
        }
        _ => return None,
    };

    Some(Candidate {
        name: name.to_string(),
        shape,
    })
}

/// Function passed as the first argument of a wrapper call, looking through
/// nested wrappers such as `memo(forwardRef(...))`.
fn wrapped_function(call: &CallExpr) -> Option<(FnLike<'_>, Option<&TsType>)> {
    let arg = call.args.first()?;
    if arg.spread.is_some() {
        return None;
    }

    let props_hint = forward_ref_props(call);
    match unwrap_ts_expr(&arg.expr) {
        Expr::Arrow(arrow) => Some((FnLike::Arrow(arrow), props_hint)),
        Expr::Fn(fn_expr) => Some((FnLike::Function(&fn_expr.function), props_hint)),
        Expr::Call(inner) => {
            let (function, inner_hint) = wrapped_function(inner)?;
            Some((function, inner_hint.or(props_hint)))
        }
        _ => None,
    }
}

/// `forwardRef<Ref, Props>(...)` → `Props`.
fn forward_ref_props(call: &CallExpr) -> Option<&TsType> {
    if callee_name(&call.callee) != Some(FORWARD_REF_WRAPPER) {
        return None;
    }
    call.type_args.as_ref()?.params.get(1).map(|t| &**t)
}

/// `FC<Props>` / `React.FunctionComponent<Props>` → `Props`.
fn function_component_props(annotation: &TsType) -> Option<&TsType> {
    let TsType::TsTypeRef(type_ref) = annotation else {
        return None;
    };
    if !FUNCTION_COMPONENT_TYPES.contains(&entity_name(&type_ref.type_name).as_str()) {
        return None;
    }
    type_ref.type_params.as_ref()?.params.first().map(|t| &**t)
}

fn extract_props(ctx: &AnalysisContext, file: &SourceFile, shape: &Shape) -> Vec<PropRecord> {
    let (param, props_hint) = match shape {
        Shape::Function(function) => (function.params.first().map(|p| &p.pat), None),
        Shape::Arrow { arrow, props_hint } => (arrow.params.first(), *props_hint),
        Shape::Wrapped {
            inner, props_hint, ..
        } => (inner.first_param(), *props_hint),
        Shape::Class(class) => return class_props(ctx, file, class),
    };

    param
        .map(|pat| props_from_param(ctx, file, pat, props_hint))
        .unwrap_or_default()
}

/// `class X extends Component<Props>` → properties of `Props`.
fn class_props(ctx: &AnalysisContext, file: &SourceFile, class: &Class) -> Vec<PropRecord> {
    class
        .super_type_params
        .as_ref()
        .and_then(|params| params.params.first())
        .and_then(|ty| ctx.checker.properties_of(ty, file.index))
        .map(|props| props.into_iter().map(PropRecord::from).collect())
        .unwrap_or_default()
}

fn props_from_param(
    ctx: &AnalysisContext,
    file: &SourceFile,
    pat: &Pat,
    props_hint: Option<&TsType>,
) -> Vec<PropRecord> {
    match pat {
        // `({ a } = {})`
        Pat::Assign(assign) => props_from_param(ctx, file, &assign.left, props_hint),
        Pat::Object(object) => {
            let ty = object
                .type_ann
                .as_ref()
                .map(|ann| &*ann.type_ann)
                .or(props_hint);

            object
                .props
                .iter()
                .filter_map(|prop| {
                    let (name, default_value) = match prop {
                        ObjectPatProp::KeyValue(kv) => {
                            let default_value = match &*kv.value {
                                Pat::Assign(assign) => Some(ctx.snippet(assign.right.span())),
                                _ => None,
                            };
                            (extract_prop_name(&kv.key)?, default_value)
                        }
                        ObjectPatProp::Assign(assign) => (
                            assign.key.id.sym.to_string(),
                            assign.value.as_ref().map(|v| ctx.snippet(v.span())),
                        ),
                        ObjectPatProp::Rest(_) => return None,
                    };

                    let resolved = ty.and_then(|ty| ctx.checker.property_of(ty, file.index, &name));
                    Some(PropRecord {
                        type_text: resolved
                            .as_ref()
                            .map(|p| p.type_text.clone())
                            .unwrap_or_else(|| "unknown".to_string()),
                        optional: resolved.is_some_and(|p| p.optional),
                        name,
                        default_value,
                    })
                })
                .collect()
        }
        Pat::Ident(binding) => binding
            .type_ann
            .as_ref()
            .map(|ann| &*ann.type_ann)
            .or(props_hint)
            .and_then(|ty| ctx.checker.properties_of(ty, file.index))
            .map(|props| props.into_iter().map(PropRecord::from).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Named imports of this file that follow the hook naming rule, sorted and unique.
fn imported_hooks(module: &Module) -> Vec<String> {
    let mut hooks = BTreeSet::new();
    for item in &module.body {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item {
            for specifier in &import.specifiers {
                if let ImportSpecifier::Named(named) = specifier
                    && is_hook_name(&named.local.sym)
                {
                    hooks.insert(named.local.sym.to_string());
                }
            }
        }
    }
    hooks.into_iter().collect()
}
