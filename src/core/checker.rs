//! Type-resolution service shared by the scanners.
//!
//! Resolves declared TypeScript types to their property lists using a
//! program-wide index of `interface` and `type` declarations. Lookup prefers
//! declarations in the requesting file, then the first file that declares the
//! name. Anything that cannot be resolved statically yields `None`, and callers
//! degrade to `"unknown"`.

use std::collections::HashMap;

use swc_common::Spanned;
use swc_ecma_ast::{
    Decl, Expr, Lit, MemberProp, ModuleDecl, ModuleItem, Stmt, TsEntityName, TsFnParam,
    TsInterfaceDecl, TsLit, TsType, TsTypeAliasDecl, TsTypeElement, TsUnionOrIntersectionType,
};

use crate::core::program::Program;

/// Guards against recursive type references (`interface A extends B`, `B extends A`).
const MAX_DEPTH: usize = 16;

/// A property of a resolved object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    /// Declared type as written in source.
    pub type_text: String,
    pub optional: bool,
}

#[derive(Clone, Copy)]
enum TypeDecl<'p> {
    Interface(&'p TsInterfaceDecl),
    Alias(&'p TsTypeAliasDecl),
}

pub struct TypeChecker<'p> {
    program: &'p Program,
    /// Type name → (file index, declaration), in file order.
    declarations: HashMap<String, Vec<(usize, TypeDecl<'p>)>>,
}

impl<'p> TypeChecker<'p> {
    pub fn new(program: &'p Program) -> Self {
        let mut declarations: HashMap<String, Vec<(usize, TypeDecl<'p>)>> = HashMap::new();

        for file in program.files() {
            for item in &file.module.body {
                let decl = match item {
                    ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
                    ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
                    _ => continue,
                };
                match decl {
                    Decl::TsInterface(interface) => declarations
                        .entry(interface.id.sym.to_string())
                        .or_default()
                        .push((file.index, TypeDecl::Interface(interface))),
                    Decl::TsTypeAlias(alias) => declarations
                        .entry(alias.id.sym.to_string())
                        .or_default()
                        .push((file.index, TypeDecl::Alias(alias))),
                    _ => {}
                }
            }
        }

        Self {
            program,
            declarations,
        }
    }

    /// Source text of a type node.
    pub fn type_to_string(&self, ty: &TsType) -> String {
        self.program.snippet(ty.span())
    }

    /// All properties of `ty` as seen from file `file`.
    pub fn properties_of(&self, ty: &TsType, file: usize) -> Option<Vec<PropertyInfo>> {
        self.collect(ty, file, 0)
    }

    /// A single named property of `ty`.
    pub fn property_of(&self, ty: &TsType, file: usize, name: &str) -> Option<PropertyInfo> {
        self.properties_of(ty, file)?
            .into_iter()
            .find(|p| p.name == name)
    }

    fn collect(&self, ty: &TsType, file: usize, depth: usize) -> Option<Vec<PropertyInfo>> {
        if depth > MAX_DEPTH {
            return None;
        }

        match ty {
            TsType::TsTypeLit(lit) => Some(self.members(&lit.members)),
            TsType::TsParenthesizedType(paren) => self.collect(&paren.type_ann, file, depth + 1),
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => {
                let mut merged = Vec::new();
                let mut resolved = false;
                for part in &intersection.types {
                    if let Some(props) = self.collect(part, file, depth + 1) {
                        resolved = true;
                        merge(&mut merged, props);
                    }
                }
                resolved.then_some(merged)
            }
            TsType::TsTypeRef(type_ref) => {
                let args: Vec<&TsType> = type_ref
                    .type_params
                    .as_ref()
                    .map(|p| p.params.iter().map(|t| &**t).collect())
                    .unwrap_or_default();
                self.resolve_named(&entity_name(&type_ref.type_name), &args, file, depth)
            }
            _ => None,
        }
    }

    fn resolve_named(
        &self,
        name: &str,
        args: &[&TsType],
        file: usize,
        depth: usize,
    ) -> Option<Vec<PropertyInfo>> {
        match (name, args) {
            ("Partial", [inner]) => self.collect(inner, file, depth + 1).map(|props| {
                props
                    .into_iter()
                    .map(|p| PropertyInfo {
                        optional: true,
                        ..p
                    })
                    .collect()
            }),
            ("Required", [inner]) => self.collect(inner, file, depth + 1).map(|props| {
                props
                    .into_iter()
                    .map(|p| PropertyInfo {
                        optional: false,
                        ..p
                    })
                    .collect()
            }),
            ("Readonly", [inner]) => self.collect(inner, file, depth + 1),
            ("Pick", [inner, keys]) => {
                let keys = literal_keys(keys);
                let mut props = self.collect(inner, file, depth + 1)?;
                props.retain(|p| keys.contains(&p.name));
                Some(props)
            }
            ("Omit", [inner, keys]) => {
                let keys = literal_keys(keys);
                let mut props = self.collect(inner, file, depth + 1)?;
                props.retain(|p| !keys.contains(&p.name));
                Some(props)
            }
            ("PropsWithChildren", [inner]) => {
                let mut props = self.collect(inner, file, depth + 1).unwrap_or_default();
                merge(
                    &mut props,
                    vec![PropertyInfo {
                        name: "children".to_string(),
                        type_text: "ReactNode".to_string(),
                        optional: true,
                    }],
                );
                Some(props)
            }
            _ => self.resolve_declared(name, file, depth),
        }
    }

    fn resolve_declared(&self, name: &str, file: usize, depth: usize) -> Option<Vec<PropertyInfo>> {
        if depth > MAX_DEPTH {
            return None;
        }
        let decls = self.lookup(name, file);
        let mut merged = Vec::new();
        let mut resolved = false;

        for (decl_file, decl) in decls {
            match decl {
                TypeDecl::Interface(interface) => {
                    resolved = true;
                    merge(&mut merged, self.members(&interface.body.body));
                    for parent in &interface.extends {
                        let Some(parent_name) = expr_name(&parent.expr) else {
                            continue;
                        };
                        let args: Vec<&TsType> = parent
                            .type_args
                            .as_ref()
                            .map(|p| p.params.iter().map(|t| &**t).collect())
                            .unwrap_or_default();
                        if let Some(props) =
                            self.resolve_named(&parent_name, &args, decl_file, depth + 1)
                        {
                            merge(&mut merged, props);
                        }
                    }
                }
                TypeDecl::Alias(alias) => {
                    if let Some(props) = self.collect(&alias.type_ann, decl_file, depth + 1) {
                        resolved = true;
                        merge(&mut merged, props);
                    }
                }
            }
        }

        resolved.then_some(merged)
    }

    fn lookup(&self, name: &str, file: usize) -> Vec<(usize, TypeDecl<'p>)> {
        let Some(candidates) = self.declarations.get(name) else {
            return Vec::new();
        };
        let owner = if candidates.iter().any(|(f, _)| *f == file) {
            file
        } else {
            candidates[0].0
        };
        candidates
            .iter()
            .filter(|(f, _)| *f == owner)
            .copied()
            .collect()
    }

    fn members(&self, elements: &[TsTypeElement]) -> Vec<PropertyInfo> {
        elements
            .iter()
            .filter_map(|element| match element {
                TsTypeElement::TsPropertySignature(sig) => Some(PropertyInfo {
                    name: key_name(&sig.key)?,
                    type_text: sig
                        .type_ann
                        .as_ref()
                        .map(|ann| self.type_to_string(&ann.type_ann))
                        .unwrap_or_else(|| "any".to_string()),
                    optional: sig.optional,
                }),
                TsTypeElement::TsMethodSignature(method) => {
                    let params = method
                        .params
                        .iter()
                        .map(|param| self.fn_param_to_string(param))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let ret = method
                        .type_ann
                        .as_ref()
                        .map(|ann| self.type_to_string(&ann.type_ann))
                        .unwrap_or_else(|| "void".to_string());
                    Some(PropertyInfo {
                        name: key_name(&method.key)?,
                        type_text: format!("({}) => {}", params, ret),
                        optional: method.optional,
                    })
                }
                _ => None,
            })
            .collect()
    }

    fn fn_param_to_string(&self, param: &TsFnParam) -> String {
        match param {
            TsFnParam::Ident(binding) => {
                let ty = binding
                    .type_ann
                    .as_ref()
                    .map(|ann| self.type_to_string(&ann.type_ann))
                    .unwrap_or_else(|| "any".to_string());
                let optional = if binding.id.optional { "?" } else { "" };
                format!("{}{}: {}", binding.id.sym, optional, ty)
            }
            other => self.program.snippet(other.span()),
        }
    }
}

/// Append properties not already present (earlier declarations win).
fn merge(target: &mut Vec<PropertyInfo>, props: Vec<PropertyInfo>) {
    for prop in props {
        if !target.iter().any(|t| t.name == prop.name) {
            target.push(prop);
        }
    }
}

/// Rightmost segment of a type name: `React.FC` → `FC`.
pub fn entity_name(name: &TsEntityName) -> String {
    match name {
        TsEntityName::Ident(ident) => ident.sym.to_string(),
        TsEntityName::TsQualifiedName(qualified) => qualified.right.sym.to_string(),
    }
}

fn expr_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(ident) => Some(ident.sym.to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn key_name(key: &Expr) -> Option<String> {
    match key {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

/// String literal members of a key type: `'a' | 'b'` → `["a", "b"]`.
fn literal_keys(ty: &TsType) -> Vec<String> {
    match ty {
        TsType::TsLitType(lit) => match &lit.lit {
            TsLit::Str(s) => s.value.as_str().map(|s| vec![s.to_string()]).unwrap_or_default(),
            _ => Vec::new(),
        },
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
            union.types.iter().flat_map(|t| literal_keys(t)).collect()
        }
        TsType::TsParenthesizedType(paren) => literal_keys(&paren.type_ann),
        _ => Vec::new(),
    }
}
