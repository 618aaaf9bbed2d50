use anyhow::{Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use swc_common::{FileName, Globals, SourceFile, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

#[derive(Debug)]
pub struct ParsedSource {
    pub module: Module,
    pub source_file: Arc<SourceFile>,
}

/// Choose the parser dialect from the file extension.
///
/// `.tsx` enables JSX; `.d.ts`/`.d.mts`/`.d.cts` enable declaration mode.
pub fn syntax_for(file_path: &Path) -> Syntax {
    let name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Syntax::Typescript(TsSyntax {
        tsx: name.ends_with(".tsx"),
        dts: is_declaration_file(&name),
        ..Default::default()
    })
}

pub fn is_declaration_file(file_name: &str) -> bool {
    file_name.ends_with(".d.ts") || file_name.ends_with(".d.mts") || file_name.ends_with(".d.cts")
}

/// Parse TS/TSX source code into an AST.
///
/// Accepts a shared SourceMap so every file of a program lives in one span space
/// and parsing can run on several threads at once.
pub fn parse_source(
    code: String,
    file_path: &Path,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.to_path_buf()).into(), code);

        let mut parser = Parser::new(
            syntax_for(file_path),
            StringInput::from(&*source_file),
            None,
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path.display(), e.kind()))?;

        Ok(ParsedSource {
            module,
            source_file,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::FilePathMapping;

    fn source_map() -> Arc<SourceMap> {
        Arc::new(SourceMap::new(FilePathMapping::empty()))
    }

    #[test]
    fn test_parse_tsx_component() {
        let code = "export const Foo = () => <div className=\"x\" />;".to_string();
        let parsed = parse_source(code, Path::new("Foo.tsx"), source_map()).unwrap();
        assert_eq!(parsed.module.body.len(), 1);
    }

    #[test]
    fn test_parse_ts_generic_arrow() {
        // `<T>(x: T) => x` is only valid when JSX is disabled.
        let code = "export const id = <T,>(x: T): T => x;".to_string();
        assert!(parse_source(code, Path::new("id.ts"), source_map()).is_ok());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let code = "export const = ;".to_string();
        let err = parse_source(code, Path::new("broken.ts"), source_map()).unwrap_err();
        assert!(err.to_string().contains("broken.ts"));
    }

    #[test]
    fn test_declaration_file_detection() {
        assert!(is_declaration_file("env.d.ts"));
        assert!(!is_declaration_file("env.ts"));
    }
}
