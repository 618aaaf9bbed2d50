//! Core analysis engine shared by every scanner.
//!
//! ## Module Structure
//!
//! - `checker`: type-resolution service (interfaces, aliases, utility types)
//! - `context`: project settings and the per-run analysis context
//! - `file_selector`: narrows the program to application source files
//! - `helpers`: small AST helpers (literals, callee names, object properties)
//! - `parsers`: TS/TSX, tsconfig and locale file parsers
//! - `program`: loads and parses the file set named by the compiler configuration

pub mod checker;
pub mod context;
pub mod file_selector;
pub mod helpers;
pub mod parsers;
pub mod program;

pub use checker::{PropertyInfo, TypeChecker};
pub use context::{AnalysisContext, ProjectContext};
pub use file_selector::SourceFileSelector;
pub use program::{Program, SourceFile};
