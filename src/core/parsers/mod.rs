//! File parsers for source code, compiler configuration and locale files.
//!
//! - `json`: locale data parser (flattens nested JSON into dot-joined keys)
//! - `jsx`: TS/TSX source parser (uses swc for AST generation)
//! - `tsconfig`: compiler configuration parser (JSON with comments)

pub mod json;
pub mod jsx;
pub mod tsconfig;
