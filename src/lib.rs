//! Stocktake - static inventories of a React/TypeScript codebase
//!
//! Stocktake parses the files named by a project's `tsconfig.json` and writes
//! JSON inventories of its exported components, translation key coverage,
//! data-fetching queries and route tree.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Program loading, type resolution and file selection
//! - `inventory`: JSON artifact writer
//! - `logging`: `tracing` subscriber setup
//! - `scanners`: The component, i18n, query and route analyses
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod inventory;
pub mod logging;
pub mod scanners;
pub mod utils;
