//! The four analyses. Each is a standalone pass over the selected files that
//! takes an explicit [`AnalysisContext`](crate::core::AnalysisContext) and
//! returns a serializable result.

pub mod components;
pub mod i18n;
pub mod queries;
pub mod routes;

pub use components::{ComponentCategory, ComponentKind, ComponentRecord, PropRecord};
pub use i18n::I18nCoverageReport;
pub use queries::QueryRecord;
pub use routes::RouteNode;
