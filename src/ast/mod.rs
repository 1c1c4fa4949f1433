//! Database-agnostic query AST.
//!
//! A closed set of node kinds, immutable once built. The host planner
//! annotates every column with the metadata produced by type mapping.

pub mod builders;
pub mod expr;
pub mod functions;
pub mod literals;
pub mod select;

pub use expr::*;
pub use functions::*;
pub use literals::*;
pub use select::*;
