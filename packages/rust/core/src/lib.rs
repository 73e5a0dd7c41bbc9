//! Core reconstruction logic for scenport.
//!
//! Turns the flat, loosely-linked step record set of a scenario export into
//! hierarchical step trees with freshly generated identifiers: record
//! indexing, root inference, child resolution (with cross-scenario
//! recovery), recursive tree building with blob rehoming, and per-scenario
//! assembly into an import analysis.

pub mod assembler;
pub mod builder;
pub mod index;
pub mod pipeline;
pub mod resolver;
pub mod roots;

pub use assembler::assemble_scenario;
pub use builder::build_forest;
pub use index::RecordIndex;
pub use pipeline::{ImportRequest, analyze};
pub use resolver::resolve_children;
pub use roots::select_roots;
