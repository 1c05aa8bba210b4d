//! fieldmatch: structural field matching for static-analysis rule engines.
//!
//! Re-exports the type model (`fieldmatch-types`) and the matcher engine
//! (`fieldmatch-matcher`), plus the ambient pieces a driver needs:
//! - File-based options and type-table loading (`config`)
//! - Tracing subscriber setup (`tracing_config`)

pub use fieldmatch_matcher::*;
pub use fieldmatch_types::*;

pub mod config;
pub use config::{load_options, load_type_table};

pub mod tracing_config;
