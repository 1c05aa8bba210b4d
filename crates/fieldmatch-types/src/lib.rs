//! Neutral declared-type model for the fieldmatch engine.
//!
//! This crate provides the values the matcher operates on and the boundary
//! to type-introspection backends:
//! - Type handles and shapes (`TypeId`, `Shape`, `StructShape`, `Field`)
//! - The backend trait (`TypeDatabase`)
//! - An in-memory backend (`TypeStore`)
//! - A JSON table adapter (`TypeTable`)

pub mod types;
pub use types::{Field, Shape, StructShape, TypeDatabase, TypeId};

// Concurrent in-memory backend
pub mod store;
pub use store::{TypeEntry, TypeStore};

// JSON declared-type tables
pub mod table;
pub use table::{DeclKind, FieldDecl, TableError, TypeDecl, TypeTable};
