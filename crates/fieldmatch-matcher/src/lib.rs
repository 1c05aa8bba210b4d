//! Structural field matching.
//!
//! Decides, from a declared type's shape alone, whether it carries a set of
//! conventional fields. The pieces, leaves first:
//!
//! - **Resolution** (`ShapeResolver`): declared type -> struct shape, through
//!   at most one sequence or mapping, with a per-run shape cache
//! - **Matchers** (`Matcher`): pure tests over one field, chained with `and`
//! - **Queries** (`MatchContext::has`): every matcher satisfied by some field
//! - **Catalog** (`FieldRole`, `CATALOG`): conventional name/type pairs
//! - **Kinds** (`ObjectKind`): whole-type classifications built from the catalog
//!
//! Nothing here fails: a type without the requested structure is a `false`.

pub mod options;
pub use options::{MatchOptions, TypeIdentityMode};

mod resolver;
pub use resolver::ShapeResolver;

pub mod matcher;
pub use matcher::{
    FieldRef, Matcher, has_field_that, has_type_identity, has_type_suffix, is_embedded, is_named,
    is_slice, is_type_named,
};

mod query;
pub use query::{MatchContext, exists, has};

pub mod catalog;
pub use catalog::{CATALOG, FieldConvention, FieldRole, TypeCheck, roles_of};

pub mod kinds;
pub use kinds::{ObjectKind, classify};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
