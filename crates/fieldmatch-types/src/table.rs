//! JSON declared-type tables.
//!
//! A thin adapter that lets a driver (or a test) describe the declared types
//! of a codebase as data instead of going through a live introspection
//! backend:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "example.org/v1.Widget", "kind": "struct", "fields": [
//!         { "name": "Spec", "type": "example.org/v1.WidgetSpec" }
//!     ] },
//!     { "name": "example.org/v1.WidgetSpec", "kind": "struct" },
//!     { "name": "example.org/v1.WidgetList", "kind": "sequence", "element": "example.org/v1.Widget" },
//!     { "name": "string", "kind": "other" }
//!   ]
//! }
//! ```
//!
//! Type references may point forward; all names are reserved before any
//! shape is defined. A table that fails validation registers nothing.

use crate::store::TypeStore;
use crate::types::{Field, Shape, TypeId};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a type table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid type table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),

    #[error("type `{owner}` references undeclared type `{target}`")]
    UnknownType { owner: String, target: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTable {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub name: String,
    #[serde(flatten)]
    pub kind: DeclKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclKind {
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Sequence {
        element: String,
    },
    Mapping {
        value: String,
    },
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub embedded: bool,
    /// Overrides the qualified type text; defaults to `type`.
    #[serde(default)]
    pub qualified_type: Option<String>,
}

impl TypeTable {
    pub fn from_json_str(source: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Check that names are unique and every reference points at a type
    /// declared in this table.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut names: IndexSet<&str> = IndexSet::with_capacity(self.types.len());
        for decl in &self.types {
            if !names.insert(decl.name.as_str()) {
                return Err(TableError::DuplicateType(decl.name.clone()));
            }
        }

        for decl in &self.types {
            for target in decl.kind.references() {
                if !names.contains(target) {
                    return Err(TableError::UnknownType {
                        owner: decl.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Register every declared type in `store`.
    ///
    /// The table is validated first; on error `store` is left untouched.
    /// Returns the ids keyed by name, in declaration order.
    pub fn load_into(&self, store: &TypeStore) -> Result<IndexMap<String, TypeId>, TableError> {
        self.validate()?;

        let ids: IndexMap<String, TypeId> = self
            .types
            .iter()
            .map(|decl| (decl.name.clone(), store.reserve(decl.name.as_str())))
            .collect();
        let reference = |target: &str| ids.get(target).copied().unwrap_or(TypeId::INVALID);

        for (decl, &id) in self.types.iter().zip(ids.values()) {
            let shape = match &decl.kind {
                DeclKind::Struct { fields } => Shape::structure(
                    fields
                        .iter()
                        .map(|field| {
                            let qualified =
                                field.qualified_type.as_deref().unwrap_or(&field.type_name);
                            let built = Field::new(
                                field.name.as_str(),
                                qualified,
                                reference(&field.type_name),
                            );
                            if field.embedded { built.embedded() } else { built }
                        })
                        .collect(),
                ),
                DeclKind::Sequence { element } => Shape::Sequence(reference(element)),
                DeclKind::Mapping { value } => Shape::Mapping(reference(value)),
                DeclKind::Other => Shape::Other,
            };
            store.define(id, shape);
        }

        debug!(types = ids.len(), "loaded type table");
        Ok(ids)
    }
}

impl DeclKind {
    /// Names of the declared types this declaration refers to.
    fn references(&self) -> Vec<&str> {
        match self {
            Self::Struct { fields } => fields.iter().map(|f| f.type_name.as_str()).collect(),
            Self::Sequence { element } => vec![element.as_str()],
            Self::Mapping { value } => vec![value.as_str()],
            Self::Other => Vec::new(),
        }
    }
}

impl TypeStore {
    /// Build a store from a JSON type table.
    pub fn from_json_str(source: &str) -> Result<(Self, IndexMap<String, TypeId>), TableError> {
        let table = TypeTable::from_json_str(source)?;
        let store = Self::new();
        let ids = table.load_into(&store)?;
        Ok((store, ids))
    }
}

#[cfg(test)]
#[path = "../tests/table_tests.rs"]
mod tests;
