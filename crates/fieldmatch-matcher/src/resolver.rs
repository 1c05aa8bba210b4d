//! Type shape resolution.
//!
//! [`ShapeResolver`] sits between the matcher and a [`TypeDatabase`]. It
//! caches every shape it asks the backend for, so a field's shape is computed
//! at most once per analysis run no matter how many matchers inspect it.
//! Entries are never invalidated: declared types do not change during a run.

use dashmap::DashMap;
use fieldmatch_types::{Shape, StructShape, TypeDatabase, TypeId};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tracing::trace;

pub struct ShapeResolver<'db> {
    db: &'db dyn TypeDatabase,
    /// `None` records a backend miss so it is not asked again.
    cache: DashMap<TypeId, Option<Shape>, FxBuildHasher>,
}

impl<'db> ShapeResolver<'db> {
    pub fn new(db: &'db dyn TypeDatabase) -> Self {
        Self {
            db,
            cache: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn database(&self) -> &'db dyn TypeDatabase {
        self.db
    }

    /// Underlying shape of `type_id`, consulting the backend on first use.
    pub fn shape_of(&self, type_id: TypeId) -> Option<Shape> {
        if let Some(cached) = self.cache.get(&type_id) {
            return cached.clone();
        }
        let shape = self.db.shape_of(type_id);
        trace!(
            type_id = %type_id,
            kind = shape.as_ref().map_or("unknown", Shape::kind_name),
            "ShapeResolver: cache miss"
        );
        self.cache.insert(type_id, shape.clone());
        shape
    }

    /// Struct shape of `type_id`.
    ///
    /// A struct resolves to itself. A sequence or mapping resolves to its
    /// element struct, unwrapping exactly one level. Everything else,
    /// including unknown ids, resolves to `None`.
    pub fn resolve(&self, type_id: TypeId) -> Option<Arc<StructShape>> {
        match self.shape_of(type_id)? {
            Shape::Struct(shape) => Some(shape),
            Shape::Sequence(inner) | Shape::Mapping(inner) => match self.shape_of(inner)? {
                Shape::Struct(shape) => Some(shape),
                _ => None,
            },
            Shape::Other => None,
        }
    }

    /// Number of type ids whose shape has been looked up.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
