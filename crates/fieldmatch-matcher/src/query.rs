//! Structural queries over declared types.
//!
//! `has` is an AND across matchers combined with an existential search across
//! fields per matcher. Different matchers may be satisfied by different
//! fields; no single field needs to satisfy all of them.
//!
//! Absence of structure is an answer, not an error: a type that does not
//! resolve to a struct simply does not match.

use crate::matcher::{FieldRef, Matcher};
use crate::options::MatchOptions;
use crate::resolver::ShapeResolver;
use fieldmatch_types::{StructShape, TypeDatabase, TypeId};
use std::sync::Arc;
use tracing::{debug, trace};

/// Everything a query needs: the backend, its shape cache and the options.
///
/// A context is built once per analysis run and shared (it is `Sync`) by all
/// queries of that run.
pub struct MatchContext<'db> {
    resolver: ShapeResolver<'db>,
    options: MatchOptions,
}

impl<'db> MatchContext<'db> {
    pub fn new(db: &'db dyn TypeDatabase) -> Self {
        Self::with_options(db, MatchOptions::default())
    }

    pub fn with_options(db: &'db dyn TypeDatabase, options: MatchOptions) -> Self {
        Self {
            resolver: ShapeResolver::new(db),
            options,
        }
    }

    pub const fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub const fn resolver(&self) -> &ShapeResolver<'db> {
        &self.resolver
    }

    /// Struct shape of `type_id`; see [`ShapeResolver::resolve`].
    pub fn resolve(&self, type_id: TypeId) -> Option<Arc<StructShape>> {
        self.resolver.resolve(type_id)
    }

    /// True if some field of `shape` satisfies `matcher`.
    ///
    /// Fields are scanned in declaration order and the scan stops at the
    /// first match.
    pub fn exists(&self, shape: &StructShape, matcher: &Matcher) -> bool {
        shape
            .fields()
            .iter()
            .any(|field| matcher.matches(&FieldRef::new(field, self)))
    }

    /// True if `type_id` resolves to a struct and every matcher is satisfied
    /// by at least one of its fields.
    ///
    /// With no matchers this only asks whether `type_id` resolves to a struct.
    pub fn has(&self, type_id: TypeId, matchers: &[Matcher]) -> bool {
        let Some(shape) = self.resolve(type_id) else {
            trace!(type_id = %type_id, "has: no struct shape");
            return false;
        };
        for matcher in matchers {
            if !self.exists(&shape, matcher) {
                trace!(type_id = %type_id, matcher = %matcher, "has: unsatisfied");
                return false;
            }
        }
        debug!(type_id = %type_id, matchers = matchers.len(), "has: matched");
        true
    }
}

/// Free-function form of [`MatchContext::has`].
pub fn has(ctx: &MatchContext<'_>, type_id: TypeId, matchers: &[Matcher]) -> bool {
    ctx.has(type_id, matchers)
}

/// Free-function form of [`MatchContext::exists`].
pub fn exists(ctx: &MatchContext<'_>, shape: &StructShape, matcher: &Matcher) -> bool {
    ctx.exists(shape, matcher)
}

#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod tests;
