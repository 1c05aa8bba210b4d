//! Field matchers and their combinators.
//!
//! A [`Matcher`] is a pure function over a single struct field. Matchers are
//! built from the constructors in this module and chained with
//! [`Matcher::and`]:
//!
//! ```ignore
//! let embedded_meta = is_type_named(OBJECT_META, "ObjectMeta").and(is_embedded());
//! let spec_with_resource = is_named("Spec").and(has_field_that([
//!     is_type_named(RESOURCE_SPEC, "ResourceSpec").and(is_embedded()),
//! ]));
//! ```
//!
//! Matchers hold no mutable state and are `Send + Sync`; cloning one is a
//! reference-count bump.

use crate::query::MatchContext;
use fieldmatch_types::{Field, Shape, TypeId};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// FieldRef
// =============================================================================

/// A field seen through the context it is matched in.
///
/// Gives matchers access to the field's own shape (resolved lazily through
/// the context's cache) and to the active [`crate::MatchOptions`].
#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    field: &'a Field,
    ctx: &'a MatchContext<'a>,
}

impl<'a> FieldRef<'a> {
    pub const fn new(field: &'a Field, ctx: &'a MatchContext<'a>) -> Self {
        Self { field, ctx }
    }

    pub const fn field(&self) -> &'a Field {
        self.field
    }

    pub const fn context(&self) -> &'a MatchContext<'a> {
        self.ctx
    }

    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    pub fn qualified_type(&self) -> &'a str {
        self.field.qualified_type()
    }

    pub const fn is_embedded(&self) -> bool {
        self.field.is_embedded()
    }

    pub const fn type_id(&self) -> TypeId {
        self.field.type_id()
    }

    /// The field's own type shape. `None` if the backend does not know it.
    pub fn shape(&self) -> Option<Shape> {
        self.ctx.resolver().shape_of(self.field.type_id())
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(self.field).finish()
    }
}

// =============================================================================
// Matcher
// =============================================================================

type MatchFn = dyn Fn(&FieldRef<'_>) -> bool + Send + Sync;

/// A boolean test over one struct field.
#[derive(Clone)]
pub struct Matcher {
    label: Arc<str>,
    test: Arc<MatchFn>,
}

impl Matcher {
    /// Wrap a closure as a matcher. `label` is used in logs and `Debug`.
    pub fn new<F>(label: impl Into<Arc<str>>, test: F) -> Self
    where
        F: Fn(&FieldRef<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    pub fn matches(&self, field: &FieldRef<'_>) -> bool {
        (self.test)(field)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// A matcher that holds when both `self` and `other` hold.
    ///
    /// `self` runs first; `other` is not evaluated when `self` fails.
    #[must_use]
    pub fn and(self, other: Matcher) -> Matcher {
        let label = format!("{} & {}", self.label, other.label);
        let (first, second) = (self.test, other.test);
        Self::new(label, move |field| first(field) && second(field))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.label).finish()
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Holds when the field is embedded.
pub fn is_embedded() -> Matcher {
    Matcher::new("is_embedded", |field| field.is_embedded())
}

/// Holds when the field's own type is a sequence.
pub fn is_slice() -> Matcher {
    Matcher::new("is_slice", |field| {
        field.shape().is_some_and(|shape| shape.is_sequence())
    })
}

/// Holds when the field is named exactly `name` (case-sensitive).
pub fn is_named(name: impl Into<Arc<str>>) -> Matcher {
    let name: Arc<str> = name.into();
    Matcher::new(format!("is_named({name})"), move |field| {
        field.name() == &*name
    })
}

/// Holds when the field's qualified type matches `expected` under the
/// context's [`crate::TypeIdentityMode`].
pub fn has_type_identity(expected: impl Into<Arc<str>>) -> Matcher {
    let expected: Arc<str> = expected.into();
    Matcher::new(format!("has_type_identity({expected})"), move |field| {
        field
            .context()
            .options()
            .type_identity
            .matches(field.qualified_type(), &expected)
    })
}

/// Holds when the field's qualified type ends with `suffix`, whatever the
/// context's identity mode.
pub fn has_type_suffix(suffix: impl Into<Arc<str>>) -> Matcher {
    let suffix: Arc<str> = suffix.into();
    Matcher::new(format!("has_type_suffix({suffix})"), move |field| {
        field.qualified_type().ends_with(&*suffix)
    })
}

/// Holds when the field is named `name` and its qualified type matches
/// `type_suffix` under the context's [`crate::TypeIdentityMode`].
///
/// The name is checked first.
pub fn is_type_named(type_suffix: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Matcher {
    is_named(name).and(has_type_identity(type_suffix))
}

/// Holds when the field's own type resolves to a struct (possibly through
/// one sequence or mapping) that satisfies every matcher in `matchers`, each
/// by some field of its own.
pub fn has_field_that(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    let matchers: SmallVec<[Matcher; 4]> = matchers.into_iter().collect();
    let label = format!(
        "has_field_that({})",
        matchers
            .iter()
            .map(Matcher::label)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Matcher::new(label, move |field| {
        field.context().has(field.type_id(), &matchers)
    })
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod tests;
