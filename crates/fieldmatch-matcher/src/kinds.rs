//! Whole-type classifications.
//!
//! An [`ObjectKind`] is a fixed conjunction of catalog matchers describing a
//! family of resource types. Classifying a type is a `has` query per kind.

use crate::catalog::FieldRole;
use crate::matcher::{Matcher, has_field_that, is_embedded, is_slice};
use crate::query::MatchContext;
use fieldmatch_types::TypeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    /// A managed resource: metadata envelopes, a spec embedding the managed
    /// resource spec and a status embedding the managed resource status.
    Managed,
    /// A resource claim: metadata envelopes, a spec embedding the claim spec
    /// and a claim status.
    Claim,
    /// A non-portable resource class: metadata envelopes and a spec template
    /// embedding the non-portable class spec template.
    NonPortableClass,
    /// A portable resource class: metadata envelopes and an embedded
    /// portable class.
    PortableClass,
    /// A list of portable resource classes.
    PortableClassList,
}

fn embedded(role: FieldRole) -> Matcher {
    role.matcher().and(is_embedded())
}

fn portable_class() -> Vec<Matcher> {
    vec![
        embedded(FieldRole::TypeMeta),
        embedded(FieldRole::ObjectMeta),
        embedded(FieldRole::PortableClass),
    ]
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        Self::Managed,
        Self::Claim,
        Self::NonPortableClass,
        Self::PortableClass,
        Self::PortableClassList,
    ];

    /// The matchers a type must satisfy to be of this kind.
    pub fn matchers(self) -> Vec<Matcher> {
        match self {
            Self::Managed => vec![
                embedded(FieldRole::TypeMeta),
                embedded(FieldRole::ObjectMeta),
                FieldRole::Spec
                    .matcher()
                    .and(has_field_that([embedded(FieldRole::ResourceSpec)])),
                FieldRole::Status
                    .matcher()
                    .and(has_field_that([embedded(FieldRole::ResourceStatus)])),
            ],
            Self::Claim => vec![
                embedded(FieldRole::TypeMeta),
                embedded(FieldRole::ObjectMeta),
                FieldRole::Spec
                    .matcher()
                    .and(has_field_that([embedded(FieldRole::ResourceClaimSpec)])),
                FieldRole::ResourceClaimStatus.matcher(),
            ],
            Self::NonPortableClass => vec![
                embedded(FieldRole::TypeMeta),
                embedded(FieldRole::ObjectMeta),
                FieldRole::SpecTemplate.matcher().and(has_field_that([embedded(
                    FieldRole::NonPortableClassSpecTemplate,
                )])),
            ],
            Self::PortableClass => portable_class(),
            Self::PortableClassList => vec![
                embedded(FieldRole::TypeMeta),
                embedded(FieldRole::ListMeta),
                FieldRole::Items
                    .matcher()
                    .and(is_slice())
                    .and(has_field_that(portable_class())),
            ],
        }
    }

    pub fn matches(self, ctx: &MatchContext<'_>, type_id: TypeId) -> bool {
        ctx.has(type_id, &self.matchers())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Every kind `type_id` satisfies, in [`ObjectKind::ALL`] order.
pub fn classify(ctx: &MatchContext<'_>, type_id: TypeId) -> Vec<ObjectKind> {
    let kinds: Vec<ObjectKind> = ObjectKind::ALL
        .into_iter()
        .filter(|kind| kind.matches(ctx, type_id))
        .collect();
    debug!(type_id = %type_id, ?kinds, "classified");
    kinds
}

#[cfg(test)]
#[path = "../tests/kinds_tests.rs"]
mod tests;
