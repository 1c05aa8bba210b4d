//! Conventional field roles.
//!
//! Each role is one row of [`CATALOG`]: the field name a type uses for it and,
//! for most roles, the qualified type the field is expected to have. Rows
//! for `Spec`, `SpecTemplate` and `Status` name a convention rather than a
//! type, so they stay literal suffixes under exact type identity. The
//! matcher for a role is built from the row by the generic constructors
//! alone, so adding a role means adding a row.

use crate::matcher::{FieldRef, Matcher, has_type_suffix, is_named, is_type_named};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// Field names.
pub const NAME_TYPE_META: &str = "TypeMeta";
pub const NAME_OBJECT_META: &str = "ObjectMeta";
pub const NAME_LIST_META: &str = "ListMeta";
pub const NAME_SPEC: &str = "Spec";
pub const NAME_SPEC_TEMPLATE: &str = "SpecTemplate";
pub const NAME_STATUS: &str = "Status";
pub const NAME_RESOURCE_SPEC: &str = "ResourceSpec";
pub const NAME_RESOURCE_STATUS: &str = "ResourceStatus";
pub const NAME_RESOURCE_CLAIM_SPEC: &str = "ResourceClaimSpec";
pub const NAME_NON_PORTABLE_CLASS_SPEC_TEMPLATE: &str = "NonPortableClassSpecTemplate";
pub const NAME_PORTABLE_CLASS: &str = "PortableClass";
pub const NAME_ITEMS: &str = "Items";

// Field type suffixes.
pub const TYPE_SUFFIX_TYPE_META: &str = "k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta";
pub const TYPE_SUFFIX_OBJECT_META: &str = "k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta";
pub const TYPE_SUFFIX_LIST_META: &str = "k8s.io/apimachinery/pkg/apis/meta/v1.ListMeta";
pub const TYPE_SUFFIX_SPEC: &str = NAME_SPEC;
pub const TYPE_SUFFIX_SPEC_TEMPLATE: &str = NAME_SPEC_TEMPLATE;
pub const TYPE_SUFFIX_STATUS: &str = NAME_STATUS;
pub const TYPE_SUFFIX_RESOURCE_SPEC: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceSpec";
pub const TYPE_SUFFIX_RESOURCE_STATUS: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceStatus";
pub const TYPE_SUFFIX_RESOURCE_CLAIM_SPEC: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceClaimSpec";
pub const TYPE_SUFFIX_RESOURCE_CLAIM_STATUS: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceClaimStatus";
pub const TYPE_SUFFIX_NON_PORTABLE_CLASS_SPEC_TEMPLATE: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.NonPortableClassSpecTemplate";
pub const TYPE_SUFFIX_PORTABLE_CLASS: &str =
    "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.PortableClass";

/// A recognised structural role of a field.
///
/// Variant order matches the row order of [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldRole {
    /// Type metadata envelope.
    TypeMeta,
    /// Object metadata envelope.
    ObjectMeta,
    /// List metadata envelope.
    ListMeta,
    /// Resource specification.
    Spec,
    /// Resource specification template.
    SpecTemplate,
    /// Resource status.
    Status,
    /// Managed resource specification.
    ResourceSpec,
    /// Managed resource status.
    ResourceStatus,
    /// Resource claim specification.
    ResourceClaimSpec,
    /// Resource claim status. Named `Status`, told apart by its type.
    ResourceClaimStatus,
    /// Non-portable resource class spec template.
    NonPortableClassSpecTemplate,
    /// Portable resource class reference.
    PortableClass,
    /// Payload of a list type. Matched by name only.
    Items,
}

/// How a catalog row checks a field's qualified type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCheck {
    /// Field name only.
    Name,
    /// A naming convention such as `...Spec`: always a literal suffix.
    Suffix(&'static str),
    /// A qualified type identity, compared under the context's
    /// [`crate::TypeIdentityMode`].
    Identity(&'static str),
}

impl TypeCheck {
    pub const fn expected(self) -> Option<&'static str> {
        match self {
            Self::Name => None,
            Self::Suffix(text) | Self::Identity(text) => Some(text),
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConvention {
    pub role: FieldRole,
    pub field_name: &'static str,
    pub type_check: TypeCheck,
}

impl FieldConvention {
    pub fn matcher(&self) -> Matcher {
        match self.type_check {
            TypeCheck::Name => is_named(self.field_name),
            TypeCheck::Suffix(suffix) => is_named(self.field_name).and(has_type_suffix(suffix)),
            TypeCheck::Identity(identity) => is_type_named(identity, self.field_name),
        }
    }
}

const fn identity(role: FieldRole, field_name: &'static str, ty: &'static str) -> FieldConvention {
    FieldConvention {
        role,
        field_name,
        type_check: TypeCheck::Identity(ty),
    }
}

const fn suffix(role: FieldRole, field_name: &'static str, ty: &'static str) -> FieldConvention {
    FieldConvention {
        role,
        field_name,
        type_check: TypeCheck::Suffix(ty),
    }
}

const fn named(role: FieldRole, field_name: &'static str) -> FieldConvention {
    FieldConvention {
        role,
        field_name,
        type_check: TypeCheck::Name,
    }
}

pub static CATALOG: [FieldConvention; 13] = [
    identity(FieldRole::TypeMeta, NAME_TYPE_META, TYPE_SUFFIX_TYPE_META),
    identity(FieldRole::ObjectMeta, NAME_OBJECT_META, TYPE_SUFFIX_OBJECT_META),
    identity(FieldRole::ListMeta, NAME_LIST_META, TYPE_SUFFIX_LIST_META),
    suffix(FieldRole::Spec, NAME_SPEC, TYPE_SUFFIX_SPEC),
    suffix(FieldRole::SpecTemplate, NAME_SPEC_TEMPLATE, TYPE_SUFFIX_SPEC_TEMPLATE),
    suffix(FieldRole::Status, NAME_STATUS, TYPE_SUFFIX_STATUS),
    identity(FieldRole::ResourceSpec, NAME_RESOURCE_SPEC, TYPE_SUFFIX_RESOURCE_SPEC),
    identity(FieldRole::ResourceStatus, NAME_RESOURCE_STATUS, TYPE_SUFFIX_RESOURCE_STATUS),
    identity(
        FieldRole::ResourceClaimSpec,
        NAME_RESOURCE_CLAIM_SPEC,
        TYPE_SUFFIX_RESOURCE_CLAIM_SPEC,
    ),
    identity(
        FieldRole::ResourceClaimStatus,
        NAME_STATUS,
        TYPE_SUFFIX_RESOURCE_CLAIM_STATUS,
    ),
    identity(
        FieldRole::NonPortableClassSpecTemplate,
        NAME_NON_PORTABLE_CLASS_SPEC_TEMPLATE,
        TYPE_SUFFIX_NON_PORTABLE_CLASS_SPEC_TEMPLATE,
    ),
    identity(FieldRole::PortableClass, NAME_PORTABLE_CLASS, TYPE_SUFFIX_PORTABLE_CLASS),
    named(FieldRole::Items, NAME_ITEMS),
];

/// Row matchers, built once and shared by [`roles_of`].
static CATALOG_MATCHERS: LazyLock<Vec<Matcher>> =
    LazyLock::new(|| CATALOG.iter().map(FieldConvention::matcher).collect());

impl FieldRole {
    pub const ALL: [FieldRole; 13] = [
        Self::TypeMeta,
        Self::ObjectMeta,
        Self::ListMeta,
        Self::Spec,
        Self::SpecTemplate,
        Self::Status,
        Self::ResourceSpec,
        Self::ResourceStatus,
        Self::ResourceClaimSpec,
        Self::ResourceClaimStatus,
        Self::NonPortableClassSpecTemplate,
        Self::PortableClass,
        Self::Items,
    ];

    pub fn convention(self) -> &'static FieldConvention {
        &CATALOG[self as usize]
    }

    pub fn field_name(self) -> &'static str {
        self.convention().field_name
    }

    pub fn type_check(self) -> TypeCheck {
        self.convention().type_check
    }

    pub fn type_suffix(self) -> Option<&'static str> {
        self.convention().type_check.expected()
    }

    pub fn matcher(self) -> Matcher {
        self.convention().matcher()
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Roles whose convention `field` satisfies, in catalog order.
pub fn roles_of(field: &FieldRef<'_>) -> Vec<FieldRole> {
    CATALOG
        .iter()
        .zip(CATALOG_MATCHERS.iter())
        .filter(|(_, matcher)| matcher.matches(field))
        .map(|(entry, _)| entry.role)
        .collect()
}

#[cfg(test)]
#[path = "../tests/catalog_tests.rs"]
mod tests;
