//! Neutral declared-type representation.
//!
//! Every type-introspection backend is translated into these values before
//! matching starts. Nothing here knows about a particular compiler API:
//!
//! - [`TypeId`]: `Copy` handle to a declared type owned by a [`TypeDatabase`]
//! - [`Shape`]: the underlying structure of a declared type
//! - [`Field`]: one struct field (name, qualified type, embedded flag, type)
//!
//! Shapes are immutable for the lifetime of an analysis run.

use std::fmt;
use std::sync::Arc;

// =============================================================================
// TypeId
// =============================================================================

/// Handle to a declared type.
///
/// Allocated by the backend; `TypeId::INVALID` never resolves to a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Sentinel value for an unknown type.
    pub const INVALID: Self = Self(0);

    /// First valid `TypeId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `TypeId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Field
// =============================================================================

/// A struct field descriptor.
///
/// `qualified_type` is the textual identity of the field's type (for example
/// `k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta`) and is what suffix
/// comparisons run against. The field's own shape is not stored here; it is
/// resolved on demand from `type_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    name: Arc<str>,
    qualified_type: Arc<str>,
    embedded: bool,
    type_id: TypeId,
}

impl Field {
    pub fn new(
        name: impl Into<Arc<str>>,
        qualified_type: impl Into<Arc<str>>,
        type_id: TypeId,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_type: qualified_type.into(),
            embedded: false,
            type_id,
        }
    }

    /// Mark the field as embedded (promoted into the containing struct).
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_type(&self) -> &str {
        &self.qualified_type
    }

    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// Ordered field list of a struct type.
///
/// Declaration order is preserved, but no matching outcome depends on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructShape {
    fields: Vec<Field>,
}

impl StructShape {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// First field with the given name, if any.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Underlying structure of a declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A struct with named fields.
    Struct(Arc<StructShape>),
    /// A sequence (slice, list, array) of the element type.
    Sequence(TypeId),
    /// A mapping whose values have the given type. Key types are irrelevant
    /// to matching and are not modelled.
    Mapping(TypeId),
    /// Anything else: scalars, functions, interfaces, pointers, ...
    Other,
}

impl Shape {
    pub fn structure(fields: Vec<Field>) -> Self {
        Self::Struct(Arc::new(StructShape::new(fields)))
    }

    pub fn as_struct(&self) -> Option<&Arc<StructShape>> {
        match self {
            Self::Struct(shape) => Some(shape),
            _ => None,
        }
    }

    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Element type of a one-level container (`Sequence` or `Mapping`).
    pub const fn element_type(&self) -> Option<TypeId> {
        match self {
            Self::Sequence(inner) | Self::Mapping(inner) => Some(*inner),
            Self::Struct(_) | Self::Other => None,
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Other => "other",
        }
    }
}

// =============================================================================
// TypeDatabase
// =============================================================================

/// Boundary to a type-introspection backend.
///
/// Implementations translate whatever representation the backend uses into
/// neutral [`Shape`] values. Both methods return `None` for ids the backend
/// does not know.
pub trait TypeDatabase: Send + Sync {
    /// Underlying shape of a declared type.
    fn shape_of(&self, type_id: TypeId) -> Option<Shape>;

    /// Fully-qualified name of a declared type.
    fn type_name(&self, type_id: TypeId) -> Option<Arc<str>>;
}

impl<T: TypeDatabase + ?Sized> TypeDatabase for &T {
    fn shape_of(&self, type_id: TypeId) -> Option<Shape> {
        (**self).shape_of(type_id)
    }

    fn type_name(&self, type_id: TypeId) -> Option<Arc<str>> {
        (**self).type_name(type_id)
    }
}

impl<T: TypeDatabase + ?Sized> TypeDatabase for Arc<T> {
    fn shape_of(&self, type_id: TypeId) -> Option<Shape> {
        (**self).shape_of(type_id)
    }

    fn type_name(&self, type_id: TypeId) -> Option<Arc<str>> {
        (**self).type_name(type_id)
    }
}
