//! In-memory declared-type registry.
//!
//! `TypeStore` is the reference [`TypeDatabase`] implementation. Adapters for
//! real introspection backends (and the JSON table loader in [`crate::table`])
//! populate one store per analysis run and hand it to the matcher.
//!
//! Types can be forward declared with [`TypeStore::reserve`] and given a shape
//! later with [`TypeStore::define`], which is how self-referencing or mutually
//! referencing structs are built.

use crate::types::{Field, Shape, TypeDatabase, TypeId};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to `TypeStore` instances.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// A registered declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: Arc<str>,
    /// `None` while the type is reserved but not yet defined.
    pub shape: Option<Shape>,
}

/// Concurrent registry of declared types.
///
/// # Example
///
/// ```ignore
/// let store = TypeStore::new();
/// let meta = store.declare_struct("k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta", vec![]);
/// let widget = store.declare_struct(
///     "example.org/widgets/v1.Widget",
///     vec![store.field("ObjectMeta", meta).embedded()],
/// );
/// assert_eq!(store.lookup("example.org/widgets/v1.Widget"), Some(widget));
/// ```
pub struct TypeStore {
    /// Unique instance ID for debugging
    instance_id: u64,

    /// `TypeId` -> `TypeEntry` mapping
    entries: DashMap<TypeId, TypeEntry, FxBuildHasher>,

    /// Qualified name -> first `TypeId` registered under it
    names: DashMap<Arc<str>, TypeId, FxBuildHasher>,

    /// Next available `TypeId`
    next_id: AtomicU32,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "TypeStore::new");
        Self {
            instance_id,
            entries: DashMap::with_hasher(FxBuildHasher),
            names: DashMap::with_hasher(FxBuildHasher),
            next_id: AtomicU32::new(TypeId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> TypeId {
        TypeId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn register(&self, name: Arc<str>, shape: Option<Shape>) -> TypeId {
        let id = self.allocate();
        trace!(
            instance_id = self.instance_id,
            type_id = %id,
            name = %name,
            kind = shape.as_ref().map_or("reserved", Shape::kind_name),
            "TypeStore::register"
        );
        self.names.entry(Arc::clone(&name)).or_insert(id);
        self.entries.insert(id, TypeEntry { name, shape });
        id
    }

    /// Forward-declare a type. It resolves to no shape until [`Self::define`]
    /// is called for it.
    pub fn reserve(&self, name: impl Into<Arc<str>>) -> TypeId {
        self.register(name.into(), None)
    }

    /// Give a shape to a previously registered type.
    ///
    /// Returns `false` if the id is unknown.
    pub fn define(&self, id: TypeId, shape: Shape) -> bool {
        match self.entries.get_mut(&id) {
            Some(mut entry) => {
                trace!(type_id = %id, kind = shape.kind_name(), "TypeStore::define");
                entry.shape = Some(shape);
                true
            }
            None => false,
        }
    }

    /// Register a struct type.
    pub fn declare_struct(&self, name: impl Into<Arc<str>>, fields: Vec<Field>) -> TypeId {
        self.register(name.into(), Some(Shape::structure(fields)))
    }

    /// Register a sequence type over `element`.
    pub fn declare_sequence(&self, name: impl Into<Arc<str>>, element: TypeId) -> TypeId {
        self.register(name.into(), Some(Shape::Sequence(element)))
    }

    /// Register a mapping type whose values are `value`.
    pub fn declare_mapping(&self, name: impl Into<Arc<str>>, value: TypeId) -> TypeId {
        self.register(name.into(), Some(Shape::Mapping(value)))
    }

    /// Register a type with no matchable structure.
    pub fn declare_other(&self, name: impl Into<Arc<str>>) -> TypeId {
        self.register(name.into(), Some(Shape::Other))
    }

    /// Build a field of type `ty`, taking its qualified type from the store.
    ///
    /// Unknown ids produce an empty qualified type.
    pub fn field(&self, name: impl Into<Arc<str>>, ty: TypeId) -> Field {
        let qualified = self.type_name(ty).unwrap_or_else(|| Arc::from(""));
        Field::new(name, qualified, ty)
    }

    /// Look up a type by its qualified name.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).map(|r| *r)
    }

    pub fn get(&self, id: TypeId) -> Option<TypeEntry> {
        self.entries.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered ids in allocation order.
    pub fn all_ids(&self) -> Vec<TypeId> {
        let mut ids: Vec<TypeId> = self.entries.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl TypeDatabase for TypeStore {
    fn shape_of(&self, type_id: TypeId) -> Option<Shape> {
        self.entries.get(&type_id).and_then(|r| r.shape.clone())
    }

    fn type_name(&self, type_id: TypeId) -> Option<Arc<str>> {
        self.entries.get(&type_id).map(|r| Arc::clone(&r.name))
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
