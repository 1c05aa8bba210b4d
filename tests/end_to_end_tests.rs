//! End-to-end classification of a JSON-described API package.

use fieldmatch::{
    FieldRole, MatchContext, MatchOptions, ObjectKind, TypeId, TypeIdentityMode, TypeStore,
    classify, has, has_field_that, is_embedded, is_named,
};
use indexmap::IndexMap;

const API_TYPES: &str = r#"{
  "types": [
    { "name": "string", "kind": "other" },
    { "name": "k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta", "kind": "struct" },
    { "name": "k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta", "kind": "struct" },
    { "name": "k8s.io/apimachinery/pkg/apis/meta/v1.ListMeta", "kind": "struct" },
    { "name": "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceSpec", "kind": "struct" },
    { "name": "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceStatus", "kind": "struct" },

    { "name": "example.org/cache/v1beta1.RedisClusterSpec", "kind": "struct", "fields": [
        { "name": "ResourceSpec", "type": "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceSpec", "embedded": true },
        { "name": "Region", "type": "string" }
    ] },
    { "name": "example.org/cache/v1beta1.RedisClusterStatus", "kind": "struct", "fields": [
        { "name": "ResourceStatus", "type": "github.com/crossplaneio/crossplane-runtime/apis/core/v1alpha1.ResourceStatus", "embedded": true }
    ] },
    { "name": "example.org/cache/v1beta1.RedisCluster", "kind": "struct", "fields": [
        { "name": "TypeMeta", "type": "k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta", "embedded": true },
        { "name": "ObjectMeta", "type": "k8s.io/apimachinery/pkg/apis/meta/v1.ObjectMeta", "embedded": true },
        { "name": "Spec", "type": "example.org/cache/v1beta1.RedisClusterSpec" },
        { "name": "Status", "type": "example.org/cache/v1beta1.RedisClusterStatus" }
    ] },
    { "name": "example.org/cache/v1beta1.RedisClusterList", "kind": "struct", "fields": [
        { "name": "TypeMeta", "type": "k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta", "embedded": true },
        { "name": "ListMeta", "type": "k8s.io/apimachinery/pkg/apis/meta/v1.ListMeta", "embedded": true },
        { "name": "Items", "type": "[]example.org/cache/v1beta1.RedisCluster" }
    ] },
    { "name": "[]example.org/cache/v1beta1.RedisCluster", "kind": "sequence", "element": "example.org/cache/v1beta1.RedisCluster" },
    { "name": "example.org/cache/v1beta1.ByZone", "kind": "mapping", "value": "example.org/cache/v1beta1.RedisCluster" },

    { "name": "example.org/cache/v1beta1.Foo", "kind": "struct", "fields": [
        { "name": "TypeMeta", "type": "k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta" },
        { "name": "Spec", "type": "example.org/cache/v1beta1.FooSpec" }
    ] },
    { "name": "example.org/cache/v1beta1.FooSpec", "kind": "struct" }
  ]
}"#;

struct Api {
    store: TypeStore,
    ids: IndexMap<String, TypeId>,
}

impl Api {
    fn load() -> Self {
        let (store, ids) = TypeStore::from_json_str(API_TYPES).expect("API types load");
        Self { store, ids }
    }

    fn ty(&self, short: &str) -> TypeId {
        self.ids[format!("example.org/cache/v1beta1.{short}").as_str()]
    }
}

#[test]
fn test_managed_resource_and_containers() {
    let api = Api::load();
    let ctx = MatchContext::new(&api.store);

    assert_eq!(classify(&ctx, api.ty("RedisCluster")), vec![ObjectKind::Managed]);
    assert_eq!(
        classify(&ctx, api.ty("ByZone")),
        vec![ObjectKind::Managed],
        "a mapping resolves to its value struct"
    );
    assert!(classify(&ctx, api.ty("RedisClusterSpec")).is_empty());
}

#[test]
fn test_list_type_with_nested_items_query() {
    let api = Api::load();
    let ctx = MatchContext::new(&api.store);
    let list = api.ty("RedisClusterList");

    let managed_items = FieldRole::Items
        .matcher()
        .and(has_field_that(ObjectKind::Managed.matchers()));
    assert!(has(
        &ctx,
        list,
        &[
            FieldRole::TypeMeta.matcher().and(is_embedded()),
            FieldRole::ListMeta.matcher().and(is_embedded()),
            managed_items,
        ]
    ));
    assert!(!ObjectKind::PortableClassList.matches(&ctx, list));
}

#[test]
fn test_envelope_and_spec_example() {
    let api = Api::load();
    let ctx = MatchContext::new(&api.store);
    let foo = api.ty("Foo");

    assert!(has(&ctx, foo, &[FieldRole::TypeMeta.matcher(), FieldRole::Spec.matcher()]));
    assert!(!has(&ctx, foo, &[FieldRole::Status.matcher()]));
    assert!(!has(&ctx, foo, &[FieldRole::TypeMeta.matcher().and(is_embedded())]));
    assert!(has(&ctx, foo, &[]));
    assert!(!has(&ctx, api.ids["string"], &[]));
}

#[test]
fn test_exact_identity_still_matches_full_names() {
    let api = Api::load();
    let options = MatchOptions::default().with_type_identity(TypeIdentityMode::Exact);
    let ctx = MatchContext::with_options(&api.store, options);
    let cluster = api.ty("RedisCluster");

    // Envelope types are declared under their full names, so exact identity holds.
    assert!(has(&ctx, cluster, &[FieldRole::ObjectMeta.matcher(), is_named("Spec")]));
    // `Spec` names a convention, not a type, and stays a suffix check.
    assert!(has(&ctx, cluster, &[FieldRole::Spec.matcher()]));
    assert_eq!(classify(&ctx, cluster), vec![ObjectKind::Managed]);
    // Foo's TypeMeta field is not embedded but is still typed exactly.
    assert!(has(&ctx, api.ty("Foo"), &[FieldRole::TypeMeta.matcher()]));
}
