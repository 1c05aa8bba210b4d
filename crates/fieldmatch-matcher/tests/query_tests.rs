use super::*;
use crate::catalog::FieldRole;
use crate::matcher::{is_embedded, is_named};
use fieldmatch_types::{Field, TypeStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn three_fields(store: &TypeStore, order: [usize; 3]) -> TypeId {
    let string = store.declare_other("string");
    let all = [
        store.field("A", string),
        store.field("B", string).embedded(),
        store.field("C", string),
    ];
    let fields: Vec<Field> = order.iter().map(|&i| all[i].clone()).collect();
    store.declare_struct(format!("pkg.S{}{}{}", order[0], order[1], order[2]), fields)
}

#[test]
fn test_no_matchers_only_requires_a_struct() {
    let store = TypeStore::new();
    let empty = store.declare_struct("pkg.Empty", vec![]);
    let string = store.declare_other("string");
    let ctx = MatchContext::new(&store);

    assert!(ctx.has(empty, &[]));
    assert!(!ctx.has(string, &[]));
    assert!(!ctx.has(TypeId::INVALID, &[]));
}

#[test]
fn test_non_struct_types_never_match() {
    let store = TypeStore::new();
    let string = store.declare_other("string");
    let strings = store.declare_sequence("[]string", string);
    let ctx = MatchContext::new(&store);
    let anything = [is_named("A")];

    assert!(!ctx.has(string, &anything));
    assert!(!ctx.has(strings, &anything));
}

#[test]
fn test_matchers_may_be_satisfied_by_different_fields() {
    let store = TypeStore::new();
    let s = three_fields(&store, [0, 1, 2]);
    let ctx = MatchContext::new(&store);

    assert!(ctx.has(s, &[is_named("A"), is_named("C")]));
    assert!(ctx.has(s, &[is_named("A"), is_embedded()]));
    // A single field would have to be both `A` and embedded.
    assert!(!ctx.has(s, &[is_named("A").and(is_embedded())]));
    assert!(ctx.has(s, &[is_named("B").and(is_embedded())]));
    assert!(!ctx.has(s, &[is_named("A"), is_named("D")]));
}

/// A matcher that records how many fields it was asked about.
fn counting(result: bool, calls: &Arc<AtomicUsize>) -> Matcher {
    let calls = Arc::clone(calls);
    Matcher::new("counting", move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        result
    })
}

#[test]
fn test_has_stops_at_the_first_unsatisfied_matcher() {
    let store = TypeStore::new();
    let s = three_fields(&store, [0, 1, 2]);
    let ctx = MatchContext::new(&store);
    let calls = Arc::new(AtomicUsize::new(0));

    assert!(!ctx.has(s, &[is_named("Z"), counting(true, &calls)]));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(ctx.has(s, &[is_named("A"), counting(true, &calls)]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_exists_stops_at_the_first_matching_field() {
    let store = TypeStore::new();
    let s = three_fields(&store, [0, 1, 2]);
    let ctx = MatchContext::new(&store);
    let shape = ctx.resolve(s).expect("struct");
    let calls = Arc::new(AtomicUsize::new(0));

    let found = counting(true, &calls);
    assert!(exists(&ctx, &shape, &found));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    calls.store(0, Ordering::SeqCst);
    let missing = counting(false, &calls);
    assert!(!exists(&ctx, &shape, &missing));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    calls.store(0, Ordering::SeqCst);
    let second = is_named("B").and(counting(true, &calls));
    assert!(exists(&ctx, &shape, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_field_order_does_not_change_outcomes() {
    let store = TypeStore::new();
    let orders = [[0, 1, 2], [2, 1, 0], [1, 0, 2], [2, 0, 1]];
    let types: Vec<TypeId> = orders.iter().map(|&o| three_fields(&store, o)).collect();
    let ctx = MatchContext::new(&store);

    let queries = [
        is_named("A"),
        is_named("C"),
        is_embedded(),
        is_named("C").and(is_embedded()),
        is_named("Z"),
    ];
    for query in &queries {
        let expected = exists(&ctx, &ctx.resolve(types[0]).expect("struct"), query);
        for &ty in &types[1..] {
            let shape = ctx.resolve(ty).expect("struct");
            assert_eq!(exists(&ctx, &shape, query), expected, "{query}");
        }
    }
}

#[test]
fn test_sequence_of_struct_matches_like_the_struct() {
    let store = TypeStore::new();
    let s = three_fields(&store, [0, 1, 2]);
    let list = store.declare_sequence("[]pkg.S", s);
    let by_key = store.declare_mapping("map[string]pkg.S", s);
    let ctx = MatchContext::new(&store);

    for matchers in [vec![is_named("A")], vec![is_named("Z")], vec![]] {
        let expected = ctx.has(s, &matchers);
        assert_eq!(ctx.has(list, &matchers), expected);
        assert_eq!(has(&ctx, by_key, &matchers), expected);
    }
}

#[test]
fn test_envelope_and_spec_example() {
    let store = TypeStore::new();
    let type_meta = store.declare_struct("k8s.io/apimachinery/pkg/apis/meta/v1.TypeMeta", vec![]);
    let spec = store.declare_struct("pkg.FooSpec", vec![]);
    let s = store.declare_struct(
        "pkg.Foo",
        vec![store.field("TypeMeta", type_meta), store.field("Spec", spec)],
    );
    let ctx = MatchContext::new(&store);

    assert!(ctx.has(s, &[FieldRole::TypeMeta.matcher(), FieldRole::Spec.matcher()]));
    assert!(!ctx.has(s, &[FieldRole::Status.matcher()]));
}

#[test]
fn test_queries_run_under_a_trace_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();

    let store = TypeStore::new();
    let s = three_fields(&store, [0, 1, 2]);
    let ctx = MatchContext::new(&store);

    assert!(ctx.has(s, &[is_named("A")]));
    assert!(!ctx.has(s, &[is_named("Q")]));
    assert!(ctx.resolver().cached_len() >= 1);
}
