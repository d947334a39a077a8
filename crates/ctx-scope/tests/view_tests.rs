use ctx_scope::{create_view, Object, Parent, ScopeError, ScopeView, Value};
use ctx_test_utils::{init_tracing, object, object_with_undefined, view, view_with_contextual, view_with_parent};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_binding() {
    init_tracing();
    let target = object_with_undefined(json!({"a": 1}), &["b"]);
    let s = view(&target);

    assert_eq!(s.get("a"), Value::from(1));
    assert!(s.has("a"));
    assert_eq!(s.get("b"), Value::Undefined);
    assert!(s.has("b"));
    assert_eq!(s.get("c"), Value::Undefined);
    assert!(!s.has("c"));
    assert_eq!(s.get("$parent"), Value::Undefined);
    assert!(!s.has("$parent"));
    assert!(s.has("$this"));
    assert_eq!(s.get("$parents").get_property("length"), Value::from(0));
    assert!(s.has("$parents"));
}

#[test]
fn test_binding_with_parent_chain() {
    init_tracing();
    let parent = object(json!({"a": 2, "c": 3}));
    let target = object(json!({"a": 1, "b": false}));
    let s = view_with_parent(&target, view(&parent));

    assert_eq!(s.get("a"), Value::from(1));
    assert_eq!(s.get("b"), Value::from(false));
    assert_eq!(s.get("c"), Value::from(3));
    assert!(s.has("c"));

    let this = s.get("$this");
    assert_eq!(this.get_property("a"), Value::from(1));
    assert_eq!(this.get_property("c"), Value::Undefined);
    assert!(s.has("$this"));

    assert!(s.has("$parent"));
    let p = s.get("$parent");
    assert!(p.as_view().is_some());
    assert_eq!(p.get_property("a"), Value::from(2));
    assert!(p.has_property("a"));
    assert_eq!(p.get_property("b"), Value::Undefined);
    assert!(!p.has_property("b"));
    assert_eq!(p.get_property("c"), Value::from(3));
    assert!(p.has_property("c"));
    assert_eq!(p.get_property("$parent"), Value::Undefined);

    assert_eq!(s.get("$parents").get_property("length"), Value::from(1));
    assert_eq!(p.get_property("$parents").get_property("length"), Value::from(0));
}

#[test]
fn test_binding_with_plain_parent() {
    let parent = object(json!({"a": 2, "c": 3}));
    let target = object(json!({"a": 1, "b": false}));
    let s = view_with_parent(&target, parent.clone());

    assert_eq!(s.get("a"), Value::from(1));
    assert_eq!(s.get("c"), Value::from(3));
    assert_eq!(s.get("$this").get_property("c"), Value::Undefined);

    let p = s.get("$parent");
    assert_eq!(p, Value::Object(parent));
    assert!(!p.has_property("b"));
    assert_eq!(p.get_property("$parent"), Value::Undefined);
    assert_eq!(s.get("$parents").get_property("length"), Value::from(1));
    // Plain parents are not chain-aware
    assert_eq!(p.get_property("$parents"), Value::Undefined);
}

#[test]
fn test_contextual_variables() {
    let proto = object(json!({"a": 1}));
    let target = Object::with_proto(proto);
    target.set("b", false);
    let s = create_view(
        target,
        Value::Null,
        Some(object(json!({"$index": 3, "$length": 5, "b": "override"}))),
    )
    .unwrap();

    assert_eq!(s.get("a"), Value::from(1));
    assert_eq!(s.get("b"), Value::from("override"));
    assert_eq!(s.get("$this").get_property("b"), Value::from(false));
    assert_eq!(s.get("c"), Value::Undefined);
    assert_eq!(s.get("$index"), Value::from(3));
    assert_eq!(s.get("$length"), Value::from(5));
    assert_eq!(s.parent(), &Parent::Plain(Value::Null));
    assert_eq!(s.get("$parent"), Value::Null);
    assert!(!s.has("$parent"));
}

#[test]
fn test_contextual_overlay_shadows_target() {
    let target = object(json!({"a": 1, "b": false}));
    let s = view_with_contextual(&target, json!({"b": true}));

    assert_eq!(s.get("b"), Value::from(true));
    assert_eq!(s.get("$this").get_property("b"), Value::from(false));

    s.set("b", 2).unwrap();
    assert_eq!(s.get("b"), Value::from(2));
    assert_eq!(target.get("b"), Some(Value::from(false)));
    assert_eq!(s.contextual().get("b"), Some(Value::from(2)));
}

#[test]
fn test_parents_is_fresh_each_read() {
    let s = view(&Object::new());
    let first = s.get("$parents");
    let second = s.get("$parents");
    assert!(first.as_array().is_some());
    assert_ne!(first, second);
    assert_ne!(first, Value::Undefined);
}

#[test]
fn test_ancestor_order() {
    let gp = view(&object(json!({"g": 1})));
    let p = view_with_parent(&object(json!({"p": 1})), gp.clone());
    let s = view_with_parent(&object(json!({"s": 1})), p.clone());

    let ancestors = s.ancestors();
    assert_eq!(ancestors, vec![Parent::Chained(p.clone()), Parent::Chained(gp.clone())]);

    let parents = s.get("$parents");
    assert_eq!(parents.get_property("0"), Value::View(p));
    assert_eq!(parents.get_property("1"), Value::View(gp));
}

#[test]
fn test_reserved_names_cannot_be_shadowed() {
    let target = object(json!({"$this": 1, "$parent": 2, "$parents": 3, "$contextual": 4}));
    let s = view_with_contextual(&target, json!({"$this": 5}));

    assert_eq!(s.get("$this"), Value::Object(target.clone()));
    assert_eq!(s.get("$parent"), Value::Undefined);
    assert!(s.get("$parents").as_array().is_some());
    assert!(s.get("$contextual").as_object().is_some());

    for key in ["$this", "$parent", "$parents", "$contextual"] {
        let err = s.set(key, 1).unwrap_err();
        assert_eq!(err, ScopeError::ReservedAssignment { key: key.to_string() });
    }
    assert_eq!(target.get("$this"), Some(Value::from(1)));
}

#[test]
fn test_view_is_a_value() {
    let inner = view(&object(json!({"x": 1})));
    let holder = object(json!({}));
    holder.set("scope", inner.clone());
    let s = view(&holder);
    assert_eq!(s.get("scope").get_property("x"), Value::from(1));
    assert_eq!(s.get("scope"), Value::View(inner));
}

#[test]
fn test_custom_reserved_names() {
    let config = ctx_scope::ScopeConfig::from_toml_str(
        r#"
        local_prefix = "_"
        this_key = "self"
        parent_key = "outer"
        parents_key = "outers"
        "#,
    )
    .unwrap();
    let root = ScopeView::builder(object(json!({"a": 1})))
        .config(config)
        .build()
        .unwrap();
    let child = root.child(object(json!({"$this": "plain"}))).unwrap();

    assert_eq!(child.get("$this"), Value::from("plain"));
    assert_eq!(child.get("outer"), Value::View(root));
    assert!(child.set("self", 1).is_err());
    child.set("_tmp", 1).unwrap();
    assert_eq!(child.contextual().get("_tmp"), Some(Value::from(1)));
}
