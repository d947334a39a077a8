//! Testing utilities for ctxscope workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use ctx_scope::{Object, Parent, ScopeView, Value};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build an object from a JSON object literal
///
/// Panics if `json` is not an object.
pub fn object(json: serde_json::Value) -> Object {
    match Value::from(json) {
        Value::Object(object) => object,
        other => panic!("expected JSON object, got {}", other.type_name()),
    }
}

/// Build an object from JSON, then add `undefined` members
pub fn object_with_undefined(json: serde_json::Value, undefined: &[&str]) -> Object {
    let obj = object(json);
    for key in undefined {
        obj.set(*key, Value::Undefined);
    }
    obj
}

pub fn view(target: &Object) -> ScopeView {
    ScopeView::new(target.clone()).unwrap()
}

pub fn view_with_parent(target: &Object, parent: impl Into<Parent>) -> ScopeView {
    ScopeView::builder(target.clone()).parent(parent).build().unwrap()
}

pub fn view_with_contextual(target: &Object, contextual: serde_json::Value) -> ScopeView {
    ScopeView::builder(target.clone())
        .contextual(object(contextual))
        .build()
        .unwrap()
}

/// Chain views over `targets`, outermost first
///
/// Returns the views in the same order; the last one is the innermost.
pub fn chain(targets: &[Object]) -> Vec<ScopeView> {
    let mut views: Vec<ScopeView> = Vec::with_capacity(targets.len());
    for target in targets {
        let next = match views.last() {
            Some(parent) => parent.child(target.clone()).unwrap(),
            None => view(target),
        };
        views.push(next);
    }
    views
}

/// Assert an object's own properties equal a JSON literal
#[track_caller]
pub fn assert_json(object: &Object, expected: serde_json::Value) {
    assert_eq!(object.to_json(), expected);
}
