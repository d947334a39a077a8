use ctx_scope::{Object, ScopeError, ScopeView, Value};
use ctx_test_utils::chain;
use proptest::prelude::*;

fn primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".*".prop_map(Value::from),
    ]
}

fn plain_key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn local_key() -> impl Strategy<Value = String> {
    "\\$[a-z]{1,6}".prop_filter("reserved accessor", |k| {
        !matches!(k.as_str(), "$this" | "$parent" | "$parents" | "$contextual")
    })
}

proptest! {
    #[test]
    fn prop_primitives_are_rejected(value in primitive()) {
        let err = ScopeView::new(value).unwrap_err();
        prop_assert!(matches!(err, ScopeError::InvalidTarget { .. }), "expected InvalidTarget, got {:?}", err);
    }

    #[test]
    fn prop_target_write_is_visible_directly(key in plain_key(), n in any::<i32>()) {
        let target = Object::new();
        let view = ScopeView::new(target.clone()).unwrap();
        view.set(&key, n).unwrap();
        prop_assert_eq!(view.get(&key), Value::from(n));
        prop_assert_eq!(target.get(&key), Some(Value::from(n)));
    }

    #[test]
    fn prop_local_keys_land_in_writer_overlay(
        key in local_key(),
        depth in 1..5usize,
        writes in proptest::collection::vec(any::<i32>(), 1..4),
    ) {
        let targets: Vec<Object> = (0..depth).map(|_| Object::new()).collect();
        let views = chain(&targets);
        let writer = views.last().unwrap();

        for n in &writes {
            writer.set(&key, *n).unwrap();
        }

        let last = *writes.last().unwrap();
        prop_assert_eq!(writer.contextual().get(&key), Some(Value::from(last)));
        for target in &targets {
            prop_assert!(!target.has(&key));
        }
        for ancestor in &views[..views.len() - 1] {
            prop_assert!(!ancestor.contextual().has(&key));
        }
    }

    #[test]
    fn prop_writes_reach_the_owning_ancestor(
        depth in 2..6usize,
        owner in 0..6usize,
        n in any::<i32>(),
    ) {
        let owner = owner % depth;
        let targets: Vec<Object> = (0..depth).map(|_| Object::new()).collect();
        targets[owner].set("key", 0);
        let views = chain(&targets);
        let innermost = views.last().unwrap();

        prop_assert_eq!(innermost.depth(), depth - 1);
        innermost.set("key", n).unwrap();

        for (i, target) in targets.iter().enumerate() {
            if i == owner {
                prop_assert_eq!(target.get("key"), Some(Value::from(n)));
            } else {
                prop_assert!(!target.has("key"));
            }
        }
    }

    #[test]
    fn prop_new_keys_never_reach_ancestors(depth in 1..6usize, key in plain_key()) {
        let targets: Vec<Object> = (0..depth).map(|_| Object::new()).collect();
        let views = chain(&targets);
        views.last().unwrap().set(&key, 1).unwrap();

        prop_assert!(targets.last().unwrap().has_own(&key));
        for target in &targets[..depth - 1] {
            prop_assert!(!target.has(&key));
        }
    }
}
