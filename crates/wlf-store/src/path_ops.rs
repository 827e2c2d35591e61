//! Path lookups and writes over [`serde_json::Value`] trees.

use serde_json::{Map, Value};
use wlf_model::FieldPath;
use wlf_model::path::as_index;

/// Nested lookup. Returns `None` when any segment is missing.
pub fn get_at<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, token| match node {
        Value::Object(map) => map.get(token),
        Value::Array(items) => as_index(token).and_then(|idx| items.get(idx)),
        _ => None,
    })
}

/// Mutable nested lookup. Never creates anything.
pub fn get_at_mut<'a>(root: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    path.iter().try_fold(root, |node, token| match node {
        Value::Object(map) => map.get_mut(token),
        Value::Array(items) => as_index(token).and_then(|idx| items.get_mut(idx)),
        _ => None,
    })
}

/// Replace the value at `path`, creating intermediate containers as needed.
///
/// - A missing intermediate becomes an array when the following token is an
///   index and an object otherwise.
/// - A scalar sitting where a container is needed is replaced.
/// - Writing past the end of an array pads it with `null`.
/// - An array addressed by a non-index token is turned into an object keyed
///   by the former indices.
/// - The empty path replaces `root`.
pub fn set_at(root: &mut Value, path: &FieldPath, value: Value) {
    let segments = path.segments();
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return;
    };

    let mut cursor = root;
    for (depth, token) in parents.iter().enumerate() {
        let next_token = &segments[depth + 1];
        let child = slot_mut(cursor, token, || container_for(next_token));
        if !is_container(child) {
            *child = container_for(next_token);
        }
        cursor = child;
    }
    *slot_mut(cursor, last, || Value::Null) = value;
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Empty container suited to hold `token`.
fn container_for(token: &str) -> Value {
    if as_index(token).is_some() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Slot for `token` inside `node`, inserting `fresh()` when absent.
fn slot_mut<'a>(node: &'a mut Value, token: &str, fresh: impl FnOnce() -> Value) -> &'a mut Value {
    let index = as_index(token);

    if index.is_none() && matches!(node, Value::Array(_)) {
        if let Value::Array(items) = std::mem::take(node) {
            *node = Value::Object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| (idx.to_string(), item))
                    .collect(),
            );
        }
    }
    if !is_container(node) {
        *node = container_for(token);
    }

    match (node, index) {
        (Value::Array(items), Some(idx)) => {
            while items.len() < idx {
                items.push(Value::Null);
            }
            if items.len() == idx {
                items.push(fresh());
            }
            &mut items[idx]
        }
        (Value::Object(map), _) => map.entry(token).or_insert_with(fresh),
        // Arrays addressed by a non-index token were converted above.
        (other, _) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_get_nested() {
        let state = json!({ "profile": { "name": "x", "tags": ["a", "b"] } });
        assert_eq!(get_at(&state, &path("profile.name")), Some(&json!("x")));
        assert_eq!(get_at(&state, &path("profile.tags.1")), Some(&json!("b")));
        assert_eq!(get_at(&state, &path("profile.missing")), None);
        assert_eq!(get_at(&state, &path("profile.name.deeper")), None);
    }

    #[test]
    fn test_get_root() {
        let state = json!({ "a": 1 });
        assert_eq!(get_at(&state, &FieldPath::root()), Some(&state));
    }

    #[test]
    fn test_set_creates_objects() {
        let mut state = json!({});
        set_at(&mut state, &path("a.b.c"), json!(1));
        assert_eq!(state, json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_set_creates_arrays_for_index_tokens() {
        let mut state = json!({});
        set_at(&mut state, &path("items.2.label"), json!("x"));
        assert_eq!(state, json!({ "items": [null, null, { "label": "x" }] }));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut state = json!({ "a": 5 });
        set_at(&mut state, &path("a.b"), json!(true));
        assert_eq!(state, json!({ "a": { "b": true } }));
    }

    #[test]
    fn test_set_preserves_siblings() {
        let mut state = json!({ "a": { "keep": 1, "b": 2 } });
        set_at(&mut state, &path("a.b"), json!(3));
        assert_eq!(state, json!({ "a": { "keep": 1, "b": 3 } }));
    }

    #[test]
    fn test_set_named_key_on_array_converts_to_object() {
        let mut state = json!({ "a": ["x"] });
        set_at(&mut state, &path("a.name"), json!("y"));
        assert_eq!(state, json!({ "a": { "0": "x", "name": "y" } }));
    }

    #[test]
    fn test_set_empty_path_replaces_root() {
        let mut state = json!({ "a": 1 });
        set_at(&mut state, &FieldPath::root(), json!([1, 2]));
        assert_eq!(state, json!([1, 2]));
    }

    #[test]
    fn test_get_at_mut() {
        let mut state = json!({ "a": [1, 2] });
        if let Some(slot) = get_at_mut(&mut state, &path("a.0")) {
            *slot = json!(10);
        }
        assert_eq!(state, json!({ "a": [10, 2] }));
        assert!(get_at_mut(&mut state, &path("b")).is_none());
    }

    fn arb_path() -> impl Strategy<Value = FieldPath> {
        prop::collection::vec(
            prop_oneof!["[a-z]{1,6}", (0usize..4).prop_map(|i| i.to_string())],
            1..5,
        )
        .prop_map(FieldPath::from)
    }

    proptest! {
        #[test]
        fn set_then_get_returns_written_value(path in arb_path(), n in any::<i64>()) {
            let mut state = json!({ "seed": true });
            set_at(&mut state, &path, json!(n));
            prop_assert_eq!(get_at(&state, &path), Some(&json!(n)));
        }
    }
}
