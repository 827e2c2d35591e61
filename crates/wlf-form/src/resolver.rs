//! Field path resolution from accessors.
//!
//! A field can be bound with an accessor closure such as
//! `|s| s.key("profile").key("name")`. The same closure is used in two ways:
//!
//! - [`resolve_path`] runs it once against a *recording* cursor that notes
//!   every property access and returns the tokens as a [`FieldPath`];
//! - [`read_with`] runs it against a real value tree.
//!
//! [`Cursor`] has no write operations, so an accessor cannot assign through
//! the stand-in.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use wlf_model::FieldPath;
use wlf_model::path::as_index;

/// Type-erased accessor as stored in a field configuration.
pub type Accessor = dyn for<'a> Fn(Cursor<'a>) -> Cursor<'a>;

/// Position reached by an accessor: either a recording of the accesses made
/// so far or a (possibly absent) slot inside a real tree.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    mode: CursorMode<'a>,
}

#[derive(Debug, Clone)]
enum CursorMode<'a> {
    Recording(Rc<RefCell<Vec<String>>>),
    Reading(Option<&'a Value>),
}

impl<'a> Cursor<'a> {
    fn recording(tokens: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            mode: CursorMode::Recording(tokens),
        }
    }

    fn reading(node: Option<&'a Value>) -> Self {
        Self {
            mode: CursorMode::Reading(node),
        }
    }

    /// Property access by name.
    pub fn key(&self, name: &str) -> Cursor<'a> {
        match &self.mode {
            CursorMode::Recording(tokens) => {
                tokens.borrow_mut().push(name.to_string());
                Self::recording(Rc::clone(tokens))
            }
            CursorMode::Reading(node) => Self::reading(node.and_then(|node| match node {
                Value::Object(map) => map.get(name),
                Value::Array(items) => as_index(name).and_then(|idx| items.get(idx)),
                _ => None,
            })),
        }
    }

    /// Positional access. Recorded as the decimal token.
    pub fn index(&self, index: usize) -> Cursor<'a> {
        match &self.mode {
            CursorMode::Recording(tokens) => {
                tokens.borrow_mut().push(index.to_string());
                Self::recording(Rc::clone(tokens))
            }
            CursorMode::Reading(node) => Self::reading(node.and_then(|node| match node {
                Value::Array(items) => items.get(index),
                Value::Object(map) => map.get(&index.to_string()),
                _ => None,
            })),
        }
    }

    /// The slot reached, `None` when absent or while recording.
    pub fn value(&self) -> Option<&'a Value> {
        match self.mode {
            CursorMode::Recording(_) => None,
            CursorMode::Reading(node) => node,
        }
    }
}

/// Run `accessor` against a recording cursor and return the tokens it
/// accessed, in order. An accessor that touches nothing yields the root path.
pub fn resolve_path<F>(accessor: F) -> FieldPath
where
    F: for<'a> Fn(Cursor<'a>) -> Cursor<'a>,
{
    let tokens = Rc::new(RefCell::new(Vec::new()));
    // Only the side effect on `tokens` matters here.
    let _ = accessor(Cursor::recording(Rc::clone(&tokens)));
    let path = FieldPath::from(tokens.take());
    tracing::trace!(path = %path, "resolved accessor path");
    path
}

/// Run `accessor` against `root`.
pub fn read_with<F>(accessor: F, root: &Value) -> Option<&Value>
where
    F: for<'a> Fn(Cursor<'a>) -> Cursor<'a>,
{
    accessor(Cursor::reading(Some(root))).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use wlf_store::get_at;

    #[test]
    fn test_resolve_nested_keys() {
        let path = resolve_path(|s| s.key("profile").key("name"));
        assert_eq!(path, FieldPath::from(["profile", "name"]));
    }

    #[test]
    fn test_resolve_index() {
        let path = resolve_path(|s| s.key("items").index(2).key("label"));
        assert_eq!(path.to_string(), "items.2.label");
    }

    #[test]
    fn test_identity_accessor_is_root() {
        assert!(resolve_path(|s| s).is_root());
    }

    #[test]
    fn test_read_with() {
        let state = json!({ "profile": { "name": "x" }, "tags": ["a", "b"] });
        assert_eq!(
            read_with(|s| s.key("profile").key("name"), &state),
            Some(&json!("x"))
        );
        assert_eq!(read_with(|s| s.key("tags").index(1), &state), Some(&json!("b")));
        assert_eq!(read_with(|s| s.key("tags").key("0"), &state), Some(&json!("a")));
        assert_eq!(read_with(|s| s.key("missing").key("deeper"), &state), None);
        assert_eq!(read_with(|s| s, &state), Some(&state));
    }

    #[test]
    fn test_branches_record_only_what_ran() {
        let path = resolve_path(|s| {
            let user = s.key("user");
            // Recording cursors carry no data, so this always takes the None arm.
            match user.value() {
                Some(_) => user.key("unused"),
                None => user.key("email"),
            }
        });
        assert_eq!(path, FieldPath::from(["user", "email"]));
    }

    proptest! {
        #[test]
        fn prop_read_with_agrees_with_resolved_path(
            a in "[a-c]",
            b in "[a-c]",
            leaf in any::<i64>(),
        ) {
            let state = json!({ "a": { "a": 1, "b": leaf }, "b": { "c": "z" } });
            let path = resolve_path(|s| s.key(&a).key(&b));
            let read = read_with(|s| s.key(&a).key(&b), &state);
            prop_assert_eq!(read, get_at(&state, &path));
        }
    }
}
