//! Props the engine injects into every field and that callers may not set.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{FormError, Result};

/// Keys injected by the engine: the current value, its errors and the three
/// event callbacks.
pub const RESERVED_PROPS: [&str; 5] = ["value", "errors", "onChangeValue", "onFocus", "onBlur"];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_PROPS.contains(&key)
}

/// Reject the first reserved key found in `props`.
pub fn check_custom_props(props: &BTreeMap<String, Value>) -> Result<()> {
    match props.keys().find(|key| is_reserved(key)) {
        Some(key) => Err(FormError::ReservedProp { key: key.clone() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_reserved_key_is_rejected() {
        for key in RESERVED_PROPS {
            let props = BTreeMap::from([(key.to_string(), json!(1))]);
            match check_custom_props(&props) {
                Err(FormError::ReservedProp { key: found }) => assert_eq!(found, key),
                other => panic!("expected ReservedProp for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_free_keys_pass() {
        let props = BTreeMap::from([
            ("label".to_string(), json!("Name")),
            ("placeholder".to_string(), json!("Jane")),
            ("Value".to_string(), json!("case differs")),
        ]);
        assert!(check_custom_props(&props).is_ok());
    }
}
