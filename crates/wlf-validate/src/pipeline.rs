//! The validator pipeline.
//!
//! Checks run in a fixed order and every check contributes its messages;
//! nothing short-circuits:
//!
//! 1. custom validators, in declaration order
//! 2. `required`
//! 3. `min_length` / `max_length` (strings only)
//! 4. `pattern`
//! 5. `min` / `max`
//!
//! Checks 3-5 are skipped when the slot does not exist.

use std::cmp::Ordering;

use serde_json::Value;
use wlf_model::{is_falsy, value_text};

use crate::rules::ValidationRules;

/// Run every configured check against `value` and collect the messages.
pub fn run_validators(value: Option<&Value>, rules: &ValidationRules) -> Vec<String> {
    let mut errors = Vec::new();

    for validator in &rules.custom {
        validator(value).append_to(&mut errors);
    }

    if let Some(required) = &rules.required
        && is_falsy(value)
    {
        errors.push(required.message().to_string());
    }

    let Some(value) = value else {
        return errors;
    };

    if let Value::String(text) = value {
        let length = text.chars().count();
        if let Some(bound) = &rules.min_length
            && length < *bound.limit()
        {
            errors.push(bound.message_or_else(|n| format!("Must have at least {n} characters")));
        }
        if let Some(bound) = &rules.max_length
            && length > *bound.limit()
        {
            errors.push(bound.message_or_else(|n| format!("Must be less than {n} characters")));
        }
    }

    if let Some(bound) = &rules.pattern
        && !bound.limit().is_match(&value_text(value))
    {
        errors.push(bound.message_or_else(|p| p.default_message().to_string()));
    }

    if let Some(bound) = &rules.min
        && bound.limit().compare(value) == Some(Ordering::Less)
    {
        errors.push(bound.message_or_else(|b| format!("Must be more than {b}")));
    }
    if let Some(bound) = &rules.max
        && bound.limit().compare(value) == Some(Ordering::Greater)
    {
        errors.push(bound.message_or_else(|b| format!("Must be less than {b}")));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Comparable;
    use crate::pattern::Pattern;
    use serde_json::json;

    #[test]
    fn test_no_rules_no_errors() {
        assert!(run_validators(Some(&json!("x")), &ValidationRules::new()).is_empty());
        assert!(run_validators(None, &ValidationRules::new()).is_empty());
    }

    #[test]
    fn test_required_falsy_values() {
        let rules = ValidationRules::new().required();
        for value in [json!(""), json!(0), json!(false), json!(null)] {
            assert_eq!(run_validators(Some(&value), &rules), vec!["Required"], "{value}");
        }
        assert_eq!(run_validators(None, &rules), vec!["Required"]);
        assert!(run_validators(Some(&json!("0")), &rules).is_empty());
    }

    #[test]
    fn test_required_custom_message() {
        let rules = ValidationRules::new().required_with_message("Name is required");
        assert_eq!(run_validators(Some(&json!("")), &rules), vec!["Name is required"]);
    }

    #[test]
    fn test_length_checks_only_apply_to_strings() {
        let rules = ValidationRules::new().min_length(3).max_length(5);
        assert_eq!(
            run_validators(Some(&json!("ab")), &rules),
            vec!["Must have at least 3 characters"]
        );
        assert_eq!(
            run_validators(Some(&json!("abcdef")), &rules),
            vec!["Must be less than 5 characters"]
        );
        assert!(run_validators(Some(&json!("abcd")), &rules).is_empty());
        assert!(run_validators(Some(&json!(12)), &rules).is_empty());
        assert!(run_validators(None, &rules).is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = ValidationRules::new().max_length(3);
        assert!(run_validators(Some(&json!("äöü")), &rules).is_empty());
    }

    #[test]
    fn test_pattern_default_and_custom_message() {
        let rules = ValidationRules::new().pattern(Pattern::email());
        assert_eq!(
            run_validators(Some(&json!("not-an-email")), &rules),
            vec!["Must be email"]
        );
        assert!(run_validators(Some(&json!("a@example.com")), &rules).is_empty());

        let rules = ValidationRules::new().pattern((Pattern::email(), "Enter an email address"));
        assert_eq!(
            run_validators(Some(&json!("not-an-email")), &rules),
            vec!["Enter an email address"]
        );
    }

    #[test]
    fn test_pattern_on_non_string_uses_json_text() {
        let rules = ValidationRules::new().pattern(Pattern::regex(r"^\d+$").unwrap());
        assert!(run_validators(Some(&json!(123)), &rules).is_empty());
        assert_eq!(run_validators(Some(&json!(true)), &rules), vec!["Invalid pattern"]);
    }

    #[test]
    fn test_min_max_numbers() {
        let rules = ValidationRules::new().min(1_i64).max((10.0, "Ten at most"));
        assert_eq!(run_validators(Some(&json!(0)), &rules), vec!["Must be more than 1"]);
        assert_eq!(run_validators(Some(&json!(11)), &rules), vec!["Ten at most"]);
        assert!(run_validators(Some(&json!(1)), &rules).is_empty());
        assert!(run_validators(Some(&json!(10)), &rules).is_empty());
    }

    #[test]
    fn test_zero_bound_is_enforced() {
        let rules = ValidationRules::new().min(0_i64);
        assert_eq!(run_validators(Some(&json!(-1)), &rules), vec!["Must be more than 0"]);
    }

    #[test]
    fn test_min_max_dates() {
        let start = Comparable::parse_date("2024-01-01").unwrap();
        let rules = ValidationRules::new().min(start);
        assert_eq!(
            run_validators(Some(&json!("2023-06-01")), &rules),
            vec!["Must be more than 2024-01-01"]
        );
        assert!(run_validators(Some(&json!("2024-06-01")), &rules).is_empty());
    }

    #[test]
    fn test_custom_validators_run_first_in_order() {
        let rules = ValidationRules::new()
            .required()
            .validate(|_| Some("first"))
            .validate(|_| None::<&str>)
            .validate(|_| vec!["second", "third"]);
        assert_eq!(
            run_validators(None, &rules),
            vec!["first", "second", "third", "Required"]
        );
    }

    #[test]
    fn test_custom_validator_sees_value() {
        let rules = ValidationRules::new().validate(|value: Option<&Value>| {
            match value.and_then(Value::as_str) {
                Some(s) if s.contains(' ') => Some("No spaces".to_string()),
                _ => None,
            }
        });
        assert_eq!(run_validators(Some(&json!("a b")), &rules), vec!["No spaces"]);
        assert!(run_validators(Some(&json!("ab")), &rules).is_empty());
    }

    #[test]
    fn test_errors_accumulate() {
        let rules = ValidationRules::new()
            .required()
            .min_length(8)
            .pattern(Pattern::email());
        insta::assert_json_snapshot!(run_validators(Some(&json!("a@b")), &rules), @r#"
        [
          "Must have at least 8 characters",
          "Must be email"
        ]
        "#);
    }
}
