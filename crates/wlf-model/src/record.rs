//! Per-field interaction state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::FieldId;

/// UI store contents: one interaction record per field that has seen any
/// interaction.
pub type UiState = BTreeMap<FieldId, FieldInteractionRecord>;

/// Interaction history and current errors of one field.
///
/// The flags are independent: a field can be focused, blurred, dirty and
/// validated in any combination. Records are created lazily on the first
/// mutation for a field and are never removed by the engine itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInteractionRecord {
    /// Messages from the most recent non-silent validation pass.
    pub errors: Vec<String>,
    pub is_dirty: bool,
    pub has_focused: bool,
    pub has_blurred: bool,
    /// Set by the first non-silent validation pass and never cleared by it.
    pub has_validated: bool,
}

impl FieldInteractionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_focused(&mut self) {
        self.has_focused = true;
    }

    pub fn mark_blurred(&mut self) {
        self.has_blurred = true;
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    /// Store the outcome of a non-silent validation pass.
    ///
    /// Replaces the previous error list, even when `errors` is empty.
    pub fn record_validation(&mut self, errors: Vec<String>) {
        self.errors = errors;
        self.has_validated = true;
    }

    /// True when the last recorded pass produced no errors.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pristine() {
        let record = FieldInteractionRecord::new();
        assert!(!record.is_dirty);
        assert!(!record.has_focused);
        assert!(!record.has_blurred);
        assert!(!record.has_validated);
        assert!(record.is_valid());
    }

    #[test]
    fn test_record_validation_replaces_errors() {
        let mut record = FieldInteractionRecord::new();
        record.record_validation(vec!["Required".to_string()]);
        assert!(record.has_validated);
        assert!(!record.is_valid());

        record.record_validation(Vec::new());
        assert!(record.has_validated);
        assert!(record.errors.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut record = FieldInteractionRecord::new();
        record.mark_blurred();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["hasBlurred"], serde_json::json!(true));
        assert_eq!(json["isDirty"], serde_json::json!(false));
    }
}
