//! Form-level configuration.

use serde::{Deserialize, Serialize};

use crate::mode::ValidationMode;

/// Defaults applied to every field of a form unless the field overrides them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormOptions {
    /// Mode for the first validation pass of each field.
    pub mode: Option<ValidationMode>,

    /// Mode for every pass after the first.
    #[serde(rename = "reValidateMode")]
    pub revalidate_mode: Option<ValidationMode>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_revalidate_mode(mut self, mode: ValidationMode) -> Self {
        self.revalidate_mode = Some(mode);
        self
    }
}
