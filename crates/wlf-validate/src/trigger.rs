//! Validation trigger policy.
//!
//! A field's interaction flags (focused, blurred, dirty, validated) are
//! independent; this module only reads them. The decision procedure:
//!
//! 1. The active mode is the revalidate mode once the field has validated,
//!    the mode otherwise.
//! 2. Forced calls and [`ValidationMode::All`] always run.
//! 3. `OnBlur` runs once blurred, `OnTouched` once focused, `OnChange` once
//!    dirty.
//! 4. `OnValidate` never runs on its own.
//!
//! A pass that does not run reports the field as valid and leaves its
//! previous errors untouched.

use wlf_model::{FieldInteractionRecord, FormOptions, ValidationMode};

/// Options for one validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Bypass mode gating.
    pub force: bool,
    /// Compute validity without writing errors or marking the field validated.
    pub silent: bool,
}

impl ValidateOptions {
    /// Forced, error-writing pass (form `validate()`).
    pub fn forced() -> Self {
        Self {
            force: true,
            silent: false,
        }
    }

    /// Forced, silent pass (form `silently_validate()`).
    pub fn forced_silent() -> Self {
        Self {
            force: true,
            silent: true,
        }
    }
}

/// Resolved pair of modes for one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerPolicy {
    pub mode: ValidationMode,
    pub revalidate_mode: ValidationMode,
}

impl TriggerPolicy {
    pub fn new(mode: ValidationMode, revalidate_mode: ValidationMode) -> Self {
        Self {
            mode,
            revalidate_mode,
        }
    }

    /// Field overrides win over form defaults, which win over `OnBlur`.
    pub fn resolve(
        field_mode: Option<ValidationMode>,
        field_revalidate_mode: Option<ValidationMode>,
        form: &FormOptions,
    ) -> Self {
        Self {
            mode: ValidationMode::resolve(field_mode, form.mode),
            revalidate_mode: ValidationMode::resolve(field_revalidate_mode, form.revalidate_mode),
        }
    }

    /// Mode governing the next decision for `record`.
    pub fn active_mode(&self, record: &FieldInteractionRecord) -> ValidationMode {
        if record.has_validated {
            self.revalidate_mode
        } else {
            self.mode
        }
    }

    pub fn should_validate(&self, record: &FieldInteractionRecord, force: bool) -> bool {
        should_validate(record, self.mode, self.revalidate_mode, force)
    }
}

/// Decide whether a validation pass runs for a field right now.
pub fn should_validate(
    record: &FieldInteractionRecord,
    mode: ValidationMode,
    revalidate_mode: ValidationMode,
    force: bool,
) -> bool {
    let active = TriggerPolicy::new(mode, revalidate_mode).active_mode(record);

    let run = force
        || match active {
            ValidationMode::All => true,
            ValidationMode::OnBlur => record.has_blurred,
            ValidationMode::OnTouched => record.has_focused,
            ValidationMode::OnChange => record.is_dirty,
            ValidationMode::OnValidate => false,
        };

    tracing::trace!(mode = %active, force, run, "validation trigger decision");
    run
}
