//! Field validation for the whitelabel form-state engine.
//!
//! Two halves:
//!
//! - [`trigger`] - the per-field state machine deciding, from interaction
//!   history and the configured modes, whether a validation pass runs now
//! - [`pipeline`] - the pure validator pipeline turning a value and its
//!   [`ValidationRules`] into an ordered list of error messages
//!
//! Validation failures are data, never `Err`: a pass either completes with a
//! full error list or does not run at all.

pub mod compare;
pub mod pattern;
pub mod pipeline;
pub mod rules;
pub mod trigger;

pub use compare::Comparable;
pub use pattern::{NamedPattern, Pattern};
pub use pipeline::run_validators;
pub use rules::{Bound, CustomValidator, Required, ValidationRules, ValidatorOutcome};
pub use trigger::{TriggerPolicy, ValidateOptions, should_validate};
