//! Shared data model for the whitelabel form-state engine.
//!
//! Every other `wlf-*` crate speaks in these types:
//!
//! - [`FieldPath`] - ordered property tokens addressing a slot in the form state
//! - [`FieldId`] - process-unique id minted per registered field
//! - [`ValidationMode`] - when a field's validation is allowed to run
//! - [`FieldInteractionRecord`] - per-field focus/blur/dirty/validated flags and errors
//! - [`FormOptions`] - form-level mode defaults
//!
//! Form state itself is a plain [`serde_json::Value`]. A slot that does not
//! exist is "undefined" and is read as `None`; `Value::Null` is a present value.

pub mod error;
pub mod ids;
pub mod mode;
pub mod options;
pub mod path;
pub mod record;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::FieldId;
pub use mode::ValidationMode;
pub use options::FormOptions;
pub use path::FieldPath;
pub use record::{FieldInteractionRecord, UiState};
pub use value::{is_falsy, value_text};
