//! Form controller for the whitelabel form-state engine.
//!
//! A [`FormController`] owns the form's value tree and the per-field
//! interaction records. Fields are registered with a [`FieldConfig`], bound
//! either through an accessor closure over a [`Cursor`] or an explicit
//! [`FieldPath`](wlf_model::FieldPath):
//!
//! ```ignore
//! let form = FormController::new(json!({ "profile": { "name": "" } }), FormOptions::default());
//! let name = form.register_field(FieldConfig::new(|s| s.key("profile").key("name")).required())?;
//! name.on_change_value("Ada");
//! name.on_blur();
//! assert!(name.errors().is_empty());
//! ```
//!
//! Whether a focus, blur or change event actually runs a field's validators
//! is decided by its [`ValidationMode`](wlf_model::ValidationMode) pair; see
//! [`wlf_validate::trigger`].

pub mod controller;
pub mod error;
pub mod field;
pub mod reserved;
pub mod resolver;

pub use controller::FormController;
pub use error::{FormError, Result};
pub use field::{FieldConfig, FieldHandle};
pub use reserved::RESERVED_PROPS;
pub use resolver::{Accessor, Cursor, read_with, resolve_path};

pub use wlf_validate::ValidateOptions;
