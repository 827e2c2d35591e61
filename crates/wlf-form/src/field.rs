//! Field configuration and the per-field handle returned by registration.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use wlf_model::{FieldId, FieldInteractionRecord, FieldPath, UiState, ValidationMode};
use wlf_store::{SetOptions, SubscriptionId, get_at};
use wlf_validate::{Bound, Comparable, Pattern, ValidateOptions, ValidationRules, ValidatorOutcome};

use crate::controller::FormController;
use crate::error::{FormError, Result};
use crate::resolver::{Accessor, Cursor, resolve_path};

/// Where a field's value lives.
#[derive(Clone)]
pub(crate) enum FieldTarget {
    Accessor(Rc<Accessor>),
    Path(FieldPath),
}

impl FieldTarget {
    pub(crate) fn resolve(&self) -> FieldPath {
        match self {
            Self::Accessor(accessor) => resolve_path(&**accessor),
            Self::Path(path) => path.clone(),
        }
    }
}

/// Everything needed to register one field.
///
/// ```ignore
/// let config = FieldConfig::new(|s| s.key("profile").key("email"))
///     .required()
///     .pattern(Pattern::email())
///     .prop("label", "Email");
/// ```
#[derive(Clone)]
pub struct FieldConfig {
    pub(crate) target: FieldTarget,
    pub(crate) default_value: Option<Value>,
    pub(crate) rules: ValidationRules,
    pub(crate) mode: Option<ValidationMode>,
    pub(crate) revalidate_mode: Option<ValidationMode>,
    pub(crate) custom_props: BTreeMap<String, Value>,
}

impl FieldConfig {
    /// Bind the field with an accessor closure.
    pub fn new<F>(accessor: F) -> Self
    where
        F: for<'a> Fn(Cursor<'a>) -> Cursor<'a> + 'static,
    {
        Self::with_target(FieldTarget::Accessor(Rc::new(accessor)))
    }

    /// Bind the field to an explicit path.
    pub fn at_path(path: impl Into<FieldPath>) -> Self {
        Self::with_target(FieldTarget::Path(path.into()))
    }

    /// Bind the field to a dotted path such as `profile.name`.
    pub fn parse_path(path: &str) -> Result<Self> {
        Ok(Self::at_path(FieldPath::parse(path)?))
    }

    fn with_target(target: FieldTarget) -> Self {
        Self {
            target,
            default_value: None,
            rules: ValidationRules::default(),
            mode: None,
            revalidate_mode: None,
            custom_props: BTreeMap::new(),
        }
    }

    /// Value written (silently) at registration when the slot is absent.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Replace all validation rules at once.
    #[must_use]
    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn validate<F, O>(mut self, validator: F) -> Self
    where
        F: Fn(Option<&Value>) -> O + 'static,
        O: Into<ValidatorOutcome>,
    {
        self.rules = self.rules.validate(validator);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.rules = self.rules.required();
        self
    }

    #[must_use]
    pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
        self.rules = self.rules.required_with_message(message);
        self
    }

    #[must_use]
    pub fn min_length(mut self, bound: impl Into<Bound<usize>>) -> Self {
        self.rules = self.rules.min_length(bound);
        self
    }

    #[must_use]
    pub fn max_length(mut self, bound: impl Into<Bound<usize>>) -> Self {
        self.rules = self.rules.max_length(bound);
        self
    }

    #[must_use]
    pub fn pattern(mut self, bound: impl Into<Bound<Pattern>>) -> Self {
        self.rules = self.rules.pattern(bound);
        self
    }

    /// Pattern from regex source, optionally with a custom message.
    pub fn pattern_regex(self, source: &str, message: Option<&str>) -> Result<Self> {
        let pattern = Pattern::regex(source).map_err(|source_err| FormError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;
        Ok(match message {
            Some(message) => self.pattern(Bound::with_message(pattern, message)),
            None => self.pattern(pattern),
        })
    }

    #[must_use]
    pub fn min(mut self, bound: impl Into<Bound<Comparable>>) -> Self {
        self.rules = self.rules.min(bound);
        self
    }

    #[must_use]
    pub fn max(mut self, bound: impl Into<Bound<Comparable>>) -> Self {
        self.rules = self.rules.max(bound);
        self
    }

    /// Override the form's validation mode for this field.
    #[must_use]
    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Override the form's revalidation mode for this field.
    #[must_use]
    pub fn revalidate_mode(mut self, mode: ValidationMode) -> Self {
        self.revalidate_mode = Some(mode);
        self
    }

    /// Add a prop forwarded untouched to the view layer.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_props.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn props(mut self, props: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.custom_props.extend(props);
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            FieldTarget::Accessor(_) => "<accessor>".to_string(),
            FieldTarget::Path(path) => path.to_string(),
        };
        f.debug_struct("FieldConfig")
            .field("target", &target)
            .field("default_value", &self.default_value)
            .field("rules", &self.rules)
            .field("mode", &self.mode)
            .field("revalidate_mode", &self.revalidate_mode)
            .field("custom_props", &self.custom_props)
            .finish()
    }
}

/// A registered field.
///
/// The handle is what a view binds to: it reads the field's value and errors
/// and feeds focus, blur and change events back into the form. Handles are
/// cheap to clone and stay usable after unregistration; events then still
/// update the value and interaction record but no validator runs.
#[derive(Debug, Clone)]
pub struct FieldHandle {
    form: FormController,
    id: FieldId,
    path: FieldPath,
}

impl FieldHandle {
    pub(crate) fn new(form: FormController, id: FieldId, path: FieldPath) -> Self {
        Self { form, id, path }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Current value, `None` when the slot does not exist.
    pub fn value(&self) -> Option<Value> {
        self.form.get_path(&self.path)
    }

    /// Errors from the last non-silent validation.
    pub fn errors(&self) -> Vec<String> {
        self.record().errors
    }

    pub fn record(&self) -> FieldInteractionRecord {
        self.form.record(self.id)
    }

    /// Props configured for the view layer; empty once unregistered.
    pub fn custom_props(&self) -> BTreeMap<String, Value> {
        self.form.custom_props(self.id).unwrap_or_default()
    }

    pub fn on_focus(&self) {
        self.form.update_record(self.id, FieldInteractionRecord::mark_focused);
        self.form.maybe_validate(self.id);
    }

    pub fn on_blur(&self) {
        self.form.update_record(self.id, FieldInteractionRecord::mark_blurred);
        self.form.maybe_validate(self.id);
    }

    /// Write a new value, mark the field dirty and give validation a chance
    /// to run.
    pub fn on_change_value(&self, value: impl Into<Value>) {
        self.form
            .set_path(&self.path, value.into(), SetOptions::default());
        self.form.update_record(self.id, FieldInteractionRecord::mark_dirty);
        self.form.maybe_validate(self.id);
    }

    /// Run this field's validation. Returns whether the field is valid; a
    /// pass gated out by the mode reports valid.
    pub fn validate(&self, options: ValidateOptions) -> Result<bool> {
        self.form
            .validate_field(self.id, options)
            .ok_or(FormError::UnknownField { id: self.id })
    }

    /// Call `listener` whenever this field's value changes.
    pub fn subscribe_value(
        &self,
        mut listener: impl FnMut(Option<&Value>) + 'static,
    ) -> SubscriptionId {
        let path = self.path.clone();
        self.form.values().subscribe(
            move |state: &Value| get_at(state, &path).cloned(),
            move |value: &Option<Value>| listener(value.as_ref()),
        )
    }

    pub fn unsubscribe_value(&self, id: SubscriptionId) -> bool {
        self.form.values().unsubscribe(id)
    }

    /// Call `listener` whenever this field's error list changes.
    pub fn subscribe_errors(
        &self,
        mut listener: impl FnMut(&[String]) + 'static,
    ) -> SubscriptionId {
        let id = self.id;
        self.form.ui().subscribe(
            move |ui: &UiState| {
                ui.get(&id)
                    .map(|record| record.errors.clone())
                    .unwrap_or_default()
            },
            move |errors: &Vec<String>| listener(errors),
        )
    }

    pub fn unsubscribe_errors(&self, id: SubscriptionId) -> bool {
        self.form.ui().unsubscribe(id)
    }
}
