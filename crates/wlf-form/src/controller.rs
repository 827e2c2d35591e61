//! The form controller.
//!
//! A [`FormController`] owns two stores: the value tree and the UI store of
//! per-field interaction records. Fields register against it and get back a
//! [`FieldHandle`]; validation only ever writes to the UI store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace};
use wlf_model::{FieldId, FieldInteractionRecord, FieldPath, FormOptions, UiState};
use wlf_store::{SetOptions, Store};
use wlf_validate::{TriggerPolicy, ValidateOptions, ValidationRules, run_validators};

use crate::error::{FormError, Result};
use crate::field::{FieldConfig, FieldHandle};
use crate::reserved::check_custom_props;

/// Registry entry for one mounted field.
#[derive(Clone)]
struct RegisteredField {
    path: FieldPath,
    rules: ValidationRules,
    policy: TriggerPolicy,
    custom_props: BTreeMap<String, Value>,
}

struct FormInner {
    values: Store<Value>,
    ui: Store<UiState>,
    init_state: Value,
    options: FormOptions,
    fields: RefCell<BTreeMap<FieldId, RegisteredField>>,
}

/// Shared handle onto one form. Clones address the same form.
#[derive(Clone)]
pub struct FormController {
    inner: Rc<FormInner>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("options", &self.inner.options)
            .field("fields", &self.inner.fields.borrow().len())
            .finish_non_exhaustive()
    }
}

impl FormController {
    pub fn new(init_state: Value, options: FormOptions) -> Self {
        Self {
            inner: Rc::new(FormInner {
                values: Store::new(init_state.clone()),
                ui: Store::new(UiState::new()),
                init_state,
                options,
                fields: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.inner.options
    }

    pub fn init_state(&self) -> &Value {
        &self.inner.init_state
    }

    /// The value store, for subscriptions.
    pub fn values(&self) -> &Store<Value> {
        &self.inner.values
    }

    /// The UI store of interaction records, for subscriptions.
    pub fn ui(&self) -> &Store<UiState> {
        &self.inner.ui
    }

    // ---- registry ----

    /// Mount a field.
    ///
    /// Fails when a custom prop uses a reserved key or when the field does
    /// not address anything below the root. A configured default is written
    /// silently when the slot is absent.
    pub fn register_field(&self, config: FieldConfig) -> Result<FieldHandle> {
        let default_value = config.default_value.clone();
        let field = self.prepare(config)?;
        let id = FieldId::next();
        let path = field.path.clone();

        if let Some(default_value) = default_value
            && self.inner.values.get_path(&path).is_none()
        {
            trace!(field = %id, path = %path, "applying default value");
            self.inner
                .values
                .set_path(&path, default_value, SetOptions::silent());
        }

        self.inner.fields.borrow_mut().insert(id, field);
        debug!(field = %id, path = %path, "registered field");
        Ok(FieldHandle::new(self.clone(), id, path))
    }

    /// Replace the configuration of an already minted field, keeping its id.
    ///
    /// Defaults are not re-applied. Returns a handle bound to the new path.
    pub fn reregister_field(&self, handle: &FieldHandle, config: FieldConfig) -> Result<FieldHandle> {
        let field = self.prepare(config)?;
        let id = handle.id();
        let path = field.path.clone();
        let replaced = self.inner.fields.borrow_mut().insert(id, field).is_some();
        debug!(field = %id, path = %path, replaced, "re-registered field");
        Ok(FieldHandle::new(self.clone(), id, path))
    }

    /// Unmount a field. Its interaction record stays in the UI store.
    pub fn unregister_field(&self, handle: &FieldHandle) -> Result<()> {
        let id = handle.id();
        match self.inner.fields.borrow_mut().remove(&id) {
            Some(_) => {
                debug!(field = %id, "unregistered field");
                Ok(())
            }
            None => Err(FormError::UnknownField { id }),
        }
    }

    /// Ids of the mounted fields, in registration order.
    pub fn registered_fields(&self) -> Vec<FieldId> {
        self.inner.fields.borrow().keys().copied().collect()
    }

    /// A fresh handle for a mounted field.
    pub fn field(&self, id: FieldId) -> Option<FieldHandle> {
        let path = self.inner.fields.borrow().get(&id)?.path.clone();
        Some(FieldHandle::new(self.clone(), id, path))
    }

    fn prepare(&self, config: FieldConfig) -> Result<RegisteredField> {
        check_custom_props(&config.custom_props)?;
        let path = config.target.resolve();
        if path.is_root() {
            return Err(FormError::EmptyFieldPath);
        }
        Ok(RegisteredField {
            path,
            rules: config.rules,
            policy: TriggerPolicy::resolve(config.mode, config.revalidate_mode, &self.inner.options),
            custom_props: config.custom_props,
        })
    }

    // ---- validation ----

    /// Run every mounted field's validation and AND the results.
    ///
    /// Every field runs even after one has failed.
    pub fn validate_all(&self, options: ValidateOptions) -> bool {
        let ids = self.registered_fields();
        let valid = ids
            .iter()
            .filter_map(|id| self.validate_field(*id, options))
            .fold(true, |all, ok| all && ok);
        debug!(
            fields = ids.len(),
            valid,
            silent = options.silent,
            "validated form"
        );
        valid
    }

    /// Forced validation of every field, writing errors.
    pub fn validate(&self) -> bool {
        self.validate_all(ValidateOptions::forced())
    }

    /// Forced validation of every field without touching any error list.
    pub fn silently_validate(&self) -> bool {
        self.validate_all(ValidateOptions::forced_silent())
    }

    /// Validate one field. `None` when the field is not mounted.
    pub(crate) fn validate_field(&self, id: FieldId, options: ValidateOptions) -> Option<bool> {
        // Clone out so validators are free to call back into the form.
        let field = self.inner.fields.borrow().get(&id)?.clone();
        let record = self.record(id);
        if !field.policy.should_validate(&record, options.force) {
            return Some(true);
        }

        let value = self.inner.values.get_path(&field.path);
        let errors = run_validators(value.as_ref(), &field.rules);
        let valid = errors.is_empty();
        debug!(
            field = %id,
            path = %field.path,
            errors = errors.len(),
            silent = options.silent,
            "validated field"
        );
        if !options.silent {
            self.update_record(id, |record| record.record_validation(errors));
        }
        Some(valid)
    }

    pub(crate) fn maybe_validate(&self, id: FieldId) {
        self.validate_field(id, ValidateOptions::default());
    }

    // ---- interaction state ----

    pub(crate) fn record(&self, id: FieldId) -> FieldInteractionRecord {
        self.inner
            .ui
            .read(|ui| ui.get(&id).cloned().unwrap_or_default())
    }

    pub(crate) fn update_record(&self, id: FieldId, f: impl FnOnce(&mut FieldInteractionRecord)) {
        self.inner.ui.mutate(|ui| f(ui.entry(id).or_default()));
    }

    pub(crate) fn custom_props(&self, id: FieldId) -> Option<BTreeMap<String, Value>> {
        self.inner
            .fields
            .borrow()
            .get(&id)
            .map(|field| field.custom_props.clone())
    }

    /// Drop every interaction record. [`reset`](Self::reset) keeps them.
    pub fn clear_interaction_state(&self) {
        debug!("cleared interaction state");
        self.inner.ui.set(UiState::new());
    }

    // ---- values ----

    /// Replace the value tree with `state`, or with the initial state.
    pub fn reset(&self, state: Option<Value>) {
        let explicit = state.is_some();
        debug!(explicit, "reset form values");
        self.inner
            .values
            .set(state.unwrap_or_else(|| self.inner.init_state.clone()));
    }

    pub fn get(&self) -> Value {
        self.inner.values.get()
    }

    pub fn set(&self, state: Value) {
        self.inner.values.set(state);
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<Value> {
        self.inner.values.get_path(path)
    }

    pub fn set_path(&self, path: &FieldPath, value: Value, options: SetOptions) {
        self.inner.values.set_path(path, value, options);
    }

    pub fn mutate(&self, f: impl FnOnce(&mut Value)) {
        self.inner.values.mutate(f);
    }
}
