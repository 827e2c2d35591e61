//! Build a form from a scenario and replay its events.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, info_span};
use wlf_form::{FieldHandle, FormController, FormError, ValidateOptions};
use wlf_model::{FieldInteractionRecord, ValidationMode};
use wlf_validate::TriggerPolicy;

use crate::scenario::{Event, FieldSpec, Scenario};

/// A form built from a scenario, with its fields addressable by name.
#[derive(Debug)]
pub struct ScenarioForm {
    pub form: FormController,
    pub fields: Vec<NamedField>,
}

#[derive(Debug)]
pub struct NamedField {
    pub name: String,
    pub handle: FieldHandle,
    pub policy: TriggerPolicy,
}

/// Final state of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub name: String,
    pub path: String,
    pub mode: ValidationMode,
    pub revalidate_mode: ValidationMode,
    pub value: Option<Value>,
    #[serde(flatten)]
    pub record: FieldInteractionRecord,
}

/// Outcome of replaying a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub name: String,
    pub events: usize,
    pub fields: Vec<FieldReport>,
    /// Result of a forced silent validation after the last event.
    pub valid: bool,
}

/// Register every field of `scenario` on a fresh form.
pub fn build_form(scenario: &Scenario) -> Result<ScenarioForm> {
    let form = FormController::new(scenario.init_state.clone(), scenario.options);
    let mut fields = Vec::with_capacity(scenario.fields.len());
    for spec in &scenario.fields {
        if fields.iter().any(|f: &NamedField| f.name == spec.name) {
            return Err(anyhow!("duplicate field name '{}'", spec.name));
        }
        let handle = register(&form, spec).map_err(|error| describe(&spec.name, &error))?;
        debug!(field = %spec.name, id = %handle.id(), "scenario field ready");
        fields.push(NamedField {
            name: spec.name.clone(),
            policy: TriggerPolicy::resolve(spec.mode, spec.revalidate_mode, &scenario.options),
            handle,
        });
    }
    Ok(ScenarioForm { form, fields })
}

fn register(form: &FormController, spec: &FieldSpec) -> Result<FieldHandle, FormError> {
    form.register_field(spec.to_config()?)
}

/// Registration error with the message and hint meant for people.
fn describe(name: &str, error: &FormError) -> anyhow::Error {
    match error.suggestion() {
        Some(hint) => anyhow!("field '{name}': {} {hint}", error.user_message()),
        None => anyhow!("field '{name}': {}", error.user_message()),
    }
}

impl ScenarioForm {
    pub fn field(&self, name: &str) -> Result<&FieldHandle> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.handle)
            .ok_or_else(|| anyhow!("event refers to unknown field '{name}'"))
    }

    /// Apply one event.
    pub fn apply(&self, event: &Event) -> Result<()> {
        match event {
            Event::Focus { field } => self.field(field)?.on_focus(),
            Event::Blur { field } => self.field(field)?.on_blur(),
            Event::Change { field, value } => self.field(field)?.on_change_value(value.clone()),
            Event::Validate { field } => {
                self.validate(field.as_deref(), ValidateOptions::forced())?;
            }
            Event::SilentValidate { field } => {
                self.validate(field.as_deref(), ValidateOptions::forced_silent())?;
            }
            Event::Reset { state } => self.form.reset(state.clone()),
        }
        Ok(())
    }

    fn validate(&self, field: Option<&str>, options: ValidateOptions) -> Result<bool> {
        match field {
            Some(name) => Ok(self.field(name)?.validate(options)?),
            None => Ok(self.form.validate_all(options)),
        }
    }

    /// Snapshot of every field, in declaration order.
    pub fn field_reports(&self) -> Vec<FieldReport> {
        self.fields
            .iter()
            .map(|field| FieldReport {
                name: field.name.clone(),
                path: field.handle.path().to_string(),
                mode: field.policy.mode,
                revalidate_mode: field.policy.revalidate_mode,
                value: field.handle.value(),
                record: field.handle.record(),
            })
            .collect()
    }
}

/// Build, replay and report.
pub fn run_scenario(scenario: &Scenario, name: &str) -> Result<RunReport> {
    let span = info_span!("scenario", name = %name);
    let _guard = span.enter();

    let built = build_form(scenario)?;
    info!(fields = built.fields.len(), events = scenario.events.len(), "replaying events");
    for (index, event) in scenario.events.iter().enumerate() {
        debug!(index, kind = event.kind(), "apply event");
        built
            .apply(event)
            .with_context(|| format!("event #{} ({})", index + 1, event.kind()))?;
    }

    let valid = built.form.silently_validate();
    info!(valid, "scenario finished");
    Ok(RunReport {
        name: name.to_string(),
        events: scenario.events.len(),
        fields: built.field_reports(),
        valid,
    })
}
