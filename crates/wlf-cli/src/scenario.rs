//! Scenario files: declarative forms plus the events to replay against them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use wlf_form::{FieldConfig, FormError};
use wlf_model::{FormOptions, ValidationMode};
use wlf_validate::{Bound, Comparable, Pattern};

/// A complete scenario.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "empty_object")]
    pub init_state: Value,
    #[serde(default)]
    pub options: FormOptions,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// On-disk format, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let Some(format) = ScenarioFormat::from_path(path) else {
            bail!(
                "unsupported scenario file {} (expected .json or .toml)",
                path.display()
            );
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read scenario {}", path.display()))?;
        Self::parse(&contents, format).with_context(|| format!("parse scenario {}", path.display()))
    }

    pub fn parse(contents: &str, format: ScenarioFormat) -> Result<Self> {
        let scenario = match format {
            ScenarioFormat::Json => serde_json::from_str(contents)?,
            ScenarioFormat::Toml => toml::from_str(contents)?,
        };
        Ok(scenario)
    }

    /// Display name: the configured name or `fallback`.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// `required = true`, or the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RequiredSpec {
    Flag(bool),
    Message(String),
}

/// Declarative field definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldSpec {
    /// Name used by events and in the summary.
    pub name: String,
    /// Dotted path into the form state, e.g. `profile.email`.
    pub path: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub required: Option<RequiredSpec>,
    #[serde(default)]
    pub min_length: Option<Bound<usize>>,
    #[serde(default)]
    pub max_length: Option<Bound<usize>>,
    #[serde(default)]
    pub pattern: Option<Bound<Pattern>>,
    #[serde(default)]
    pub min: Option<Bound<Comparable>>,
    #[serde(default)]
    pub max: Option<Bound<Comparable>>,
    #[serde(default)]
    pub mode: Option<ValidationMode>,
    #[serde(default, rename = "reValidateMode")]
    pub revalidate_mode: Option<ValidationMode>,
    #[serde(default)]
    pub props: BTreeMap<String, Value>,
}

impl FieldSpec {
    /// Build the registration config for this field.
    pub fn to_config(&self) -> Result<FieldConfig, FormError> {
        let mut config = FieldConfig::parse_path(&self.path)?;
        if let Some(default) = &self.default {
            config = config.default_value(default.clone());
        }
        match &self.required {
            Some(RequiredSpec::Flag(true)) => config = config.required(),
            Some(RequiredSpec::Message(message)) => config = config.required_with_message(message),
            Some(RequiredSpec::Flag(false)) | None => {}
        }
        if let Some(bound) = &self.min_length {
            config = config.min_length(bound.clone());
        }
        if let Some(bound) = &self.max_length {
            config = config.max_length(bound.clone());
        }
        if let Some(bound) = &self.pattern {
            config = config.pattern(bound.clone());
        }
        if let Some(bound) = &self.min {
            config = config.min(bound.clone());
        }
        if let Some(bound) = &self.max {
            config = config.max(bound.clone());
        }
        if let Some(mode) = self.mode {
            config = config.mode(mode);
        }
        if let Some(mode) = self.revalidate_mode {
            config = config.revalidate_mode(mode);
        }
        Ok(config.props(self.props.clone()))
    }
}

/// One interaction to replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Focus {
        field: String,
    },
    Blur {
        field: String,
    },
    Change {
        field: String,
        value: Value,
    },
    /// Forced validation of one field or, without `field`, the whole form.
    Validate {
        #[serde(default)]
        field: Option<String>,
    },
    /// Like `validate` but leaves every error list untouched.
    SilentValidate {
        #[serde(default)]
        field: Option<String>,
    },
    Reset {
        #[serde(default)]
        state: Option<Value>,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Focus { .. } => "focus",
            Self::Blur { .. } => "blur",
            Self::Change { .. } => "change",
            Self::Validate { .. } => "validate",
            Self::SilentValidate { .. } => "silentValidate",
            Self::Reset { .. } => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_scenario() {
        let scenario = Scenario::parse(
            r#"{
                "initState": { "email": "" },
                "options": { "mode": "onChange" },
                "fields": [
                    { "name": "email", "path": "email", "required": true, "pattern": ["email", "Bad email"] }
                ],
                "events": [
                    { "type": "change", "field": "email", "value": "x" },
                    { "type": "validate" },
                    { "type": "reset" }
                ]
            }"#,
            ScenarioFormat::Json,
        )
        .unwrap();
        assert_eq!(scenario.options.mode, Some(ValidationMode::OnChange));
        assert_eq!(scenario.fields[0].required, Some(RequiredSpec::Flag(true)));
        assert_eq!(
            scenario.fields[0].pattern.as_ref().and_then(Bound::custom_message),
            Some("Bad email")
        );
        assert_eq!(
            scenario.events,
            vec![
                Event::Change {
                    field: "email".into(),
                    value: json!("x")
                },
                Event::Validate { field: None },
                Event::Reset { state: None },
            ]
        );
    }

    #[test]
    fn test_parse_toml_scenario() {
        let scenario = Scenario::parse(
            r#"
                name = "signup"

                [initState.profile]
                name = ""

                [[fields]]
                name = "name"
                path = "profile.name"
                required = "Name is required"
                minLength = [2, "Too short"]
                reValidateMode = "onChange"

                [[events]]
                type = "blur"
                field = "name"
            "#,
            ScenarioFormat::Toml,
        )
        .unwrap();
        assert_eq!(scenario.display_name("fallback"), "signup");
        assert_eq!(scenario.init_state, json!({ "profile": { "name": "" } }));
        let field = &scenario.fields[0];
        assert_eq!(field.revalidate_mode, Some(ValidationMode::OnChange));
        assert_eq!(field.min_length, Some(Bound::with_message(2, "Too short")));
        assert_eq!(
            scenario.events,
            vec![Event::Blur {
                field: "name".into()
            }]
        );
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.JSON")),
            Some(ScenarioFormat::Json)
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("b.toml")),
            Some(ScenarioFormat::Toml)
        );
        assert_eq!(ScenarioFormat::from_path(Path::new("b.yaml")), None);
    }

    #[test]
    fn test_field_spec_reserved_prop_is_rejected() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "name": "n",
            "path": "n",
            "props": { "onBlur": "x" }
        }))
        .unwrap();
        let form = wlf_form::FormController::new(json!({}), FormOptions::default());
        let err = form.register_field(spec.to_config().unwrap()).unwrap_err();
        assert!(matches!(err, FormError::ReservedProp { .. }));
    }

    #[test]
    fn test_unknown_event_type_fails() {
        let err = Scenario::parse(r#"{ "events": [{ "type": "hover" }] }"#, ScenarioFormat::Json);
        assert!(err.is_err());
    }
}
