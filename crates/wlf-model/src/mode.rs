//! Validation trigger modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Policy deciding when a field's validation may run.
///
/// The same enum serves as the *mode* (first validation pass) and the
/// *revalidate mode* (every pass after the first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum ValidationMode {
    /// Validate on every trigger.
    All,
    /// Validate once the field has been blurred.
    #[default]
    OnBlur,
    /// Validate once the field has been focused.
    OnTouched,
    /// Validate once the field value has changed.
    OnChange,
    /// Never validate automatically; only forced validation runs.
    OnValidate,
}

impl ValidationMode {
    /// Parse a mode name. Unknown names are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "all" => Some(Self::All),
            "onBlur" => Some(Self::OnBlur),
            "onTouched" => Some(Self::OnTouched),
            "onChange" => Some(Self::OnChange),
            "onValidate" => Some(Self::OnValidate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::OnBlur => "onBlur",
            Self::OnTouched => "onTouched",
            Self::OnChange => "onChange",
            Self::OnValidate => "onValidate",
        }
    }

    /// Resolve the effective mode: field override, then form default, then
    /// [`ValidationMode::OnBlur`].
    pub fn resolve(field: Option<Self>, form: Option<Self>) -> Self {
        field.or(form).unwrap_or_default()
    }
}

/// Unrecognized names mean "no automatic validation configured".
impl From<String> for ValidationMode {
    fn from(s: String) -> Self {
        Self::parse(&s).unwrap_or(Self::OnValidate)
    }
}

impl FromStr for ValidationMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        use ValidationMode::{All, OnBlur, OnChange};
        assert_eq!(ValidationMode::resolve(Some(OnChange), Some(All)), OnChange);
        assert_eq!(ValidationMode::resolve(None, Some(All)), All);
        assert_eq!(ValidationMode::resolve(None, None), OnBlur);
    }

    #[test]
    fn test_deserialize_known_and_unknown() {
        let mode: ValidationMode = serde_json::from_str("\"onTouched\"").unwrap();
        assert_eq!(mode, ValidationMode::OnTouched);
        let mode: ValidationMode = serde_json::from_str("\"onSubmit\"").unwrap();
        assert_eq!(mode, ValidationMode::OnValidate);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&ValidationMode::OnChange).unwrap();
        assert_eq!(json, "\"onChange\"");
    }
}
