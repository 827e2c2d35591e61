//! Per-field validation configuration.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

use crate::compare::Comparable;
use crate::pattern::Pattern;

/// A bound with an optional custom message.
///
/// Every bounded check (length, pattern, min/max) uses this same shape: a
/// bare limit selects the check's default message, a `(limit, message)` pair
/// keeps the limit and overrides the message. Serialized as either the bare
/// limit or a two-element `[limit, "message"]` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Bound<T> {
    WithMessage(T, String),
    Value(T),
}

impl<T> Bound<T> {
    pub fn new(limit: T) -> Self {
        Self::Value(limit)
    }

    pub fn with_message(limit: T, message: impl Into<String>) -> Self {
        Self::WithMessage(limit, message.into())
    }

    pub fn limit(&self) -> &T {
        match self {
            Self::Value(limit) | Self::WithMessage(limit, _) => limit,
        }
    }

    pub fn custom_message(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::WithMessage(_, message) => Some(message),
        }
    }

    /// The custom message, or `default(limit)`.
    pub fn message_or_else(&self, default: impl FnOnce(&T) -> String) -> String {
        match self {
            Self::Value(limit) => default(limit),
            Self::WithMessage(_, message) => message.clone(),
        }
    }
}

impl From<usize> for Bound<usize> {
    fn from(limit: usize) -> Self {
        Self::Value(limit)
    }
}

impl From<(usize, &str)> for Bound<usize> {
    fn from((limit, message): (usize, &str)) -> Self {
        Self::with_message(limit, message)
    }
}

impl From<Pattern> for Bound<Pattern> {
    fn from(pattern: Pattern) -> Self {
        Self::Value(pattern)
    }
}

impl From<(Pattern, &str)> for Bound<Pattern> {
    fn from((pattern, message): (Pattern, &str)) -> Self {
        Self::with_message(pattern, message)
    }
}

impl From<Comparable> for Bound<Comparable> {
    fn from(limit: Comparable) -> Self {
        Self::Value(limit)
    }
}

impl From<f64> for Bound<Comparable> {
    fn from(limit: f64) -> Self {
        Self::Value(Comparable::Number(limit))
    }
}

impl From<i64> for Bound<Comparable> {
    fn from(limit: i64) -> Self {
        Self::Value(Comparable::from(limit))
    }
}

impl From<(f64, &str)> for Bound<Comparable> {
    fn from((limit, message): (f64, &str)) -> Self {
        Self::with_message(Comparable::Number(limit), message)
    }
}

impl From<(Comparable, &str)> for Bound<Comparable> {
    fn from((limit, message): (Comparable, &str)) -> Self {
        Self::with_message(limit, message)
    }
}

/// The `required` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Required {
    /// Report the default `"Required"` message.
    Default,
    /// Report this message instead.
    Message(String),
}

impl Required {
    pub const DEFAULT_MESSAGE: &'static str = "Required";

    /// An empty message falls back to the default.
    pub fn message(&self) -> &str {
        match self {
            Self::Message(message) if !message.is_empty() => message,
            _ => Self::DEFAULT_MESSAGE,
        }
    }
}

/// Result of one custom validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidatorOutcome {
    #[default]
    Pass,
    Message(String),
    Messages(Vec<String>),
}

impl ValidatorOutcome {
    /// Append this outcome's messages to `errors`.
    ///
    /// A single empty message counts as a pass; message lists are appended
    /// verbatim.
    pub fn append_to(self, errors: &mut Vec<String>) {
        match self {
            Self::Pass => {}
            Self::Message(message) => {
                if !message.is_empty() {
                    errors.push(message);
                }
            }
            Self::Messages(messages) => errors.extend(messages),
        }
    }
}

impl From<bool> for ValidatorOutcome {
    /// A boolean carries no message, so `true` and `false` are both a pass.
    fn from(_: bool) -> Self {
        Self::Pass
    }
}

impl From<String> for ValidatorOutcome {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ValidatorOutcome {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl<T: Into<ValidatorOutcome>> From<Option<T>> for ValidatorOutcome {
    fn from(outcome: Option<T>) -> Self {
        outcome.map_or(Self::Pass, Into::into)
    }
}

impl From<Vec<String>> for ValidatorOutcome {
    fn from(messages: Vec<String>) -> Self {
        Self::Messages(messages)
    }
}

impl From<Vec<&str>> for ValidatorOutcome {
    fn from(messages: Vec<&str>) -> Self {
        Self::Messages(messages.into_iter().map(str::to_string).collect())
    }
}

/// Author-supplied validator over the field's current value (`None` when
/// the slot does not exist).
pub type CustomValidator = Rc<dyn Fn(Option<&Value>) -> ValidatorOutcome>;

/// Everything the pipeline checks for one field.
#[derive(Clone, Default)]
pub struct ValidationRules {
    pub custom: Vec<CustomValidator>,
    pub required: Option<Required>,
    pub min_length: Option<Bound<usize>>,
    pub max_length: Option<Bound<usize>>,
    pub pattern: Option<Bound<Pattern>>,
    pub min: Option<Bound<Comparable>>,
    pub max: Option<Bound<Comparable>>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom validator. Validators run in the order they are added.
    #[must_use]
    pub fn validate<F, O>(mut self, validator: F) -> Self
    where
        F: Fn(Option<&Value>) -> O + 'static,
        O: Into<ValidatorOutcome>,
    {
        self.custom
            .push(Rc::new(move |value: Option<&Value>| validator(value).into()));
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(Required::Default);
        self
    }

    #[must_use]
    pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
        self.required = Some(Required::Message(message.into()));
        self
    }

    #[must_use]
    pub fn min_length(mut self, bound: impl Into<Bound<usize>>) -> Self {
        self.min_length = Some(bound.into());
        self
    }

    #[must_use]
    pub fn max_length(mut self, bound: impl Into<Bound<usize>>) -> Self {
        self.max_length = Some(bound.into());
        self
    }

    #[must_use]
    pub fn pattern(mut self, bound: impl Into<Bound<Pattern>>) -> Self {
        self.pattern = Some(bound.into());
        self
    }

    #[must_use]
    pub fn min(mut self, bound: impl Into<Bound<Comparable>>) -> Self {
        self.min = Some(bound.into());
        self
    }

    #[must_use]
    pub fn max(mut self, bound: impl Into<Bound<Comparable>>) -> Self {
        self.max = Some(bound.into());
        self
    }

    /// True when no check is configured.
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
            && self.required.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("custom", &self.custom.len())
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}
