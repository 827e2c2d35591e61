//! Field paths.
//!
//! A [`FieldPath`] is the decomposition of "which field" into property tokens,
//! e.g. `["profile", "name"]`. Array elements are addressed by their decimal
//! index token (`"0"`, `"1"`, ...). The empty path addresses the root of the
//! state tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Ordered sequence of property-name tokens identifying a slot in the form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The empty path, addressing the whole state tree.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dot-separated path such as `profile.name` or `items.0.label`.
    ///
    /// The empty string parses to the root path.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::root());
        }
        let mut tokens = Vec::new();
        for token in input.split('.') {
            if token.is_empty() {
                return Err(ModelError::InvalidPath {
                    path: input.to_string(),
                    reason: "empty segment",
                });
            }
            tokens.push(token.to_string());
        }
        Ok(Self(tokens))
    }

    /// Append a property token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    /// Returns a new path with `token` appended.
    #[must_use]
    pub fn join(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(token);
        next
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Interpret a token as an array index.
///
/// Only canonical decimal integers qualify: `"0"`, `"17"`, but not `"01"`,
/// `"+1"` or `"-1"`.
pub fn as_index(token: &str) -> Option<usize> {
    let canonical = token == "0"
        || (!token.is_empty()
            && !token.starts_with('0')
            && token.bytes().all(|b| b.is_ascii_digit()));
    if canonical { token.parse().ok() } else { None }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(tokens: [&str; N]) -> Self {
        Self(tokens.iter().map(|t| (*t).to_string()).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
