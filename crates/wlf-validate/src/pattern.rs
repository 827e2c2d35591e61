//! Pattern checks: named patterns and arbitrary regular expressions.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([a-z\d]([a-z\d-]*[a-z\d])?\.)+[a-z]{2,}(:\d{1,5})?([/?#]\S*)?$")
        .expect("Invalid url regex")
});

/// Character classes a minimally secure password must each hit at least once:
/// digit, lowercase, uppercase, special.
static PASSWORD_CLASS_REGEXES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [r"\d", r"[a-z]", r"[A-Z]", r"[^A-Za-z0-9]"]
        .map(|class| Regex::new(class).expect("Invalid password class regex"))
});

const PASSWORD_MIN_CHARS: usize = 8;

/// Built-in patterns selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedPattern {
    Email,
    Url,
    MinimallySecurePassword,
}

impl NamedPattern {
    /// Parse a pattern name (`email`, `url`, `minimallySecurePassword`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "email" => Some(Self::Email),
            "url" => Some(Self::Url),
            "minimallySecurePassword" => Some(Self::MinimallySecurePassword),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "url",
            Self::MinimallySecurePassword => "minimallySecurePassword",
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Email => "Must be email",
            Self::Url => "Must be a valid url",
            Self::MinimallySecurePassword => {
                "Minimum of 8 characters with at least one number, lowercase, uppercase, and special character"
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Email => EMAIL_REGEX.is_match(text),
            Self::Url => URL_REGEX.is_match(text),
            Self::MinimallySecurePassword => {
                text.chars().count() >= PASSWORD_MIN_CHARS
                    && PASSWORD_CLASS_REGEXES.iter().all(|re| re.is_match(text))
            }
        }
    }
}

/// A pattern bound: a named pattern or an arbitrary regular expression.
#[derive(Debug, Clone)]
pub enum Pattern {
    Named(NamedPattern),
    Regex(Regex),
}

impl Pattern {
    pub fn email() -> Self {
        Self::Named(NamedPattern::Email)
    }

    pub fn url() -> Self {
        Self::Named(NamedPattern::Url)
    }

    pub fn minimally_secure_password() -> Self {
        Self::Named(NamedPattern::MinimallySecurePassword)
    }

    /// Compile an arbitrary regular expression.
    pub fn regex(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self::Regex)
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Named(named) => named.is_match(text),
            Self::Regex(re) => re.is_match(text),
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Named(named) => named.default_message(),
            Self::Regex(_) => "Invalid pattern",
        }
    }
}

impl From<NamedPattern> for Pattern {
    fn from(named: NamedPattern) -> Self {
        Self::Named(named)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(named.as_str()),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// Serialized form: a pattern name, or `{ "regex": "<source>" }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PatternSpec {
    Named(String),
    Regex { regex: String },
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PatternSpec::deserialize(deserializer)? {
            PatternSpec::Named(name) => NamedPattern::parse(&name).map(Self::Named).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "unknown pattern '{name}' (expected email, url, minimallySecurePassword or {{ \"regex\": ... }})"
                ))
            }),
            PatternSpec::Regex { regex } => Self::regex(&regex).map_err(serde::de::Error::custom),
        }
    }
}
