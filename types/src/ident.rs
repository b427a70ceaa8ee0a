//! Attribute identifiers.
//!
//! An [`Identifier`] is a key that can also be used as an attribute name.
//! Validation happens once, at construction; holding an `Identifier` is the
//! proof that the name passed the active [`IdentifierPolicy`].

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::is_nfc;

/// Words that cannot be used as attribute names.
///
/// Strict, reserved and 2024-edition keywords. `_` on its own is rejected
/// separately.
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Which characters an identifier may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Alphabetic/alphanumeric Unicode characters in NFC form.
    #[default]
    Unicode,
    /// `[A-Za-z_][A-Za-z0-9_]*` only.
    Ascii,
}

impl IdentifierPolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unicode" => Some(Self::Unicode),
            "ascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unicode => "unicode",
            Self::Ascii => "ascii",
        }
    }

    /// Whether `ch` may start an identifier.
    #[must_use]
    pub fn is_start(self, ch: char) -> bool {
        match self {
            Self::Unicode => ch == '_' || ch.is_alphabetic(),
            Self::Ascii => ch == '_' || ch.is_ascii_alphabetic(),
        }
    }

    /// Whether `ch` may appear after the first character.
    #[must_use]
    pub fn is_continue(self, ch: char) -> bool {
        match self {
            Self::Unicode => ch == '_' || ch.is_alphanumeric(),
            Self::Ascii => ch == '_' || ch.is_ascii_alphanumeric(),
        }
    }
}

impl fmt::Display for IdentifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("'_' on its own is not an identifier")]
    LoneUnderscore,
    #[error("identifier {name:?} cannot start with {ch:?}")]
    InvalidStart { name: String, ch: char },
    #[error("identifier {name:?} contains {ch:?} at byte {index}")]
    InvalidChar {
        name: String,
        ch: char,
        index: usize,
    },
    #[error("{0:?} is a reserved keyword")]
    Keyword(String),
    #[error("identifier {0:?} is not in NFC form")]
    NotNormalized(String),
}

/// A key that is also a valid attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate `value` under [`IdentifierPolicy::Unicode`].
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::with_policy(value, IdentifierPolicy::Unicode)
    }

    pub fn with_policy(
        value: impl Into<String>,
        policy: IdentifierPolicy,
    ) -> Result<Self, IdentifierError> {
        let value = value.into();
        validate(&value, policy)?;
        Ok(Self(value))
    }

    /// Validate `name` without allocating.
    pub fn check(name: &str, policy: IdentifierPolicy) -> Result<(), IdentifierError> {
        validate(name, policy)
    }

    #[must_use]
    pub fn is_valid(name: &str, policy: IdentifierPolicy) -> bool {
        validate(name, policy).is_ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn validate(name: &str, policy: IdentifierPolicy) -> Result<(), IdentifierError> {
    let mut chars = name.char_indices();
    let Some((_, first)) = chars.next() else {
        return Err(IdentifierError::Empty);
    };
    if name == "_" {
        return Err(IdentifierError::LoneUnderscore);
    }
    if !policy.is_start(first) {
        return Err(IdentifierError::InvalidStart {
            name: name.to_string(),
            ch: first,
        });
    }
    if let Some((index, ch)) = chars.find(|&(_, ch)| !policy.is_continue(ch)) {
        return Err(IdentifierError::InvalidChar {
            name: name.to_string(),
            ch,
            index,
        });
    }
    if is_keyword(name) {
        return Err(IdentifierError::Keyword(name.to_string()));
    }
    if !name.is_ascii() && !is_nfc(name) {
        return Err(IdentifierError::NotNormalized(name.to_string()));
    }
    Ok(())
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
