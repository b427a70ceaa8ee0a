//! Errors raised by dict operations.

use std::fmt;

use thiserror::Error;

use crate::{IdentifierError, KeyTypeError};

/// Coarse classification of a [`DictError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    KeyNotFound,
    AttributeNotFound,
    Type,
    InvalidIdentifier,
    AliasConflict,
    Serialization,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyNotFound => "key not found",
            Self::AttributeNotFound => "attribute not found",
            Self::Type => "type error",
            Self::InvalidIdentifier => "invalid identifier",
            Self::AliasConflict => "alias conflict",
            Self::Serialization => "serialization error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure a dict operation can report.
///
/// A failed operation leaves the dict exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },
    #[error("attribute not found: {name:?}")]
    AttributeNotFound { name: String },
    #[error(transparent)]
    Type(#[from] KeyTypeError),
    #[error("expected a mapping, found {found}")]
    NotAMapping { found: String },
    #[error("invalid attribute name: {0}")]
    InvalidIdentifier(#[from] IdentifierError),
    #[error("attribute name {name:?} already refers to key {existing:?}")]
    AliasConflict { name: String, existing: String },
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl DictError {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn attribute_not_found(name: impl Into<String>) -> Self {
        Self::AttributeNotFound { name: name.into() }
    }

    pub fn not_a_mapping(found: impl Into<String>) -> Self {
        Self::NotAMapping {
            found: found.into(),
        }
    }

    pub fn alias_conflict(name: impl Into<String>, existing: impl Into<String>) -> Self {
        Self::AliasConflict {
            name: name.into(),
            existing: existing.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::AttributeNotFound { .. } => ErrorKind::AttributeNotFound,
            Self::Type(_) | Self::NotAMapping { .. } => ErrorKind::Type,
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Self::AliasConflict { .. } => ErrorKind::AliasConflict,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::KeyNotFound | ErrorKind::AttributeNotFound
        )
    }
}

impl From<serde_json::Error> for DictError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
