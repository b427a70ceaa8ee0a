//! Alias normalisation for keys that are not identifiers.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{Identifier, IdentifierPolicy, ident::is_keyword};

/// When a dict registers attribute aliases on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasPolicy {
    /// Only aliases added through `add_alias`.
    #[default]
    Explicit,
    /// Every non-identifier key also gets its [`normalise`]d alias.
    Normalise,
}

impl AliasPolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "explicit" => Some(Self::Explicit),
            "normalise" | "normalize" => Some(Self::Normalise),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Normalise => "normalise",
        }
    }
}

/// Derive an attribute name for `key`.
///
/// NFKC-folds the key, replaces every character that cannot appear in an
/// identifier with `_`, prefixes `_` when the result would start with a
/// digit and appends `_` to keywords. Returns `None` when nothing usable is
/// left (an empty key, or one that folds to `_`).
///
/// ```
/// use cleverdict_types::{IdentifierPolicy, normalise};
///
/// let alias = normalise("my key", IdentifierPolicy::Unicode).unwrap();
/// assert_eq!(alias.as_str(), "my_key");
/// assert_eq!(normalise("1", IdentifierPolicy::Unicode).unwrap().as_str(), "_1");
/// assert!(normalise("", IdentifierPolicy::Unicode).is_none());
/// ```
#[must_use]
pub fn normalise(key: &str, policy: IdentifierPolicy) -> Option<Identifier> {
    let folded: String = key.nfkc().collect();
    let mut out = String::with_capacity(folded.len() + 1);
    for (i, ch) in folded.chars().enumerate() {
        if i == 0 && !policy.is_start(ch) && policy.is_continue(ch) {
            out.push('_');
        }
        out.push(if policy.is_continue(ch) { ch } else { '_' });
    }
    if is_keyword(&out) {
        out.push('_');
    }
    Identifier::with_policy(out, policy).ok()
}
