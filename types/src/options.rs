//! Resolved dict options.
//!
//! The raw TOML structs with `Option` fields live in `cleverdict-config`,
//! which resolves them into this type.

use serde::{Deserialize, Serialize};

use crate::{AliasPolicy, IdentifierPolicy};

/// Behaviour switches for a single dict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictOptions {
    pub identifiers: IdentifierPolicy,
    pub aliases: AliasPolicy,
}

impl DictOptions {
    #[must_use]
    pub const fn new(identifiers: IdentifierPolicy, aliases: AliasPolicy) -> Self {
        Self {
            identifiers,
            aliases,
        }
    }

    #[must_use]
    pub const fn with_identifiers(mut self, identifiers: IdentifierPolicy) -> Self {
        self.identifiers = identifiers;
        self
    }

    #[must_use]
    pub const fn with_aliases(mut self, aliases: AliasPolicy) -> Self {
        self.aliases = aliases;
        self
    }
}
