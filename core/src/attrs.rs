//! Attribute-style facades over a dict's entry store.
//!
//! `dict.attrs().get("name")` and `dict.get("name")` read the same entry;
//! `dict.attrs_mut().set("name", v)` and `dict.set("name", v)` leave the
//! dict in the same state. The facades only add name validation and alias
//! resolution on top of the mapping methods.

use std::sync::Arc;

use cleverdict_types::{DictError, Identifier};

use crate::CleverDict;

/// Read-only attribute view of a [`CleverDict`].
pub struct Attrs<'a, V> {
    dict: &'a CleverDict<V>,
}

impl<'a, V> Attrs<'a, V> {
    pub(crate) fn new(dict: &'a CleverDict<V>) -> Self {
        Self { dict }
    }

    /// Read attribute `name`.
    ///
    /// Fails with `InvalidIdentifier` for names that cannot be attributes
    /// and `AttributeNotFound` when nothing answers to `name`.
    pub fn get(&self, name: &str) -> Result<&'a V, DictError> {
        read(self.dict, name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dict.attribute_key(name).is_ok()
    }

    /// Every attribute name, grouped by entry in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.dict.attribute_names()
    }
}

/// Read-write attribute view of a [`CleverDict`].
pub struct AttrsMut<'a, V> {
    dict: &'a mut CleverDict<V>,
}

impl<'a, V> AttrsMut<'a, V> {
    pub(crate) fn new(dict: &'a mut CleverDict<V>) -> Self {
        Self { dict }
    }

    pub fn get(&self, name: &str) -> Result<&V, DictError> {
        read(self.dict, name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dict.attribute_key(name).is_ok()
    }

    /// Write attribute `name`.
    ///
    /// An alias writes through to the key it points at. Any other valid name
    /// is used as the key itself, appended if new.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<Arc<V>>,
    ) -> Result<Option<Arc<V>>, DictError> {
        Identifier::check(name, self.dict.options().identifiers)?;
        let key = self
            .dict
            .resolve_attribute(name)
            .unwrap_or(name)
            .to_string();
        self.dict.insert_entry(key, value.into())
    }

    /// Delete the entry behind attribute `name`, with all its aliases.
    pub fn delete(&mut self, name: &str) -> Result<Arc<V>, DictError> {
        let key = self.dict.attribute_key(name)?.to_string();
        self.dict
            .delete(&key)
            .map_err(|_| DictError::attribute_not_found(name))
    }
}

fn read<'a, V>(dict: &'a CleverDict<V>, name: &str) -> Result<&'a V, DictError> {
    let key = dict.attribute_key(name)?;
    dict.get(key)
        .map_err(|_| DictError::attribute_not_found(name))
}
