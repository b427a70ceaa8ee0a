//! Serde and JSON interop.
//!
//! A dict serializes as a plain map in insertion order and deserializes from
//! any map. Bookkeeping (aliases, direct attributes, hook) is not part of the
//! serialized form. Object order relies on `serde_json`'s `preserve_order`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use cleverdict_types::{DictError, DictOptions, json_type_name};
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::CleverDict;

/// Cap on pre-allocation from an untrusted size hint.
const MAX_PREALLOC: usize = 4096;

impl<V: Serialize> Serialize for CleverDict<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CleverDict<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictVisitor(PhantomData))
    }
}

struct DictVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for DictVisitor<V> {
    type Value = CleverDict<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let capacity = access.size_hint().unwrap_or(0).min(MAX_PREALLOC);
        let mut entries = IndexMap::with_capacity(capacity);
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.insert(key, Arc::new(value));
        }
        Ok(CleverDict::from_shared(entries))
    }
}

impl<V: Serialize> CleverDict<V> {
    /// The entries as a JSON object.
    pub fn to_value(&self) -> Result<Value, DictError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String, DictError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DictError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a typed object from the entries, matching keys to fields.
    pub fn to_object<T: DeserializeOwned>(&self) -> Result<T, DictError> {
        Ok(serde_json::from_value(self.to_value()?)?)
    }
}

impl<V: DeserializeOwned> CleverDict<V> {
    /// Build a dict from a JSON object. Anything else is a type error.
    pub fn from_value(value: Value) -> Result<Self, DictError> {
        Self::from_value_with(value, DictOptions::default())
    }

    /// Like [`from_value`](Self::from_value), but every key goes through
    /// the normal insert path under `options`, so a normalising dict gets
    /// its aliases back.
    pub fn from_value_with(value: Value, options: DictOptions) -> Result<Self, DictError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(DictError::not_a_mapping(json_type_name(&other))),
        };
        let mut batch = Vec::with_capacity(map.len());
        for (key, value) in map {
            batch.push((key, Arc::new(serde_json::from_value::<V>(value)?)));
        }
        let mut dict = Self::with_options(options);
        dict.insert_batch(batch)?;
        Ok(dict)
    }

    pub fn from_json(json: &str) -> Result<Self, DictError> {
        Self::from_json_with(json, DictOptions::default())
    }

    pub fn from_json_with(json: &str, options: DictOptions) -> Result<Self, DictError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value_with(value, options)
    }

    /// Copy the public fields of any serializable object into entries, in
    /// declaration order.
    pub fn from_object<T: Serialize + ?Sized>(object: &T) -> Result<Self, DictError> {
        Self::from_value(serde_json::to_value(object)?)
    }
}
