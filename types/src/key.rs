//! Key coercion.
//!
//! Keys are stored as `String`. Anything that can be turned into a key
//! implements [`IntoKey`]; coercion is checked at the boundary so a value
//! with no sensible string form (a JSON array, NaN) is rejected before it
//! reaches the store.

use std::borrow::Cow;

use serde_json::Value;
use thiserror::Error;

use crate::Identifier;

/// A value that cannot be used as a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{found} cannot be used as a key")]
pub struct KeyTypeError {
    found: Cow<'static, str>,
}

impl KeyTypeError {
    #[must_use]
    pub fn new(found: impl Into<Cow<'static, str>>) -> Self {
        Self {
            found: found.into(),
        }
    }

    /// Short description of the rejected value, e.g. `"a JSON array"`.
    #[must_use]
    pub fn found(&self) -> &str {
        &self.found
    }
}

/// Conversion into a mapping key.
pub trait IntoKey {
    fn into_key(self) -> Result<String, KeyTypeError>;
}

impl IntoKey for String {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self)
    }
}

impl IntoKey for &str {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.to_string())
    }
}

impl IntoKey for &String {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.clone())
    }
}

impl IntoKey for Cow<'_, str> {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.into_owned())
    }
}

impl IntoKey for char {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.to_string())
    }
}

impl IntoKey for bool {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.to_string())
    }
}

impl IntoKey for Identifier {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.into_inner())
    }
}

impl IntoKey for &Identifier {
    fn into_key(self) -> Result<String, KeyTypeError> {
        Ok(self.as_str().to_string())
    }
}

macro_rules! int_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoKey for $ty {
                fn into_key(self) -> Result<String, KeyTypeError> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

int_keys!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IntoKey for f64 {
    fn into_key(self) -> Result<String, KeyTypeError> {
        if self.is_finite() {
            Ok(self.to_string())
        } else {
            Err(KeyTypeError::new(format!("non-finite float {self}")))
        }
    }
}

impl IntoKey for f32 {
    fn into_key(self) -> Result<String, KeyTypeError> {
        f64::from(self).into_key()
    }
}

impl IntoKey for &Value {
    fn into_key(self) -> Result<String, KeyTypeError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err(KeyTypeError::new("JSON null")),
            Value::Array(_) => Err(KeyTypeError::new("a JSON array")),
            Value::Object(_) => Err(KeyTypeError::new("a JSON object")),
        }
    }
}

impl IntoKey for Value {
    fn into_key(self) -> Result<String, KeyTypeError> {
        match self {
            Value::String(s) => Ok(s),
            other => (&other).into_key(),
        }
    }
}

/// Short description of a JSON value's type, for error messages.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "JSON null",
        Value::Bool(_) => "a JSON bool",
        Value::Number(_) => "a JSON number",
        Value::String(_) => "a JSON string",
        Value::Array(_) => "a JSON array",
        Value::Object(_) => "a JSON object",
    }
}
