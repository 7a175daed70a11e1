//! Named, typed configuration parameters carried by every cost model.
//!
//! A `ParamStore` maps parameter names to values of a fixed set of
//! primitive kinds. Inside the crate the closed `ParamValue` enum makes
//! other kinds unrepresentable; untyped input (embedding hosts, durable
//! records) is validated at the boundary via `from_json`/`set_json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors from the parameter surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("no parameter named '{0}'")]
    NotFound(String),

    #[error("unsupported parameter type: {0} (expected int, bool, float, or string)")]
    UnsupportedType(String),

    #[error("parameter '{name}' is a {found}, expected {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A single parameter value.
///
/// Serialized untagged, so the durable form is a plain JSON scalar.
/// `Int` precedes `Float` so integer literals round-trip as `Int`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Kind name for diagnostics and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "int",
            ParamValue::Bool(_) => "bool",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
        }
    }

    /// Validate untyped input into a parameter value.
    ///
    /// Shapes outside the four supported kinds (null, array, object) are
    /// rejected here, never deeper in the call chain.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ParamError> {
        match value {
            serde_json::Value::Bool(b) => Ok(ParamValue::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ParamValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(ParamValue::Float(f))
                } else {
                    Err(ParamError::UnsupportedType("out-of-range number".to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(ParamValue::Str(s)),
            other => Err(ParamError::UnsupportedType(json_kind(&other).to_string())),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Named parameters of a cost model.
///
/// Created empty, mutated only through `set`/`set_json`, deep-copied on
/// `clone`. Backed by a `BTreeMap` so serialized key order is
/// deterministic. A name maps to exactly one kind at a time; re-setting
/// a name may change its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamStore {
    values: BTreeMap<String, ParamValue>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parameter names in key order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a parameter. An absent name is an error, not a default.
    pub fn get(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.values
            .get(name)
            .ok_or_else(|| ParamError::NotFound(name.to_string()))
    }

    /// Insert or overwrite a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Validating setter for untyped input.
    ///
    /// A rejected write leaves the store untouched.
    pub fn set_json(
        &mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), ParamError> {
        let value = ParamValue::from_json(value)?;
        self.values.insert(name.into(), value);
        Ok(())
    }

    pub fn int(&self, name: &str) -> Result<i64, ParamError> {
        match self.get(name)? {
            ParamValue::Int(i) => Ok(*i),
            other => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: "int",
                found: other.kind(),
            }),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ParamError> {
        match self.get(name)? {
            ParamValue::Bool(b) => Ok(*b),
            other => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: "bool",
                found: other.kind(),
            }),
        }
    }

    /// Read a float parameter. An int value is widened.
    pub fn float(&self, name: &str) -> Result<f64, ParamError> {
        match self.get(name)? {
            ParamValue::Float(x) => Ok(*x),
            ParamValue::Int(i) => Ok(*i as f64),
            other => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: "float",
                found: other.kind(),
            }),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str, ParamError> {
        match self.get(name)? {
            ParamValue::Str(s) => Ok(s.as_str()),
            other => Err(ParamError::WrongKind {
                name: name.to_string(),
                expected: "string",
                found: other.kind(),
            }),
        }
    }
}

impl fmt::Display for ParamStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.values {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
            first = false;
        }
        Ok(())
    }
}
