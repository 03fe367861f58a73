//! Typed field lookups over untyped JSON objects.
//!
//! Every access is resolved to [`Lookup::Present`], [`Lookup::Absent`] or
//! [`Lookup::WrongType`], then turned into a value or an [`ExtractionError`]
//! naming the offending field by its dotted path.

use serde_json::{Map, Value};
use thiserror::Error;

/// Failure to extract a document: the first field that was missing or mistyped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("missing required field `{path}`")]
    Missing { path: String },

    #[error("field `{path}` has the wrong type: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ExtractionError {
    /// Dotted path of the offending field
    pub fn path(&self) -> &str {
        match self {
            ExtractionError::Missing { path } | ExtractionError::WrongType { path, .. } => path,
        }
    }
}

/// JSON kind name used in error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Outcome of looking up one field.
///
/// `null` counts as absent.
#[derive(Debug)]
pub(crate) enum Lookup<T> {
    Present(T),
    Absent { path: String },
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl<T> Lookup<T> {
    /// Absent and mistyped values are both errors
    pub fn required(self) -> Result<T, ExtractionError> {
        match self {
            Lookup::Present(value) => Ok(value),
            Lookup::Absent { path } => Err(ExtractionError::Missing { path }),
            Lookup::WrongType {
                path,
                expected,
                found,
            } => Err(ExtractionError::WrongType {
                path,
                expected,
                found,
            }),
        }
    }

    /// Absent values are tolerated, mistyped ones are not
    pub fn optional(self) -> Result<Option<T>, ExtractionError> {
        match self {
            Lookup::Present(value) => Ok(Some(value)),
            Lookup::Absent { .. } => Ok(None),
            Lookup::WrongType {
                path,
                expected,
                found,
            } => Err(ExtractionError::WrongType {
                path,
                expected,
                found,
            }),
        }
    }
}

/// A JSON object together with its dotted path from the document root
#[derive(Debug, Clone)]
pub(crate) struct Object<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Object<'a> {
    /// Interpret the document root as an object
    pub fn root(value: &'a Value) -> Result<Self, ExtractionError> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                path: String::new(),
            }),
            other => Err(ExtractionError::WrongType {
                path: "$".to_string(),
                expected: "object",
                found: kind_of(other),
            }),
        }
    }

    /// Interpret `value` as an object located at `path`
    pub fn at(value: &'a Value, path: String) -> Lookup<Object<'a>> {
        match value {
            Value::Null => Lookup::Absent { path },
            Value::Object(map) => Lookup::Present(Object { map, path }),
            other => Lookup::WrongType {
                path,
                expected: "object",
                found: kind_of(other),
            },
        }
    }

    /// Path of this object from the document root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path of a child field
    pub fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Iterate over the object's entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.map.iter()
    }

    fn lookup<T>(
        &self,
        key: &str,
        expected: &'static str,
        cast: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Lookup<T> {
        let path = self.child_path(key);
        match self.map.get(key) {
            None | Some(Value::Null) => Lookup::Absent { path },
            Some(value) => match cast(value) {
                Some(typed) => Lookup::Present(typed),
                None => Lookup::WrongType {
                    path,
                    expected,
                    found: kind_of(value),
                },
            },
        }
    }

    pub fn str(&self, key: &str) -> Lookup<&'a str> {
        self.lookup(key, "string", Value::as_str)
    }

    pub fn array(&self, key: &str) -> Lookup<&'a [Value]> {
        self.lookup(key, "array", |v| v.as_array().map(Vec::as_slice))
    }

    /// Numbers are rounded to the nearest integer, halves to even
    pub fn integer(&self, key: &str) -> Lookup<i64> {
        self.lookup(key, "number", |v| {
            v.as_i64().or_else(|| v.as_f64().map(|f| f.round_ties_even() as i64))
        })
    }

    pub fn object(&self, key: &str) -> Lookup<Object<'a>> {
        let path = self.child_path(key);
        match self.map.get(key) {
            None => Lookup::Absent { path },
            Some(value) => Object::at(value, path),
        }
    }
}
