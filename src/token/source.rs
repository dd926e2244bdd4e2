//! Token sources: precedence-ordered maps that placeholders resolve against

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use thiserror::Error;

use super::FunctionCall;
use crate::config::FileError;
use crate::value::{Record, Value};

/// The four independent key spaces of a token source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Value,
    Class,
    Function,
    Active,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Value => write!(f, "value"),
            Namespace::Class => write!(f, "class"),
            Namespace::Function => write!(f, "function"),
            Namespace::Active => write!(f, "active"),
        }
    }
}

/// Errors raised while populating a token source
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Mutation attempted after the source was sealed
    #[error("token source is sealed, can not add {namespace} [{key}]")]
    SealViolation { namespace: Namespace, key: String },

    /// Key already present in the namespace
    #[error("{namespace} [{key}] is already defined in this token source")]
    DuplicateKey { namespace: Namespace, key: String },
}

/// A precedence-ordered store of values, classes, functions and activation
/// flags.
///
/// Sources are populated through `&mut self` and then sealed. Once sealed
/// every mutation fails with [`TokenError::SealViolation`] and the source can
/// be shared across concurrent resolutions.
#[derive(Debug, Default)]
pub struct TokenSource {
    precedence: i32,
    sealed: AtomicBool,
    values: HashMap<String, Value>,
    classes: HashMap<String, String>,
    functions: HashMap<String, FunctionCall>,
    active: HashMap<String, bool>,
}

/// TOML structure for token source files
#[derive(Deserialize)]
struct TomlTokenSource {
    #[serde(default)]
    precedence: i32,
    #[serde(default)]
    values: Record,
    #[serde(default)]
    classes: HashMap<String, String>,
    #[serde(default)]
    functions: HashMap<String, FunctionCall>,
    #[serde(default)]
    active: HashMap<String, bool>,
}

impl TokenSource {
    /// Create an empty, unsealed source
    pub fn new(precedence: i32) -> Self {
        Self {
            precedence,
            ..Default::default()
        }
    }

    /// Build a sealed source whose value namespace holds the fields of a
    /// record. Nested records are also reachable through dotted keys
    /// (`address.city`).
    pub fn from_record(record: &Record, precedence: i32) -> Self {
        let mut source = Self::new(precedence);
        flatten_into(&mut source.values, None, record);
        source.seal();
        source
    }

    /// Load a sealed source from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a sealed source from TOML. Nested value tables are also reachable
    /// through dotted keys.
    pub fn from_toml_str(content: &str) -> Result<Self, FileError> {
        let parsed: TomlTokenSource = toml::from_str(content)?;
        let mut values = HashMap::new();
        flatten_into(&mut values, None, &parsed.values);
        let source = Self {
            precedence: parsed.precedence,
            sealed: AtomicBool::new(false),
            values,
            classes: parsed.classes,
            functions: parsed.functions,
            active: parsed.active,
        };
        source.seal();
        Ok(source)
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    /// Freeze the source. Sealing is one-way and idempotent.
    pub fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    fn guard(&self, namespace: Namespace, key: &str, present: bool) -> Result<(), TokenError> {
        if self.is_sealed() {
            return Err(TokenError::SealViolation {
                namespace,
                key: key.to_string(),
            });
        }
        if present {
            return Err(TokenError::DuplicateKey {
                namespace,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Add a value under `key`
    pub fn add(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, TokenError> {
        let key = key.into();
        self.guard(Namespace::Value, &key, self.values.contains_key(&key))?;
        self.values.insert(key, value.into());
        Ok(self)
    }

    /// Add a class string under `key`
    pub fn add_class(
        &mut self,
        key: impl Into<String>,
        class: impl Into<String>,
    ) -> Result<&mut Self, TokenError> {
        let key = key.into();
        self.guard(Namespace::Class, &key, self.classes.contains_key(&key))?;
        self.classes.insert(key, class.into());
        Ok(self)
    }

    /// Add a function reference under `key`
    pub fn add_function(
        &mut self,
        key: impl Into<String>,
        function: FunctionCall,
    ) -> Result<&mut Self, TokenError> {
        let key = key.into();
        self.guard(Namespace::Function, &key, self.functions.contains_key(&key))?;
        self.functions.insert(key, function);
        Ok(self)
    }

    /// Record an opinion on whether the element with `id` is active
    pub fn set_active(&mut self, id: impl Into<String>, active: bool) -> Result<&mut Self, TokenError> {
        let id = id.into();
        self.guard(Namespace::Active, &id, self.active.contains_key(&id))?;
        self.active.insert(id, active);
        Ok(self)
    }

    /// Mark the element with `id` as inactive
    pub fn deactivate(&mut self, id: impl Into<String>) -> Result<&mut Self, TokenError> {
        self.set_active(id, false)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_class(&self, key: &str) -> Option<&str> {
        self.classes.get(key).map(String::as_str)
    }

    pub fn get_function(&self, key: &str) -> Option<&FunctionCall> {
        self.functions.get(key)
    }

    /// This source's opinion on the element, `None` when it has none
    pub fn is_active(&self, id: &str) -> Option<bool> {
        self.active.get(id).copied()
    }
}

fn flatten_into(values: &mut HashMap<String, Value>, prefix: Option<&str>, record: &Record) {
    for (key, value) in record {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        if let Value::Record(nested) = value {
            flatten_into(values, Some(&key), nested);
        }
        values.insert(key, value.clone());
    }
}
