//! Client-side function references
//!
//! Functions are named calls that the client executes. Token sources can hand
//! them out through `$$function$key` placeholders, and some builders register
//! functions the client must run once after rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single literal argument of a function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionArg {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Boolean(b) => write!(f, "{}", b),
            FunctionArg::Integer(i) => write!(f, "{}", i),
            FunctionArg::Float(x) => write!(f, "{}", x),
            FunctionArg::Text(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }
}

impl From<&str> for FunctionArg {
    fn from(value: &str) -> Self {
        FunctionArg::Text(value.to_string())
    }
}

impl From<String> for FunctionArg {
    fn from(value: String) -> Self {
        FunctionArg::Text(value)
    }
}

impl From<bool> for FunctionArg {
    fn from(value: bool) -> Self {
        FunctionArg::Boolean(value)
    }
}

impl From<i64> for FunctionArg {
    fn from(value: i64) -> Self {
        FunctionArg::Integer(value)
    }
}

impl From<f64> for FunctionArg {
    fn from(value: f64) -> Self {
        FunctionArg::Float(value)
    }
}

/// A named call with literal arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(alias = "call")]
    pub name: String,
    #[serde(default)]
    pub args: Vec<FunctionArg>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<FunctionArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Render as a client-side invocation, e.g. `saveForm('user', 3);`
    pub fn to_js(&self) -> String {
        let args = self
            .args
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({});", self.name, args)
    }

    /// Close the modal the triggering element lives in
    pub fn close_modal() -> Self {
        Self::new("closeModal")
    }

    /// Submit the form inside the surrounding modal
    pub fn submit_from_modal() -> Self {
        Self::new("submitFromModal")
    }

    /// Wire up a tag input after rendering
    pub fn register_tag_input(
        id: &str,
        fetch_url: &str,
        search_url: &str,
        enforce_whitelist: bool,
        max_tags: i64,
    ) -> Self {
        Self::new("registerTagInput")
            .arg(id)
            .arg(fetch_url)
            .arg(search_url)
            .arg(enforce_whitelist)
            .arg(max_tags)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js())
    }
}
