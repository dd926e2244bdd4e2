//! The placeholder sub-language: `$$<form>$<key>`

use std::fmt;

/// Marks a parameter value as a placeholder
pub const SENTINEL: &str = "$$";

/// A parsed placeholder. The four forms resolve against disjoint sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// Token source value namespace
    Value(&'a str),
    /// Translation source, keyed by the active locale
    Text(&'a str),
    /// Token source class namespace; a miss yields an empty string
    Class(&'a str),
    /// Token source function namespace
    Function(&'a str),
}

impl<'a> Placeholder<'a> {
    /// Parse `raw`. Strings without the sentinel or with an unknown form are
    /// plain literals and yield `None`.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let rest = raw.strip_prefix(SENTINEL)?;
        let (form, key) = rest.split_once('$')?;
        match form {
            "value" => Some(Placeholder::Value(key)),
            "text" => Some(Placeholder::Text(key)),
            "class" => Some(Placeholder::Class(key)),
            "function" => Some(Placeholder::Function(key)),
            _ => None,
        }
    }

    pub fn key(&self) -> &'a str {
        match self {
            Placeholder::Value(key)
            | Placeholder::Text(key)
            | Placeholder::Class(key)
            | Placeholder::Function(key) => key,
        }
    }

    pub fn form(&self) -> &'static str {
        match self {
            Placeholder::Value(_) => "value",
            Placeholder::Text(_) => "text",
            Placeholder::Class(_) => "class",
            Placeholder::Function(_) => "function",
        }
    }
}

impl fmt::Display for Placeholder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}${}", SENTINEL, self.form(), self.key())
    }
}
