//! Declarative element trees as they arrive on the wire

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::value::{normalize_keyword, Value};

/// A marker declared on an input element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    pub category: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

impl MarkerDescriptor {
    pub fn new(category: &str, kind: &str, text: &str) -> Self {
        Self {
            category: category.to_string(),
            kind: kind.to_string(),
            text: text.to_string(),
        }
    }
}

/// One node of a declarative tree. Nodes are not modified during resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(default, alias = "uid", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Value>,
    #[serde(default, alias = "marker", skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn with_marker(mut self, marker: MarkerDescriptor) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// The declared id, or `<anon>` for diagnostics
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<anon>")
    }
}

/// Whether placeholders are substituted during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handling {
    Static,
    Dynamic,
}

impl fmt::Display for Handling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handling::Static => write!(f, "static"),
            Handling::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl FromStr for Handling {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "static" => Ok(Handling::Static),
            "dynamic" => Ok(Handling::Dynamic),
            other => Err(ResolveError::invalid(format!(
                "handling [{}] is neither static nor dynamic",
                other
            ))),
        }
    }
}

/// The top of a declarative tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeRoot {
    #[serde(default)]
    pub handling: Option<String>,
    #[serde(default)]
    pub root: Option<ElementNode>,
}

impl TreeRoot {
    pub fn new(handling: Handling, root: ElementNode) -> Self {
        Self {
            handling: Some(handling.to_string()),
            root: Some(root),
        }
    }

    /// Parse a tree from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Check the declaration and return the handling mode with the root node
    pub fn validate(&self) -> Result<(Handling, &ElementNode), ResolveError> {
        let handling = match self.handling.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => return Err(ResolveError::invalid("handling must not be blank")),
        };
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| ResolveError::invalid("root element must not be null"))?;
        if root.kind.trim().is_empty() {
            return Err(ResolveError::invalid("root element must declare a kind"));
        }
        Ok((handling, root))
    }
}
