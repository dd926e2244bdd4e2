//! The resolved UI tree
//!
//! Every visited element resolves to exactly one [`ResolvedNode`]: a typed
//! container or input, an inert [`ResolvedNode::Empty`] for gated elements, or
//! a [`ResolvedNode::Failure`] standing in for an element that could not be
//! built. The tree serializes to JSON for the external renderer.

pub mod container;
pub mod input;
mod marker;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::token::FunctionCall;
use crate::value::{keyword_value, normalize_keyword, FromValue, Value, ValueShape};

pub use container::Container;
pub use input::{Input, InputOption};
pub use marker::{Marker, MarkerCategory, MarkerType};

/// One node of the resolved tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ResolvedNode {
    Container(Container),
    Input(Input),
    /// Gated or explicitly empty element
    Empty,
    /// Placeholder for an element whose resolution failed
    Failure(Failure),
}

impl ResolvedNode {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResolvedNode::Empty)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ResolvedNode::Failure(_))
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            ResolvedNode::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&Input> {
        match self {
            ResolvedNode::Input(i) => Some(i),
            _ => None,
        }
    }

    /// The resolved id, if the node has one
    pub fn id(&self) -> Option<&str> {
        match self {
            ResolvedNode::Container(c) => Some(&c.common().id),
            ResolvedNode::Input(i) => Some(&i.base().common.id),
            ResolvedNode::Empty | ResolvedNode::Failure(_) => None,
        }
    }

    /// Direct children, for walking the tree
    pub fn children(&self) -> Vec<&ResolvedNode> {
        match self {
            ResolvedNode::Container(c) => c.children(),
            _ => Vec::new(),
        }
    }
}

/// Fields shared by every container and input
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Common {
    pub id: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
}

/// Inert stand-in for an element that failed to resolve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub run_id: String,
    pub classes: Vec<String>,
    pub message: String,
}

impl Failure {
    pub fn new(run_id: &str, classes: Vec<String>) -> Self {
        Self {
            run_id: run_id.to_string(),
            classes,
            message: format!(
                "the creation of this element failed. please refer to the server log. run id: [{}]",
                run_id
            ),
        }
    }
}

/// What happens when the user triggers an element
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    #[default]
    None,
    /// Raw client-side script
    Script(String),
    /// A function reference
    Call(FunctionCall),
}

impl Action {
    pub fn to_js(&self) -> String {
        match self {
            Action::None => String::new(),
            Action::Script(script) => script.clone(),
            Action::Call(call) => call.to_js(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

impl From<FunctionCall> for Action {
    fn from(call: FunctionCall) -> Self {
        Action::Call(call)
    }
}

impl FromValue for Action {
    const SHAPE: ValueShape = ValueShape::Function;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().and_then(Self::from_literal)
    }

    fn from_literal(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            Some(Action::None)
        } else {
            Some(Action::Script(raw.to_string()))
        }
    }

    fn from_function(call: &FunctionCall) -> Option<Self> {
        Some(Action::Call(call.clone()))
    }
}

/// Error for keywords outside a closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword(pub String);

impl fmt::Display for UnknownKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyword [{}]", self.0)
    }
}

impl std::error::Error for UnknownKeyword {}

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonClass {
    #[default]
    Default,
    Success,
}

impl FromStr for ButtonClass {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "default" => Ok(ButtonClass::Default),
            "success" => Ok(ButtonClass::Success),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

/// Flow direction of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Horizontal,
    Vertical,
    HorizontalReverse,
    VerticalReverse,
}

impl FromStr for Direction {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "none" => Ok(Direction::None),
            "horizontal" => Ok(Direction::Horizontal),
            "vertical" => Ok(Direction::Vertical),
            "horizontal_reverse" => Ok(Direction::HorizontalReverse),
            "vertical_reverse" => Ok(Direction::VerticalReverse),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

keyword_value!(ButtonClass, Direction);
