//! Error types for tree resolution

use std::fmt;

use thiserror::Error;

use crate::token::TokenError;
use crate::tree::LoadError;
use crate::value::ValueShape;

/// Where in a resolution run an error happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Id of the engine run (nested linked trees get their own)
    pub run_id: String,
    /// Declared id of the element, `<anon>` when it has none
    pub id: String,
    /// Nesting depth below the run's root
    pub depth: usize,
    /// Ordinal of the element in visit order
    pub visit: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] uid [{}] pos [{}:{}]",
            self.run_id, self.id, self.depth, self.visit
        )
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Malformed tree declaration
    #[error("invalid tree{}: {message}", .position.as_ref().map(|p| format!(" at {}", p)).unwrap_or_default())]
    Validation {
        position: Option<Position>,
        message: String,
    },

    /// Parameter absent without a fallback, or its placeholder did not resolve
    #[error("{position}: parameter [{param}] is expected but not set{}", .placeholder.as_ref().map(|p| format!(" ([{}] did not resolve)", p)).unwrap_or_default())]
    MissingParameter {
        position: Position,
        param: String,
        placeholder: Option<String>,
    },

    /// Parameter resolved to a value of the wrong shape
    #[error("{position}: parameter [{param}] should be {expected} but is {found}")]
    TypeMismatch {
        position: Position,
        param: String,
        expected: ValueShape,
        found: String,
    },

    /// Literal string that does not parse into the expected shape
    #[error("{position}: could not read [{value}] of parameter [{param}] as {expected}")]
    MalformedLiteral {
        position: Position,
        param: String,
        value: String,
        expected: ValueShape,
    },

    /// Unknown element kind, or one not allowed under its parent
    #[error("{position}: element kind [{kind}] {reason}")]
    UnsupportedKind {
        position: Position,
        kind: String,
        reason: String,
    },

    /// A linked tree includes itself, directly or through other links
    #[error("cyclic linked tree: {}", .chain.join(" -> "))]
    CyclicLink { chain: Vec<String> },

    /// Linked trees nest deeper than the configured limit
    #[error("linked trees nest deeper than {limit}: {}", .chain.join(" -> "))]
    LinkDepth { limit: usize, chain: Vec<String> },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ResolveError {
    /// Create a root-level validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        ResolveError::Validation {
            position: None,
            message: message.into(),
        }
    }

    /// Create a validation error tied to one element
    pub fn invalid_at(position: Position, message: impl Into<String>) -> Self {
        ResolveError::Validation {
            position: Some(position),
            message: message.into(),
        }
    }

    pub fn missing(position: Position, param: &str, placeholder: Option<&str>) -> Self {
        ResolveError::MissingParameter {
            position,
            param: param.to_string(),
            placeholder: placeholder.map(str::to_string),
        }
    }

    pub fn mismatch(position: Position, param: &str, expected: ValueShape, found: &str) -> Self {
        ResolveError::TypeMismatch {
            position,
            param: param.to_string(),
            expected,
            found: found.to_string(),
        }
    }

    pub fn malformed(position: Position, param: &str, value: &str, expected: ValueShape) -> Self {
        ResolveError::MalformedLiteral {
            position,
            param: param.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    pub fn unsupported(position: Position, kind: &str, reason: impl Into<String>) -> Self {
        ResolveError::UnsupportedKind {
            position,
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }

    /// Structural errors abort the whole run instead of being replaced by a
    /// failure placeholder
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ResolveError::Validation { position: None, .. }
                | ResolveError::CyclicLink { .. }
                | ResolveError::LinkDepth { .. }
                | ResolveError::Token(_)
                | ResolveError::Load(_)
        )
    }

    /// Get the element position, if the error is tied to one
    pub fn position(&self) -> Option<&Position> {
        match self {
            ResolveError::Validation { position, .. } => position.as_ref(),
            ResolveError::MissingParameter { position, .. }
            | ResolveError::TypeMismatch { position, .. }
            | ResolveError::MalformedLiteral { position, .. }
            | ResolveError::UnsupportedKind { position, .. } => Some(position),
            _ => None,
        }
    }
}
