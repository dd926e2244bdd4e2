//! Validation-state markers attached to inputs

use std::str::FromStr;

use serde::Serialize;

use super::UnknownKeyword;
use crate::value::normalize_keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Warning,
    Error,
    Modal,
}

impl FromStr for MarkerCategory {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "warning" => Ok(MarkerCategory::Warning),
            "error" => Ok(MarkerCategory::Error),
            "modal" => Ok(MarkerCategory::Modal),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    NoValue,
    Empty,
    Invalid,
    OutOfRange,
    TooLong,
    TooShort,
    Incomplete,
    NotParsable,
    Custom,
}

impl FromStr for MarkerType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_keyword(s).as_str() {
            "no_value" => Ok(MarkerType::NoValue),
            "empty" => Ok(MarkerType::Empty),
            "invalid" => Ok(MarkerType::Invalid),
            "out_of_range" => Ok(MarkerType::OutOfRange),
            "too_long" => Ok(MarkerType::TooLong),
            "too_short" => Ok(MarkerType::TooShort),
            "incomplete" => Ok(MarkerType::Incomplete),
            "not_parsable" => Ok(MarkerType::NotParsable),
            "custom" => Ok(MarkerType::Custom),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

/// A resolved marker; `owner_id` is the resolved id of the input carrying it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub owner_id: String,
    pub category: MarkerCategory,
    #[serde(rename = "type")]
    pub kind: MarkerType,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("ERROR".parse::<MarkerCategory>(), Ok(MarkerCategory::Error));
        assert!("fatal".parse::<MarkerCategory>().is_err());
    }

    #[test]
    fn test_parse_type_variants() {
        assert_eq!("OUT_OF_RANGE".parse::<MarkerType>(), Ok(MarkerType::OutOfRange));
        assert_eq!("not-parsable".parse::<MarkerType>(), Ok(MarkerType::NotParsable));
    }
}
