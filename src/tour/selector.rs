//! Target selector grammar for addressing on-screen elements.
//!
//! Tours address their targets the way the screens register them: by id
//! (`#demographics`), by class (`.btn-cancel`), by attribute
//! (`[data-action="add-patient"]`), or by bare element name.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// A parsed target selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `#name`
    Id(String),
    /// `.name`
    Class(String),
    /// `[key="value"]`
    Attribute { key: String, value: String },
    /// Bare element name
    Element(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorParseError {
    #[error("empty selector")]
    Empty,
    #[error("malformed attribute selector: {0}")]
    MalformedAttribute(String),
}

impl FromStr for Selector {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SelectorParseError::Empty);
        }

        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() {
                return Err(SelectorParseError::Empty);
            }
            return Ok(Selector::Id(id.to_string()));
        }

        if let Some(class) = s.strip_prefix('.') {
            if class.is_empty() {
                return Err(SelectorParseError::Empty);
            }
            return Ok(Selector::Class(class.to_string()));
        }

        if s.starts_with('[') {
            let inner = s
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .ok_or_else(|| SelectorParseError::MalformedAttribute(s.to_string()))?;
            let (key, value) = inner
                .split_once('=')
                .ok_or_else(|| SelectorParseError::MalformedAttribute(s.to_string()))?;
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .ok_or_else(|| SelectorParseError::MalformedAttribute(s.to_string()))?;
            if key.is_empty() || value.is_empty() {
                return Err(SelectorParseError::MalformedAttribute(s.to_string()));
            }
            return Ok(Selector::Attribute {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        Ok(Selector::Element(s.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Attribute { key, value } => write!(f, "[{key}=\"{value}\"]"),
            Selector::Element(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_selector() {
        assert_eq!(
            "#demographics".parse::<Selector>(),
            Ok(Selector::Id("demographics".to_string()))
        );
    }

    #[test]
    fn test_parse_class_selector() {
        assert_eq!(
            ".btn-cancel".parse::<Selector>(),
            Ok(Selector::Class("btn-cancel".to_string()))
        );
    }

    #[test]
    fn test_parse_attribute_selector() {
        assert_eq!(
            "[data-action=\"add-patient\"]".parse::<Selector>(),
            Ok(Selector::Attribute {
                key: "data-action".to_string(),
                value: "add-patient".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_element_selector() {
        assert_eq!(
            "button".parse::<Selector>(),
            Ok(Selector::Element("button".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!("".parse::<Selector>(), Err(SelectorParseError::Empty));
        assert_eq!("#".parse::<Selector>(), Err(SelectorParseError::Empty));
        assert_eq!(".".parse::<Selector>(), Err(SelectorParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_malformed_attribute() {
        for bad in ["[data-action]", "[key=value]", "[=\"v\"]", "[key=\"\"]"] {
            assert!(matches!(
                bad.parse::<Selector>(),
                Err(SelectorParseError::MalformedAttribute(_))
            ));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for raw in [
            "#demographics",
            ".btn-cancel",
            "[data-action=\"add-patient\"]",
            "button",
        ] {
            let parsed: Selector = raw.parse().unwrap();
            assert_eq!(parsed.to_string(), raw);
        }
    }
}
