use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// The serialized form is the persisted wire format: `isPriority` keeps its
/// camel-case spelling so existing stored lists keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub is_priority: bool,
}

impl Item {
    pub fn new<T: Into<String>>(id: u64, text: T) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            is_priority: false,
        }
    }
}

/// The item currently targeted for an in-place text replacement, if any.
/// At most one edit is pending at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub id: u64,
    pub text: String,
}

/// What a submit did with the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new item was appended with this id.
    Added(u64),
    /// The item with this id had its text replaced.
    Updated(u64),
    /// Blank draft or vanished edit target; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("Unknown theme '{}': expected light|dark", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn item_wire_format_keeps_camel_case_priority_key() {
        let item = Item::new(3, "Buy milk");
        let encoded = serde_json::to_string(&item).expect("serialize item");
        assert_eq!(
            encoded,
            r#"{"id":3,"text":"Buy milk","completed":false,"isPriority":false}"#
        );
    }

    #[test]
    fn item_decodes_from_stored_record() {
        let decoded: Item =
            serde_json::from_str(r#"{"id":7,"text":"Ship it","completed":true,"isPriority":true}"#)
                .expect("decode item");
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.text, "Ship it");
        assert!(decoded.completed);
        assert!(decoded.is_priority);
    }

    #[test]
    fn theme_parses_stored_literals() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn theme_toggles_between_the_two_values() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
