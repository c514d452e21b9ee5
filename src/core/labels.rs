//! Symbolic names for levels and masks

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric level (levels style) or mask (bitmask style)
pub type Level = i64;

/// Table of label names to levels/masks.
///
/// Names are stored lower-cased, so lookups are case-insensitive. Merging a
/// label that already exists silently replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    labels: BTreeMap<String, Level>,
}

impl LabelTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge labels into the table and return the newly merged subset
    pub fn merge<I, K>(&mut self, labels: I) -> BTreeMap<String, Level>
    where
        I: IntoIterator<Item = (K, Level)>,
        K: AsRef<str>,
    {
        let merged: BTreeMap<String, Level> = labels
            .into_iter()
            .map(|(name, level)| (name.as_ref().to_lowercase(), level))
            .collect();

        for (name, level) in &merged {
            self.labels.insert(name.clone(), *level);
        }
        merged
    }

    /// Merge labels from a loosely-typed value.
    ///
    /// The value must be a JSON object whose every value is an integer;
    /// nothing is merged otherwise.
    pub fn merge_value(&mut self, value: &serde_json::Value) -> Result<BTreeMap<String, Level>> {
        let map = value.as_object().ok_or_else(|| {
            LoggerError::invalid_argument("labels", "level labels must be supplied as a map")
        })?;

        let mut parsed = Vec::with_capacity(map.len());
        for (name, level) in map {
            let level = level.as_i64().ok_or_else(|| {
                LoggerError::invalid_argument(
                    "labels",
                    format!("labeled levels must be integers (label '{}')", name),
                )
            })?;
            parsed.push((name.as_str(), level));
        }

        Ok(self.merge(parsed))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Level> {
        self.labels.get(&name.to_lowercase()).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Owned copy of the table, sorted by name
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Level> {
        self.labels.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A threshold value before coercion: a number, a label name or a numeric
/// literal in text form (`"5"`, `"0x0a"`, `"0b1010"`, `"0o12"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValue {
    Number(i64),
    Text(String),
}

impl LevelValue {
    /// Resolve to a non-negative level, substituting a matching label first
    pub fn coerce(&self, labels: &LabelTable) -> Result<Level> {
        let level = match self {
            LevelValue::Number(n) => *n,
            LevelValue::Text(text) => match labels.get(text) {
                Some(level) => level,
                None => parse_level_literal(text).ok_or_else(|| {
                    LoggerError::invalid_argument(
                        "threshold",
                        format!("loglevels are integers, got '{}'", text),
                    )
                })?,
            },
        };

        if level < 0 {
            return Err(LoggerError::invalid_argument(
                "threshold",
                format!("loglevels must not be negative, got {}", level),
            ));
        }
        Ok(level)
    }
}

fn parse_level_literal(text: &str) -> Option<Level> {
    let text = text.trim();
    let lower = text.to_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0d") {
        (rest, 10)
    } else {
        (lower.as_str(), 10)
    };
    Level::from_str_radix(digits, radix).ok()
}

impl From<i64> for LevelValue {
    fn from(value: i64) -> Self {
        LevelValue::Number(value)
    }
}

impl From<i32> for LevelValue {
    fn from(value: i32) -> Self {
        LevelValue::Number(i64::from(value))
    }
}

impl From<u32> for LevelValue {
    fn from(value: u32) -> Self {
        LevelValue::Number(i64::from(value))
    }
}

impl From<u8> for LevelValue {
    fn from(value: u8) -> Self {
        LevelValue::Number(i64::from(value))
    }
}

impl From<&str> for LevelValue {
    fn from(value: &str) -> Self {
        LevelValue::Text(value.to_string())
    }
}

impl From<String> for LevelValue {
    fn from(value: String) -> Self {
        LevelValue::Text(value)
    }
}
