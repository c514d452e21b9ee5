//! Construction options

use super::error::{LoggerError, Result};
use super::labels::Level;
use super::level_style::LevelStyle;
use super::sink::SinkDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Option bag consumed when a [`Logger`](crate::Logger) is built.
///
/// Unrecognised keys are ignored when deserializing. Flags accept any
/// scalar (only `null` and `false` are off) and the prefix accepts any
/// value, rendered as text.
///
/// # Example
///
/// ```
/// use verbosity_logger::{LevelStyle, LoggerConfig};
///
/// let config = LoggerConfig::from_json(
///     r#"{"level_style": "bitmask", "logmask": 10, "loglevel": 1, "sink": "$stdout"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.level_style, LevelStyle::Bitmask);
/// assert_eq!(config.threshold(), 10);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    #[serde(deserialize_with = "truthy")]
    pub append: bool,
    pub level_style: LevelStyle,
    pub loglevel: Option<Level>,
    pub logmask: Option<Level>,
    #[serde(deserialize_with = "stringify")]
    pub prefix: String,
    #[serde(alias = "seek_to_eof", deserialize_with = "truthy")]
    pub seek_to_end_always: bool,
    pub sink: SinkDescriptor,
    pub labels: BTreeMap<String, Level>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            append: true,
            level_style: LevelStyle::Levels,
            loglevel: None,
            logmask: None,
            prefix: String::new(),
            seek_to_end_always: false,
            sink: SinkDescriptor::default(),
            labels: BTreeMap::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(LoggerError::invalid_argument(
                "LoggerConfig",
                "configuration must be a map of options",
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| LoggerError::invalid_argument("LoggerConfig", e.to_string()))
    }

    /// Effective threshold: `logmask` wins over `loglevel` only in the
    /// bitmask style
    #[must_use]
    pub fn threshold(&self) -> Level {
        let preferred = match self.level_style {
            LevelStyle::Bitmask => self.logmask.or(self.loglevel),
            LevelStyle::Levels => self.loglevel,
        };
        preferred.unwrap_or(0)
    }
}

fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(!matches!(value, Value::Null | Value::Bool(false)))
}

fn stringify<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

/// Read-only view of a logger's settings, without its handles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerOptions {
    pub append: bool,
    pub level_style: LevelStyle,
    pub threshold: Level,
    pub prefix: String,
    pub seek_to_end_always: bool,
    pub sink: String,
    pub labels: BTreeMap<String, Level>,
}
