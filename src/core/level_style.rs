//! Level interpretation styles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How message levels are compared against the threshold.
///
/// With [`LevelStyle::Levels`] a message passes when its level is no higher
/// than the threshold (`-v`, `-vv`, `-vvv` style verbosity). With
/// [`LevelStyle::Bitmask`] a message passes when its mask shares at least one
/// bit with the threshold (`-d1`, `-d8`, `-d9` style debug categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LevelStyle {
    #[default]
    #[serde(alias = "loglevels_are_numbers")]
    Levels,
    #[serde(alias = "loglevels_are_bitmasks")]
    Bitmask,
}

impl LevelStyle {
    pub fn to_str(&self) -> &'static str {
        match self {
            LevelStyle::Levels => "levels",
            LevelStyle::Bitmask => "bitmask",
        }
    }
}

impl fmt::Display for LevelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LevelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "levels" | "level" | "loglevels_are_numbers" => Ok(LevelStyle::Levels),
            "bitmask" | "bitmasks" | "mask" | "loglevels_are_bitmasks" => Ok(LevelStyle::Bitmask),
            _ => Err(format!("invalid loglevel style: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_styles() {
        assert_eq!("levels".parse::<LevelStyle>(), Ok(LevelStyle::Levels));
        assert_eq!("BITMASK".parse::<LevelStyle>(), Ok(LevelStyle::Bitmask));
        assert_eq!(
            "loglevels_are_bitmasks".parse::<LevelStyle>(),
            Ok(LevelStyle::Bitmask)
        );
        assert!("loud".parse::<LevelStyle>().is_err());
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(LevelStyle::default(), LevelStyle::Levels);
        assert_eq!(LevelStyle::Bitmask.to_string(), "bitmask");
    }

    #[test]
    fn test_serde_aliases() {
        let style: LevelStyle = serde_json::from_str("\"loglevels_are_numbers\"").unwrap();
        assert_eq!(style, LevelStyle::Levels);
        let style: LevelStyle = serde_json::from_str("\"bitmask\"").unwrap();
        assert_eq!(style, LevelStyle::Bitmask);
    }
}
