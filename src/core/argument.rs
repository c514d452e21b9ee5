//! Message arguments

use super::labels::Level;
use super::overlay::Overlay;

/// Symbol that suppresses the trailing newline of a report
pub const NO_NL: &str = "no_nl";

/// One positional argument to [`Logger::message`](crate::Logger::message).
///
/// Arguments of different kinds can be mixed freely in a single call; the
/// logger partitions them by kind before resolving the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
    /// A line of report text
    Text(String),
    /// A candidate level or mask; the last one in the call counts
    Level(Level),
    /// A bare symbol; only [`NO_NL`] has meaning
    Symbol(String),
    /// Label names whose values combine into the message level
    Labels(Vec<String>),
    /// Per-call option overrides
    Options(Overlay),
}

impl MessageArg {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        MessageArg::Text(text.into())
    }

    #[must_use]
    pub fn no_newline() -> Self {
        MessageArg::Symbol(NO_NL.to_string())
    }

    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        MessageArg::Symbol(name.into())
    }

    #[must_use]
    pub fn labels<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MessageArg::Labels(names.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for MessageArg {
    fn from(text: &str) -> Self {
        MessageArg::Text(text.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(text: String) -> Self {
        MessageArg::Text(text)
    }
}

impl From<&String> for MessageArg {
    fn from(text: &String) -> Self {
        MessageArg::Text(text.clone())
    }
}

impl From<i64> for MessageArg {
    fn from(level: i64) -> Self {
        MessageArg::Level(level)
    }
}

impl From<i32> for MessageArg {
    fn from(level: i32) -> Self {
        MessageArg::Level(i64::from(level))
    }
}

impl From<u32> for MessageArg {
    fn from(level: u32) -> Self {
        MessageArg::Level(i64::from(level))
    }
}

impl From<u8> for MessageArg {
    fn from(level: u8) -> Self {
        MessageArg::Level(i64::from(level))
    }
}

impl From<Overlay> for MessageArg {
    fn from(overlay: Overlay) -> Self {
        MessageArg::Options(overlay)
    }
}

impl From<Vec<&str>> for MessageArg {
    fn from(names: Vec<&str>) -> Self {
        MessageArg::labels(names)
    }
}

impl From<Vec<String>> for MessageArg {
    fn from(names: Vec<String>) -> Self {
        MessageArg::Labels(names)
    }
}

impl<const N: usize> From<[&str; N]> for MessageArg {
    fn from(names: [&str; N]) -> Self {
        MessageArg::labels(names)
    }
}
