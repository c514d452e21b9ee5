//! Argument classification, level resolution, filtering and formatting
//!
//! Everything here is pure; the [`Logger`](crate::Logger) feeds the result
//! to its sink.

use super::argument::{MessageArg, NO_NL};
use super::labels::{LabelTable, Level};
use super::level_style::LevelStyle;
use super::overlay::Overlay;

/// Arguments of one call, partitioned by kind
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Classified {
    pub texts: Vec<String>,
    pub explicit_levels: Vec<Level>,
    pub label_values: Vec<Level>,
    pub overlay: Overlay,
    pub no_newline: bool,
}

impl Classified {
    pub fn from_args<I>(args: I, labels: &LabelTable) -> Self
    where
        I: IntoIterator<Item = MessageArg>,
    {
        let mut classified = Classified::default();
        let mut label_names: Vec<String> = Vec::new();

        for arg in args {
            match arg {
                MessageArg::Symbol(symbol) => {
                    if symbol == NO_NL {
                        classified.no_newline = true;
                    }
                }
                MessageArg::Labels(names) => label_names.extend(names),
                MessageArg::Options(overlay) => {
                    classified.overlay = std::mem::take(&mut classified.overlay).merge(overlay);
                }
                MessageArg::Level(level) => classified.explicit_levels.push(level),
                MessageArg::Text(text) => classified.texts.push(text),
            }
        }

        // Unknown names drop out; each known name counts once
        label_names.sort();
        label_names.dedup();
        classified.label_values = label_names
            .iter()
            .filter_map(|name| labels.get(name))
            .collect();

        classified
    }

    /// Level or mask the message is filed under, before filtering
    pub fn resolve_level(&self, style: LevelStyle) -> Level {
        let overlay_level = match style {
            LevelStyle::Levels => self.overlay.level.or(self.overlay.mask),
            LevelStyle::Bitmask => self.overlay.mask.or(self.overlay.level),
        };

        overlay_level
            .or_else(|| {
                if self.label_values.is_empty() {
                    return self.explicit_levels.last().copied();
                }
                match style {
                    LevelStyle::Levels => self.label_values.iter().copied().min(),
                    LevelStyle::Bitmask => Some(
                        self.label_values
                            .iter()
                            .copied()
                            .fold(0, |acc, value| acc | value),
                    ),
                }
            })
            .unwrap_or(0)
    }

    /// Report text with every line prefixed and the trailing newline applied
    pub fn format(&self, default_prefix: &str) -> String {
        let prefix = self.overlay.prefix.as_deref().unwrap_or(default_prefix);

        let mut text = String::from(prefix);
        text.push_str(&self.texts.join(&format!("\n{}", prefix)));

        let newline = self.overlay.newline_choice().unwrap_or(!self.no_newline);
        if newline {
            text.push('\n');
        }
        text
    }
}

/// Apply the threshold to a resolved level.
///
/// Returns the level that fired: the level itself for the levels style, the
/// intersection with the threshold for the bitmask style. Level 0 always
/// fires.
#[must_use]
pub fn filter_level(level: Level, threshold: Level, style: LevelStyle) -> Option<Level> {
    if level == 0 {
        return Some(0);
    }
    match style {
        LevelStyle::Levels => (threshold >= level).then_some(level),
        LevelStyle::Bitmask => {
            let fired = level & threshold;
            (fired != 0).then_some(fired)
        }
    }
}

/// A message that passed the filter, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedDispatch {
    pub level: Level,
    pub text: String,
    pub seek_to_end_always: Option<bool>,
}

impl ResolvedDispatch {
    /// Classify, resolve and filter; `None` when the message is suppressed
    pub fn resolve<I>(
        args: I,
        labels: &LabelTable,
        style: LevelStyle,
        threshold: Level,
        prefix: &str,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = MessageArg>,
    {
        let classified = Classified::from_args(args, labels);
        let level = filter_level(classified.resolve_level(style), threshold, style)?;

        Some(Self {
            level,
            text: classified.format(prefix),
            seek_to_end_always: classified.overlay.seek_to_end_always,
        })
    }
}
