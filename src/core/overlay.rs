//! Per-call option overlays

use super::labels::Level;
use serde::{Deserialize, Serialize};

/// Options that override instance settings for a single message.
///
/// Several overlays in one call are merged left to right, later values
/// winning on collision.
///
/// # Example
///
/// ```
/// use verbosity_logger::Overlay;
///
/// let overlay = Overlay::new().prefix("[net] ").level(2);
/// let merged = overlay.merge(Overlay::new().level(3));
/// assert_eq!(merged.level, Some(3));
/// assert_eq!(merged.prefix.as_deref(), Some("[net] "));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overlay {
    pub prefix: Option<String>,
    pub level: Option<Level>,
    pub mask: Option<Level>,
    pub newline: Option<bool>,
    /// Deprecated alias of `newline`, consulted only when `newline` is unset
    #[serde(rename = "return")]
    pub return_: Option<bool>,
    #[serde(alias = "seek_to_eof")]
    pub seek_to_end_always: Option<bool>,
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mask(mut self, mask: Level) -> Self {
        self.mask = Some(mask);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn newline(mut self, newline: bool) -> Self {
        self.newline = Some(newline);
        self
    }

    #[deprecated(since = "0.1.0", note = "Use newline() instead")]
    #[must_use = "builder methods return a new value"]
    pub fn return_(mut self, newline: bool) -> Self {
        self.return_ = Some(newline);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn seek_to_end_always(mut self, seek: bool) -> Self {
        self.seek_to_end_always = Some(seek);
        self
    }

    /// Merge `later` on top of `self`
    #[must_use]
    pub fn merge(self, later: Overlay) -> Overlay {
        Overlay {
            prefix: later.prefix.or(self.prefix),
            level: later.level.or(self.level),
            mask: later.mask.or(self.mask),
            newline: later.newline.or(self.newline),
            return_: later.return_.or(self.return_),
            seek_to_end_always: later.seek_to_end_always.or(self.seek_to_end_always),
        }
    }

    /// Explicit trailing-newline choice, with `return` standing in for a
    /// missing `newline`
    #[must_use]
    pub fn newline_choice(&self) -> Option<bool> {
        self.newline.or(self.return_)
    }
}
