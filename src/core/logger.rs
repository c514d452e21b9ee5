//! Main logger implementation

use super::{
    argument::MessageArg,
    config::{LoggerConfig, LoggerOptions},
    dispatch::ResolvedDispatch,
    error::{LoggerError, Result},
    labels::{LabelTable, Level, LevelValue},
    level_style::LevelStyle,
    overlay::Overlay,
    sink::{SinkDescriptor, SinkResolver, SpecialSink},
    sink_state::SinkState,
};
use crate::sinks::StdStreams;
use std::collections::BTreeMap;
use std::fmt;
use std::iter;
use std::sync::Arc;

/// A status reporter with a threshold, a line prefix and one sink.
///
/// Messages are submitted through [`Logger::message`] as a list of mixed
/// arguments (see [`MessageArg`]). A message is written when its level
/// passes the threshold; level 0 is always written.
///
/// # Example
///
/// ```
/// use verbosity_logger::{Logger, MemorySink, SharedStream};
///
/// let out = MemorySink::new();
/// let mut logger = Logger::builder()
///     .threshold(3)
///     .sink(SharedStream::new(out.clone()))
///     .build()
///     .unwrap();
///
/// assert_eq!(verbosity_logger::report!(logger, 5, "hidden").unwrap(), None);
/// assert_eq!(verbosity_logger::report!(logger, 2, "shown").unwrap(), Some(2));
/// assert_eq!(out.contents(), "shown\n");
/// ```
pub struct Logger {
    threshold: Level,
    level_style: LevelStyle,
    prefix: String,
    append: bool,
    seek_to_end_always: bool,
    labels: LabelTable,
    sink: SinkState,
    resolver: Arc<dyn SinkResolver>,
}

impl Logger {
    /// Logger with default settings, reporting to standard error
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: 0,
            level_style: LevelStyle::Levels,
            prefix: String::new(),
            append: true,
            seek_to_end_always: false,
            labels: LabelTable::new(),
            sink: SinkState::special(SpecialSink::Stderr),
            resolver: Arc::new(StdStreams),
        }
    }

    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Submit a message.
    ///
    /// Returns the level that fired, or `None` when the message was
    /// filtered out. In the bitmask style the fired value is the
    /// intersection of the message mask and the threshold.
    pub fn message<I, A>(&mut self, args: I) -> Result<Option<Level>>
    where
        I: IntoIterator<Item = A>,
        A: Into<MessageArg>,
    {
        let Some(resolved) = ResolvedDispatch::resolve(
            args.into_iter().map(Into::into),
            &self.labels,
            self.level_style,
            self.threshold,
            &self.prefix,
        ) else {
            return Ok(None);
        };

        let seek_to_end_always = resolved
            .seek_to_end_always
            .unwrap_or(self.seek_to_end_always);
        self.sink.write(
            &resolved.text,
            self.resolver.as_ref(),
            self.append,
            seek_to_end_always,
        )?;
        Ok(Some(resolved.level))
    }

    /// Submit a message under a label's level or mask.
    ///
    /// The label's value overrides any level given in `args`.
    pub fn invoke_label<I, A>(&mut self, label: &str, args: I) -> Result<Option<Level>>
    where
        I: IntoIterator<Item = A>,
        A: Into<MessageArg>,
    {
        let level = self.labels.get(label).ok_or_else(|| {
            LoggerError::invalid_argument("label", format!("no level is labeled '{}'", label))
        })?;
        let overlay = match self.level_style {
            LevelStyle::Levels => Overlay::new().level(level),
            LevelStyle::Bitmask => Overlay::new().mask(level),
        };

        let args: Vec<MessageArg> = args
            .into_iter()
            .map(Into::into)
            .chain(iter::once(MessageArg::Options(overlay)))
            .collect();
        self.message(args)
    }

    /// Name levels or masks; returns the labels merged by this call
    pub fn label_levels<I, K>(&mut self, labels: I) -> BTreeMap<String, Level>
    where
        I: IntoIterator<Item = (K, Level)>,
        K: AsRef<str>,
    {
        self.labels.merge(labels)
    }

    /// Name levels or masks from a JSON object of integers
    pub fn label_levels_from_value(
        &mut self,
        labels: &serde_json::Value,
    ) -> Result<BTreeMap<String, Level>> {
        self.labels.merge_value(labels)
    }

    /// Snapshot of all labels, sorted by name
    #[must_use]
    pub fn labeled_levels(&self) -> BTreeMap<String, Level> {
        self.labels.snapshot()
    }

    #[must_use]
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Set the threshold from a number, numeric text or a label name
    pub fn set_threshold(&mut self, value: impl Into<LevelValue>) -> Result<Level> {
        self.threshold = value.into().coerce(&self.labels)?;
        Ok(self.threshold)
    }

    #[inline]
    #[must_use]
    pub fn logmask(&self) -> Level {
        self.threshold
    }

    #[inline]
    pub fn set_logmask(&mut self, value: impl Into<LevelValue>) -> Result<Level> {
        self.set_threshold(value)
    }

    #[must_use]
    pub fn level_style(&self) -> LevelStyle {
        self.level_style
    }

    pub fn set_level_style(&mut self, style: LevelStyle) {
        self.level_style = style;
    }

    /// Set the level style by name (`levels` or `bitmask`)
    pub fn set_level_style_named(&mut self, style: &str) -> Result<LevelStyle> {
        self.level_style = style
            .parse()
            .map_err(|e: String| LoggerError::invalid_argument("level_style", e))?;
        Ok(self.level_style)
    }

    #[must_use]
    pub fn log_levels(&self) -> bool {
        self.level_style == LevelStyle::Levels
    }

    #[must_use]
    pub fn log_masks(&self) -> bool {
        self.level_style == LevelStyle::Bitmask
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl fmt::Display) {
        self.prefix = prefix.to_string();
    }

    /// Whether files opened from now on are appended to rather than
    /// truncated
    #[must_use]
    pub fn append(&self) -> bool {
        self.append
    }

    pub fn set_append(&mut self, append: bool) {
        self.append = append;
    }

    #[must_use]
    pub fn seek_to_end_always(&self) -> bool {
        self.seek_to_end_always
    }

    pub fn set_seek_to_end_always(&mut self, seek: bool) {
        self.seek_to_end_always = seek;
    }

    #[must_use]
    pub fn sink(&self) -> &SinkDescriptor {
        self.sink.descriptor()
    }

    /// Switch sinks.
    ///
    /// A path is opened immediately, appending or truncating according to
    /// [`Logger::append`]; a file this logger opened earlier is closed
    /// first.
    pub fn set_sink(&mut self, sink: impl Into<SinkDescriptor>) -> Result<()> {
        self.sink.assign(sink.into(), self.append)
    }

    /// True while the sink is a file this logger opened and has not closed
    #[must_use]
    pub fn owns_sink(&self) -> bool {
        self.sink.needs_close()
    }

    /// True when the sink is a special stream looked up on every write
    #[must_use]
    pub fn sink_is_volatile(&self) -> bool {
        self.sink.is_volatile()
    }

    /// Replace the resolver that supplies handles for special sinks
    pub fn set_sink_resolver(&mut self, resolver: Arc<dyn SinkResolver>) {
        self.resolver = resolver;
    }

    /// Reopen an owned file sink with the current append policy.
    ///
    /// Returns `false` for stream and special sinks.
    pub fn reopen(&mut self) -> Result<bool> {
        self.sink.flush(None)?;
        self.sink.reopen(self.append)
    }

    /// Close an owned file sink.
    ///
    /// Returns `false` for special sinks and fails for a stream handed in
    /// by the caller.
    pub fn close(&mut self) -> Result<bool> {
        self.sink.close()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush(Some(self.resolver.as_ref()))
    }

    #[must_use]
    pub fn options(&self) -> LoggerOptions {
        LoggerOptions {
            append: self.append,
            level_style: self.level_style,
            threshold: self.threshold,
            prefix: self.prefix.clone(),
            seek_to_end_always: self.seek_to_end_always,
            sink: self.sink.descriptor().describe(),
            labels: self.labels.snapshot(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("level_style", &self.level_style)
            .field("prefix", &self.prefix)
            .field("append", &self.append)
            .field("seek_to_end_always", &self.seek_to_end_always)
            .field("labels", &self.labels)
            .field("sink", self.sink.descriptor())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use verbosity_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level_style(LevelStyle::Bitmask)
///     .labels([("net", 0b01), ("disk", 0b10)])
///     .threshold_named("net")
///     .prefix("debug: ")
///     .sink(SpecialSink::Stdout)
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.threshold(), 0b01);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    named_threshold: Option<String>,
    resolver: Option<Arc<dyn SinkResolver>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            named_threshold: None,
            resolver: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn append(mut self, append: bool) -> Self {
        self.config.append = append;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_style(mut self, style: LevelStyle) -> Self {
        self.config.level_style = style;
        self
    }

    /// Set the threshold for either style
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, threshold: Level) -> Self {
        self.config.loglevel = Some(threshold);
        self.config.logmask = Some(threshold);
        self.named_threshold = None;
        self
    }

    /// Set the threshold from a label name or numeric text, resolved at
    /// build time after labels are registered
    #[must_use = "builder methods return a new value"]
    pub fn threshold_named(mut self, threshold: impl Into<String>) -> Self {
        self.named_threshold = Some(threshold.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn seek_to_end_always(mut self, seek: bool) -> Self {
        self.config.seek_to_end_always = seek;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: impl Into<SinkDescriptor>) -> Self {
        self.config.sink = sink.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn label(mut self, name: impl AsRef<str>, level: Level) -> Self {
        self.config
            .labels
            .insert(name.as_ref().to_lowercase(), level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn labels<I, K>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, Level)>,
        K: AsRef<str>,
    {
        for (name, level) in labels {
            self = self.label(name, level);
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn resolver(mut self, resolver: Arc<dyn SinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Build the Logger, opening the sink
    pub fn build(self) -> Result<Logger> {
        let LoggerBuilder {
            config,
            named_threshold,
            resolver,
        } = self;

        let mut logger = Logger::new();
        if let Some(resolver) = resolver {
            logger.set_sink_resolver(resolver);
        }

        logger.set_append(config.append);
        logger.set_level_style(config.level_style);
        logger.label_levels(config.labels.iter().map(|(name, level)| (name, *level)));
        match named_threshold {
            Some(name) => logger.set_threshold(name)?,
            None => logger.set_threshold(config.threshold())?,
        };
        logger.set_prefix(&config.prefix);
        logger.set_seek_to_end_always(config.seek_to_end_always);
        logger.set_sink(config.sink)?;

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
