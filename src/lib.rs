//! # Verbosity Logger
//!
//! A deliberately small status reporter for command-line tools and
//! applications: messages carry a verbosity level or a category bitmask, are
//! filtered against one threshold, get a line prefix and go to a single sink.
//!
//! ## Features
//!
//! - **Two filtering styles**: ascending levels (`-v`, `-vv`, `-vvv`) or
//!   bitmasks (`-d1`, `-d8`, `-d9`)
//! - **Labels**: symbolic names for levels, usable as shortcuts
//! - **Managed sinks**: files opened in append or truncate mode, caller-owned
//!   streams, or standard streams looked up on every write
//! - **Flexible calls**: text, levels, labels and per-call overrides mixed in
//!   one argument list
//!
//! It is not a logging framework: there are no timestamps, structured
//! fields, rotation or fan-out to several destinations.

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LabelTable, Level, LevelStyle, LevelValue, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerOptions, MessageArg, Overlay, Result, SharedStream, SinkDescriptor,
        SinkHandle, SinkResolver, SpecialSink, NO_NL,
    };
    pub use crate::sinks::{FileSink, MemorySink, StdStreamSink, StdStreams, WriterSink};
    pub use crate::{report, report_label};
}

pub use crate::core::{
    filter_level, LabelTable, Level, LevelStyle, LevelValue, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerOptions, MessageArg, Overlay, Result, SharedStream, SinkDescriptor,
    SinkHandle, SinkResolver, SpecialSink, NO_NL,
};
pub use sinks::{FileSink, MemorySink, StdStreamSink, StdStreams, WriterSink};
