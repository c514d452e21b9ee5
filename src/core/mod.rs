//! Core logger types and traits

pub mod argument;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod labels;
pub mod level_style;
pub mod logger;
pub mod overlay;
pub mod sink;
mod sink_state;

pub use argument::{MessageArg, NO_NL};
pub use config::{LoggerConfig, LoggerOptions};
pub use dispatch::filter_level;
pub use error::{LoggerError, Result};
pub use labels::{LabelTable, Level, LevelValue};
pub use level_style::LevelStyle;
pub use logger::{Logger, LoggerBuilder};
pub use overlay::Overlay;
pub use sink::{SharedStream, SinkDescriptor, SinkHandle, SinkResolver, SpecialSink};
