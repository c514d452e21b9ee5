//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;
pub mod writer;

pub use console::{StdStreamSink, StdStreams};
pub use file::FileSink;
pub use memory::MemorySink;
pub use writer::WriterSink;

pub use crate::core::{SinkHandle, SinkResolver};
