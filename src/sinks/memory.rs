//! In-memory sink

use crate::core::SinkHandle;
use parking_lot::Mutex;
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::sync::Arc;

/// A seekable in-memory buffer.
///
/// Clones share the same buffer, so one clone can be handed to a logger
/// while another reads back what was written.
///
/// # Example
///
/// ```
/// use verbosity_logger::{Logger, MemorySink, SharedStream};
///
/// let buffer = MemorySink::new();
/// let mut logger = Logger::builder()
///     .sink(SharedStream::new(buffer.clone()))
///     .build()
///     .unwrap();
///
/// logger.message(vec!["hello"]).unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Cursor<Vec<u8>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing content, positioned at the beginning
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Cursor::new(contents.into()))),
        }
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(self.buffer.lock().get_ref()).into_owned()
    }

    pub fn position(&self) -> u64 {
        self.buffer.lock().position()
    }

    pub fn clear(&self) {
        let mut buffer = self.buffer.lock();
        buffer.get_mut().clear();
        buffer.set_position(0);
    }
}

impl SinkHandle for MemorySink {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buffer.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.buffer.lock().seek(pos)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
