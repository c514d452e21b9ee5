//! Adapter for arbitrary writers

use crate::core::SinkHandle;
use std::io::{self, Write};

/// Wraps any [`Write`] value as a non-seekable sink (pipes, sockets,
/// child-process stdin, plain byte vectors).
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> SinkHandle for WriterSink<W> {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::SeekFrom;

    #[test]
    fn test_writes_pass_through() {
        let mut sink = WriterSink::named(Vec::new(), "pipe");
        sink.write_all(b"line\n").unwrap();
        assert_eq!(sink.name(), "pipe");
        assert!(sink.seek(SeekFrom::Start(0)).is_err());
        assert_eq!(sink.into_inner(), b"line\n");
    }
}
