//! Standard stream sinks

use crate::core::{SinkHandle, SinkResolver, SpecialSink};
use std::io::{self, Write};

/// Writes to the process's standard output or standard error.
///
/// Neither stream is seekable, and neither is ever closed by the logger.
#[derive(Debug, Clone, Copy)]
pub struct StdStreamSink {
    stream: SpecialSink,
}

impl StdStreamSink {
    pub fn new(stream: SpecialSink) -> Self {
        Self { stream }
    }

    pub fn stdout() -> Self {
        Self::new(SpecialSink::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(SpecialSink::Stderr)
    }
}

impl SinkHandle for StdStreamSink {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream {
            SpecialSink::Stdout => io::stdout().lock().write_all(buf),
            SpecialSink::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            SpecialSink::Stdout => io::stdout().flush(),
            SpecialSink::Stderr => io::stderr().flush(),
        }
    }

    fn name(&self) -> &str {
        self.stream.to_str()
    }
}

/// Default resolver: the process's real standard streams
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStreams;

impl SinkResolver for StdStreams {
    fn resolve(&self, sink: SpecialSink) -> Box<dyn SinkHandle> {
        Box::new(StdStreamSink::new(sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::SeekFrom;

    #[test]
    fn test_resolver_names() {
        let resolver = StdStreams;
        assert_eq!(resolver.resolve(SpecialSink::Stdout).name(), "$stdout");
        assert_eq!(resolver.resolve(SpecialSink::Stderr).name(), "$stderr");
    }

    #[test]
    fn test_std_streams_do_not_seek() {
        let mut sink = StdStreamSink::stderr();
        let err = sink.seek(SeekFrom::End(0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        assert!(!sink.is_closed());
    }
}
