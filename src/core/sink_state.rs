//! Sink lifecycle: assignment, positioning, reopen and close

use super::error::{LoggerError, Result};
use super::sink::{SharedStream, SinkDescriptor, SinkHandle, SinkResolver, SpecialSink};
use crate::sinks::FileSink;
use std::io::{self, SeekFrom};

enum ActiveHandle {
    Stream(SharedStream),
    Special(SpecialSink),
    File(FileSink),
}

/// The active sink of one logger.
///
/// Only a file opened from a path is owned; streams handed in by the caller
/// and the special standard streams are never closed here.
pub(crate) struct SinkState {
    descriptor: SinkDescriptor,
    handle: ActiveHandle,
    needs_close: bool,
    first_write: bool,
}

impl SinkState {
    pub fn special(special: SpecialSink) -> Self {
        Self {
            descriptor: SinkDescriptor::Special(special),
            handle: ActiveHandle::Special(special),
            needs_close: false,
            first_write: true,
        }
    }

    pub fn descriptor(&self) -> &SinkDescriptor {
        &self.descriptor
    }

    pub fn is_volatile(&self) -> bool {
        matches!(self.handle, ActiveHandle::Special(_))
    }

    pub fn needs_close(&self) -> bool {
        self.needs_close
    }

    /// Whether the next write must position the handle first.
    ///
    /// Always-seek only applies in append mode.
    pub fn needs_seek(&self, append: bool, seek_to_end_always: bool) -> bool {
        self.first_write || (append && seek_to_end_always)
    }

    /// Switch to a new sink, releasing a previously owned file
    ///
    /// The owned file is closed before the new sink is opened, so reassigning
    /// the same path flushes pending text before a truncating open.
    pub fn assign(&mut self, descriptor: SinkDescriptor, append: bool) -> Result<()> {
        if self.needs_close {
            self.needs_close = false;
            if let ActiveHandle::File(ref mut file) = self.handle {
                file.close()?;
                tracing::debug!(path = %file.path().display(), "closed previous sink");
            }
        }

        let handle = match &descriptor {
            SinkDescriptor::Stream(stream) => ActiveHandle::Stream(stream.clone()),
            SinkDescriptor::Special(special) => ActiveHandle::Special(*special),
            SinkDescriptor::Path(path) => ActiveHandle::File(FileSink::open(path, append)?),
        };

        self.needs_close = matches!(handle, ActiveHandle::File(_));
        self.handle = handle;
        self.descriptor = descriptor;
        self.first_write = true;
        tracing::debug!(
            sink = %self.descriptor.describe(),
            append,
            volatile = self.is_volatile(),
            "sink assigned"
        );

        self.flush(None)
    }

    /// Position (when due), write, flush and sync the active handle
    pub fn write(
        &mut self,
        text: &str,
        resolver: &dyn SinkResolver,
        append: bool,
        seek_to_end_always: bool,
    ) -> Result<()> {
        let position = if self.needs_seek(append, seek_to_end_always) {
            // Standard streams are always treated as appending
            Some(if append || self.is_volatile() {
                SeekFrom::End(0)
            } else {
                SeekFrom::Start(0)
            })
        } else {
            None
        };

        match self.handle {
            ActiveHandle::Special(special) => {
                let mut handle = resolver.resolve(special);
                emit(&mut *handle, text, position)?;
            }
            ActiveHandle::Stream(ref stream) => {
                let mut handle = stream.lock();
                if handle.is_closed() {
                    return Err(LoggerError::sink_state(handle.name(), "sink stream is closed"));
                }
                emit(&mut **handle, text, position)?;
            }
            ActiveHandle::File(ref mut file) => {
                if file.is_closed() {
                    return Err(LoggerError::sink_state(
                        file.path().display().to_string(),
                        "sink stream is closed",
                    ));
                }
                emit(file, text, position)?;
            }
        }

        self.first_write = false;
        Ok(())
    }

    /// Reopen an owned file with the current append policy.
    ///
    /// Returns `Ok(false)` for streams and special sinks.
    pub fn reopen(&mut self, append: bool) -> Result<bool> {
        match self.handle {
            ActiveHandle::Special(_) => Ok(false),
            ActiveHandle::Stream(ref stream) => {
                let handle = stream.lock();
                if handle.is_closed() {
                    return Err(LoggerError::sink_state(
                        handle.name(),
                        "sink stream is already closed",
                    ));
                }
                Ok(false)
            }
            ActiveHandle::File(ref mut file) => {
                if file.is_closed() {
                    return Err(LoggerError::sink_state(
                        file.path().display().to_string(),
                        "sink stream is already closed",
                    ));
                }
                if !self.needs_close {
                    return Ok(false);
                }
                file.reopen(append)?;
                tracing::debug!(path = %file.path().display(), append, "sink reopened");
                Ok(true)
            }
        }
    }

    /// Close an owned file.
    ///
    /// Returns `Ok(false)` for special sinks and fails for anything this
    /// logger did not open.
    pub fn close(&mut self) -> Result<bool> {
        if self.is_volatile() {
            return Ok(false);
        }
        if !self.needs_close {
            return Err(LoggerError::sink_state(
                self.descriptor.describe(),
                "unable to close a sink passed in as a stream",
            ));
        }

        self.needs_close = false;
        if let ActiveHandle::File(ref mut file) = self.handle {
            file.close()?;
            tracing::debug!(path = %file.path().display(), "sink closed");
        }
        Ok(true)
    }

    /// Flush and sync the active handle.
    ///
    /// Special sinks are only flushed when a resolver is supplied.
    pub fn flush(&mut self, resolver: Option<&dyn SinkResolver>) -> Result<()> {
        match self.handle {
            ActiveHandle::Special(special) => {
                if let Some(resolver) = resolver {
                    let mut handle = resolver.resolve(special);
                    flush_handle(&mut *handle)?;
                }
            }
            ActiveHandle::Stream(ref stream) => {
                let mut handle = stream.lock();
                if !handle.is_closed() {
                    flush_handle(&mut **handle)?;
                }
            }
            ActiveHandle::File(ref mut file) => {
                if !file.is_closed() {
                    flush_handle(file)?;
                }
            }
        }
        Ok(())
    }
}

impl Drop for SinkState {
    fn drop(&mut self) {
        if self.needs_close {
            self.needs_close = false;
            if let ActiveHandle::File(ref mut file) = self.handle {
                let _ = file.close();
            }
        }
    }
}

fn emit(handle: &mut dyn SinkHandle, text: &str, position: Option<SeekFrom>) -> Result<()> {
    if let Some(position) = position {
        // Pipes and terminals cannot be positioned
        let _ = handle.seek(position);
    }
    handle.write_all(text.as_bytes())?;
    flush_handle(handle)
}

fn flush_handle(handle: &mut dyn SinkHandle) -> Result<()> {
    handle.flush()?;
    match handle.sync() {
        Ok(()) => Ok(()),
        Err(e) if matches!(e.kind(), io::ErrorKind::InvalidInput | io::ErrorKind::Unsupported) => {
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MemorySink, StdStreams, WriterSink};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_write_positions_stream_at_end_when_appending() {
        let buffer = MemorySink::with_contents("existing\n");
        let mut state = SinkState::special(SpecialSink::Stderr);
        state
            .assign(SharedStream::new(buffer.clone()).into(), true)
            .unwrap();

        assert!(state.needs_seek(true, false));
        state.write("one\n", &StdStreams, true, false).unwrap();
        assert!(!state.needs_seek(true, false));
        state.write("two\n", &StdStreams, true, false).unwrap();

        assert_eq!(buffer.contents(), "existing\none\ntwo\n");
    }

    #[test]
    fn test_first_write_positions_stream_at_start_when_not_appending() {
        let buffer = MemorySink::with_contents("OLDOLD\n");
        let mut state = SinkState::special(SpecialSink::Stderr);
        state
            .assign(SharedStream::new(buffer.clone()).into(), false)
            .unwrap();

        state.write("new\n", &StdStreams, false, false).unwrap();
        assert_eq!(buffer.contents(), "new\nOLD\n");

        state.write("x", &StdStreams, false, false).unwrap();
        assert_eq!(buffer.contents(), "new\nxLD\n");
    }

    #[test]
    fn test_failed_assign_releases_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owned.log");
        let mut state = SinkState::special(SpecialSink::Stderr);
        state.assign(SinkDescriptor::Path(path.clone()), true).unwrap();
        state.write("kept\n", &StdStreams, true, false).unwrap();

        let missing = dir.path().join("no-such-dir").join("x.log");
        assert!(state.assign(SinkDescriptor::Path(missing), true).is_err());

        assert!(!state.needs_close());
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
        assert!(state
            .write("late\n", &StdStreams, true, false)
            .unwrap_err()
            .is_sink_state());
    }

    #[test]
    fn test_seek_failure_is_swallowed() {
        let mut state = SinkState::special(SpecialSink::Stderr);
        state
            .assign(SharedStream::new(WriterSink::new(Vec::new())).into(), true)
            .unwrap();
        assert!(state.write("piped\n", &StdStreams, true, true).is_ok());
    }

    #[test]
    fn test_always_seek_only_in_append_mode() {
        let mut state = SinkState::special(SpecialSink::Stdout);
        state.first_write = false;
        assert!(state.needs_seek(true, true));
        assert!(!state.needs_seek(false, true));
        assert!(!state.needs_seek(true, false));
    }

    #[test]
    fn test_ownership_flags() {
        let dir = TempDir::new().unwrap();
        let mut state = SinkState::special(SpecialSink::Stderr);
        assert!(state.is_volatile());
        assert!(!state.needs_close());
        assert!(!state.close().unwrap());
        assert!(!state.reopen(true).unwrap());

        state
            .assign(SinkDescriptor::Path(dir.path().join("a.log")), true)
            .unwrap();
        assert!(!state.is_volatile());
        assert!(state.needs_close());

        state
            .assign(SharedStream::new(MemorySink::new()).into(), true)
            .unwrap();
        assert!(!state.needs_close());
        assert!(state.close().unwrap_err().is_sink_state());
        assert!(!state.reopen(true).unwrap());
    }

    #[test]
    fn test_close_and_reopen_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.log");
        let mut state = SinkState::special(SpecialSink::Stderr);
        state.assign(SinkDescriptor::Path(path.clone()), true).unwrap();
        state.write("kept\n", &StdStreams, true, false).unwrap();

        assert!(state.reopen(true).unwrap());
        state.write("more\n", &StdStreams, true, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\nmore\n");

        assert!(state.close().unwrap());
        assert!(state.close().unwrap_err().is_sink_state());
        assert!(state.reopen(true).unwrap_err().is_sink_state());
        assert!(state
            .write("late\n", &StdStreams, true, false)
            .unwrap_err()
            .is_sink_state());
    }

    #[test]
    fn test_replacing_file_releases_previous() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        let mut state = SinkState::special(SpecialSink::Stderr);
        state.assign(SinkDescriptor::Path(first.clone()), true).unwrap();
        state.write("to first\n", &StdStreams, true, false).unwrap();
        state.assign(SinkDescriptor::Path(second.clone()), true).unwrap();
        state.write("to second\n", &StdStreams, true, false).unwrap();
        drop(state);

        assert_eq!(fs::read_to_string(&first).unwrap(), "to first\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "to second\n");
    }
}
