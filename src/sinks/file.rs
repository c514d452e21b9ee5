//! File sink implementation

use crate::core::{LoggerError, Result, SinkHandle};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file opened and owned by the logger.
///
/// In append mode every write lands at the end of the file; otherwise the
/// file is truncated when opened and written from the start.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn open(path: impl Into<PathBuf>, append: bool) -> Result<Self> {
        let path = path.into();
        let file = Self::open_file(&path, append)?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    fn open_file(path: &Path, append: bool) -> Result<File> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        options.open(path).map_err(|e| {
            LoggerError::io_operation(
                "opening sink",
                format!("cannot open '{}'", path.display()),
                e,
            )
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the path again with the given append policy, replacing the
    /// current file handle
    pub fn reopen(&mut self, append: bool) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        let file = Self::open_file(&self.path, append)?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    /// Flush and release the file handle
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "closing sink",
                    format!("cannot flush '{}'", self.path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "file sink is closed")
        })
    }
}

impl SinkHandle for FileSink {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer {
            Some(ref mut writer) => writer.flush(),
            None => Ok(()),
        }
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.writer()?.seek(pos)
    }

    fn sync(&mut self) -> io::Result<()> {
        match self.writer {
            Some(ref mut writer) => {
                writer.flush()?;
                writer.get_ref().sync_all()
            }
            None => Ok(()),
        }
    }

    fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the file
        let _ = SinkHandle::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_and_append_modes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sink.log");
        fs::write(&path, "old\n").unwrap();

        let mut sink = FileSink::open(&path, true).unwrap();
        sink.write_all(b"new\n").unwrap();
        SinkHandle::flush(&mut sink).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");

        let mut sink = FileSink::open(&path, false).unwrap();
        sink.write_all(b"fresh\n").unwrap();
        SinkHandle::flush(&mut sink).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_close_then_write_fails() {
        let dir = TempDir::new().unwrap();
        let mut sink = FileSink::open(dir.path().join("closed.log"), true).unwrap();

        sink.close().unwrap();
        assert!(sink.is_closed());
        assert!(sink.write_all(b"late\n").is_err());
        assert!(sink.close().is_ok());
    }

    #[test]
    fn test_reopen_truncates_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reopen.log");

        let mut sink = FileSink::open(&path, true).unwrap();
        sink.write_all(b"first\n").unwrap();
        sink.reopen(false).unwrap();
        sink.write_all(b"second\n").unwrap();
        SinkHandle::flush(&mut sink).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = FileSink::open(dir.path().join("missing").join("x.log"), true);
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
    }
}
