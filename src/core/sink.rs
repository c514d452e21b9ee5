//! Sink handles and sink descriptors

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// A writable destination for report text.
///
/// Only writing and flushing are required. Handles that cannot be
/// positioned (pipes, terminals) keep the default `seek`, and handles with
/// no durable storage keep the default `sync`.
pub trait SinkHandle: Send {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("sink '{}' is not seekable", self.name()),
        ))
    }

    /// Push buffered data through to durable storage
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}

/// A stream handle shared between the caller and a logger.
///
/// The logger never closes a shared stream; its owner does.
#[derive(Clone)]
pub struct SharedStream {
    inner: Arc<Mutex<Box<dyn SinkHandle>>>,
}

impl SharedStream {
    pub fn new<H: SinkHandle + 'static>(handle: H) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(handle))),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Box<dyn SinkHandle>> {
        self.inner.lock()
    }

    /// True when both values refer to the same underlying handle
    #[must_use]
    pub fn ptr_eq(&self, other: &SharedStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedStream").field(&self.name()).finish()
    }
}

/// Standard streams that are looked up again on every write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialSink {
    Stdout,
    Stderr,
}

impl SpecialSink {
    pub fn to_str(&self) -> &'static str {
        match self {
            SpecialSink::Stdout => "$stdout",
            SpecialSink::Stderr => "$stderr",
        }
    }
}

impl fmt::Display for SpecialSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for SpecialSink {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$stdout" | "stdout" => Ok(SpecialSink::Stdout),
            "$stderr" | "stderr" => Ok(SpecialSink::Stderr),
            _ => Err(format!("not a special sink: '{}'", s)),
        }
    }
}

/// Supplies the live handle for a [`SpecialSink`] at write time
pub trait SinkResolver: Send + Sync {
    fn resolve(&self, sink: SpecialSink) -> Box<dyn SinkHandle>;
}

/// Where report text goes.
///
/// Strings are read with [`SinkDescriptor::from_spec`]: `$stdout`, `stdout`,
/// `$stderr` and `stderr` name special sinks, anything else is a file path.
/// Use [`PathBuf`] to force a path.
#[derive(Debug, Clone)]
pub enum SinkDescriptor {
    /// An open stream owned by the caller
    Stream(SharedStream),
    /// A standard stream, resolved on every write
    Special(SpecialSink),
    /// A file the logger opens and owns
    Path(PathBuf),
}

impl SinkDescriptor {
    #[must_use]
    pub fn from_spec(spec: &str) -> Self {
        match spec.parse::<SpecialSink>() {
            Ok(special) => SinkDescriptor::Special(special),
            Err(_) => SinkDescriptor::Path(PathBuf::from(spec)),
        }
    }

    /// Identity comparison: same stream handle, same special, same path
    #[must_use]
    pub fn is_same(&self, other: &SinkDescriptor) -> bool {
        match (self, other) {
            (SinkDescriptor::Stream(a), SinkDescriptor::Stream(b)) => a.ptr_eq(b),
            (SinkDescriptor::Special(a), SinkDescriptor::Special(b)) => a == b,
            (SinkDescriptor::Path(a), SinkDescriptor::Path(b)) => a == b,
            _ => false,
        }
    }

    /// Human-readable name used in errors and diagnostics
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            SinkDescriptor::Stream(stream) => stream.name(),
            SinkDescriptor::Special(special) => special.to_string(),
            SinkDescriptor::Path(path) => path.display().to_string(),
        }
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, SinkDescriptor::Special(_))
    }
}

impl Default for SinkDescriptor {
    fn default() -> Self {
        SinkDescriptor::Special(SpecialSink::Stderr)
    }
}

impl PartialEq for SinkDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl From<SpecialSink> for SinkDescriptor {
    fn from(special: SpecialSink) -> Self {
        SinkDescriptor::Special(special)
    }
}

impl From<SharedStream> for SinkDescriptor {
    fn from(stream: SharedStream) -> Self {
        SinkDescriptor::Stream(stream)
    }
}

impl From<PathBuf> for SinkDescriptor {
    fn from(path: PathBuf) -> Self {
        SinkDescriptor::Path(path)
    }
}

impl From<&Path> for SinkDescriptor {
    fn from(path: &Path) -> Self {
        SinkDescriptor::Path(path.to_path_buf())
    }
}

impl From<&str> for SinkDescriptor {
    fn from(spec: &str) -> Self {
        SinkDescriptor::from_spec(spec)
    }
}

impl From<String> for SinkDescriptor {
    fn from(spec: String) -> Self {
        SinkDescriptor::from_spec(&spec)
    }
}

impl<'de> Deserialize<'de> for SinkDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = String::deserialize(deserializer)?;
        Ok(SinkDescriptor::from_spec(&spec))
    }
}
