use std::fs;
use std::io::{self, Read};
use std::path::Path;

use log::warn;

use crate::error::{Result, StreamError};
use crate::types::{SeekOrigin, StreamStatus};

mod file_stream;
mod reader;

pub use file_stream::FileStream;
pub use reader::StreamReader;

/// A bounded, randomly positionable byte source with an explicit lifecycle.
///
/// Implementations own their underlying resource exclusively and are meant
/// for single-threaded use. Failures of `read` and `seek` are returned and
/// also recorded, so callers may either propagate the `Result` or poll
/// [`status`](SeekableStream::status) and [`error`](SeekableStream::error)
/// after each call.
pub trait SeekableStream {
    /// Total size of the resource, fixed when the stream was constructed.
    fn length(&self) -> u64;

    /// Current read position. 0 while no handle is held.
    fn offset(&self) -> u64;

    fn status(&self) -> StreamStatus;

    /// Set only while `status()` is `Error`.
    fn error(&self) -> Option<StreamError>;

    fn has_bytes_available(&self) -> bool {
        self.offset() < self.length()
    }

    /// Acquire the underlying resource. Only a `NotOpen` stream can be
    /// opened; calling this on an already open stream does nothing.
    fn open(&mut self) -> Result<()>;

    /// Release the underlying resource. Safe to call any number of times.
    fn close(&mut self);

    /// Read up to `max_length` bytes (clamped to `buf.len()`) into `buf`
    /// from the current position and return how many were read.
    ///
    /// Reading fewer bytes than requested, including 0 at end of file,
    /// moves an `Open` stream to `AtEnd`.
    fn read(&mut self, buf: &mut [u8], max_length: usize) -> Result<usize>;

    /// Move to the absolute position `offset`.
    ///
    /// # Panics
    ///
    /// Only `SeekOrigin::StartOfStream` with a non-negative `offset` is
    /// supported. Anything else is a programming error and panics.
    fn seek(&mut self, offset: i64, whence: SeekOrigin) -> Result<()>;

    /// Direct view of the bytes that would be returned by the next reads,
    /// for backends that already hold them in memory.
    fn buffer(&self) -> Option<&[u8]> {
        None
    }
}

impl<S: SeekableStream + ?Sized> SeekableStream for Box<S> {
    fn length(&self) -> u64 {
        (**self).length()
    }

    fn offset(&self) -> u64 {
        (**self).offset()
    }

    fn status(&self) -> StreamStatus {
        (**self).status()
    }

    fn error(&self) -> Option<StreamError> {
        (**self).error()
    }

    fn has_bytes_available(&self) -> bool {
        (**self).has_bytes_available()
    }

    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn read(&mut self, buf: &mut [u8], max_length: usize) -> Result<usize> {
        (**self).read(buf, max_length)
    }

    fn seek(&mut self, offset: i64, whence: SeekOrigin) -> Result<()> {
        (**self).seek(offset, whence)
    }

    fn buffer(&self) -> Option<&[u8]> {
        (**self).buffer()
    }
}

/// Status/error pair shared by the backends. All transitions go through the
/// methods below so that `Error` always carries an error and neither
/// `Error` nor `Closed` ever leads back to `Open`.
#[derive(Debug, Default)]
pub(crate) struct StreamState {
    status: StreamStatus,
    error: Option<StreamError>,
}

impl StreamState {
    pub(crate) fn status(&self) -> StreamStatus {
        self.status
    }

    pub(crate) fn error(&self) -> Option<StreamError> {
        self.error
    }

    pub(crate) fn mark_open(&mut self) {
        if self.status == StreamStatus::NotOpen {
            self.status = StreamStatus::Open;
        }
    }

    pub(crate) fn mark_at_end(&mut self) {
        if self.status == StreamStatus::Open {
            self.status = StreamStatus::AtEnd;
        }
    }

    pub(crate) fn mark_closed(&mut self) {
        if self.status != StreamStatus::Error {
            self.status = StreamStatus::Closed;
        }
    }

    /// Record `error` and hand it back for returning.
    pub(crate) fn fail(&mut self, error: StreamError) -> StreamError {
        self.status = StreamStatus::Error;
        self.error = Some(error);
        error
    }
}

/// Size of the regular file at `path`, or `None` if it cannot be used as
/// the backing file of a stream.
pub(crate) fn snapshot_length(path: &Path) -> Option<u64> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("File not found: {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Could not retrieve attributes of {}: {}", path.display(), e);
            return None;
        }
    };

    if !metadata.is_file() {
        warn!("Not a regular file: {}", path.display());
        return None;
    }

    Some(metadata.len())
}

/// Validate a seek request and return the absolute target.
pub(crate) fn seek_target(offset: i64, whence: SeekOrigin) -> u64 {
    assert!(
        whence == SeekOrigin::StartOfStream,
        "only seeking from the start of the stream is supported"
    );
    assert!(
        offset >= 0,
        "seek offset from the start of the stream must be >= 0"
    );
    offset as u64
}

/// Read into `buf` until it is full or `reader` reports end of file.
pub(crate) fn fill_from<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
