use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, error, trace, warn};

use super::{fill_from, seek_target, snapshot_length, SeekableStream, StreamState};
use crate::error::{Result, StreamError};
use crate::options::StreamOptions;
use crate::types::{OpenPolicy, ReadMode, SeekOrigin, StreamStatus};

/// Stream over a single file on the local filesystem.
///
/// The file size is captured once at construction; later changes to the
/// file are not reflected in [`length`](SeekableStream::length). The OS
/// handle is acquired by `open()` and released by `close()` or on drop.
#[derive(Debug)]
pub struct FileStream {
    path: PathBuf,
    length: u64,
    handle: Option<File>,
    state: StreamState,
    options: StreamOptions,
}

impl FileStream {
    /// Check that `path` names an existing regular file and record its size.
    /// No handle is opened yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Option<Self> {
        Self::with_options(path, StreamOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(path: P, options: StreamOptions) -> Option<Self> {
        let path = path.as_ref().to_path_buf();
        let length = snapshot_length(&path)?;

        Some(Self {
            path,
            length,
            handle: None,
            state: StreamState::default(),
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }
}

impl SeekableStream for FileStream {
    fn length(&self) -> u64 {
        self.length
    }

    fn offset(&self) -> u64 {
        let Some(mut file) = self.handle.as_ref() else {
            return 0;
        };
        match file.stream_position() {
            Ok(pos) => pos,
            Err(e) => {
                warn!("FileStream {} position unavailable: {}", self.path.display(), e);
                0
            }
        }
    }

    fn status(&self) -> StreamStatus {
        self.state.status()
    }

    fn error(&self) -> Option<StreamError> {
        self.state.error()
    }

    fn open(&mut self) -> Result<()> {
        let status = self.state.status();
        if status.is_terminal() {
            return Err(StreamError::HandleUnset);
        }
        if status != StreamStatus::NotOpen {
            return Ok(());
        }

        match File::open(&self.path) {
            Ok(file) => {
                debug!("FileStream {} opened", self.path.display());
                self.handle = Some(file);
                self.state.mark_open();
                Ok(())
            }
            Err(e) => {
                warn!("Could not open {}: {}", self.path.display(), e);
                match self.options.open_policy {
                    OpenPolicy::Strict => Err(self.state.fail(StreamError::HandleInitFailed)),
                    OpenPolicy::Deferred => {
                        self.state.mark_open();
                        Ok(())
                    }
                }
            }
        }
    }

    fn close(&mut self) {
        if self.handle.take().is_none() {
            return;
        }
        debug!("FileStream {} closed", self.path.display());
        self.state.mark_closed();
    }

    fn read(&mut self, buf: &mut [u8], max_length: usize) -> Result<usize> {
        let requested = max_length.min(buf.len());
        let Some(file) = self.handle.as_mut() else {
            return Err(self.state.fail(StreamError::HandleUnset));
        };

        let read = match self.options.read_mode {
            ReadMode::Single => file.read(&mut buf[..requested]),
            ReadMode::Fill => fill_from(file, &mut buf[..requested]),
        };

        match read {
            Ok(n) => {
                trace!(
                    "FileStream {} read {} of {} bytes",
                    self.path.display(),
                    n,
                    requested
                );
                if n < requested {
                    self.state.mark_at_end();
                }
                Ok(n)
            }
            Err(e) => {
                error!("FileStream {} read failed: {}", self.path.display(), e);
                Err(self.state.fail(StreamError::ReadFailed))
            }
        }
    }

    fn seek(&mut self, offset: i64, whence: SeekOrigin) -> Result<()> {
        let target = seek_target(offset, whence);
        debug!("FileStream {} offset {}", self.path.display(), target);

        let Some(file) = self.handle.as_mut() else {
            return Err(self.state.fail(StreamError::HandleUnset));
        };

        if let Err(e) = file.seek(SeekFrom::Start(target)) {
            error!("FileStream {} seek failed: {}", self.path.display(), e);
            return Err(self.state.fail(StreamError::ReadFailed));
        }
        Ok(())
    }
}

impl Drop for FileStream {
    fn drop(&mut self) {
        if self.handle.take().is_some() {
            debug!("FileStream {} released on drop", self.path.display());
        }
    }
}
