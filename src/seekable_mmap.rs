use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use memmap2::Mmap;

use crate::error::{Result, StreamError};
use crate::io::{seek_target, snapshot_length, SeekableStream, StreamState};
use crate::options::StreamOptions;
use crate::types::{OpenPolicy, SeekOrigin, StreamStatus};

/// A [`SeekableStream`] that maps the whole file into memory on `open()` and
/// serves reads from the mapping through an internal cursor.
///
/// Reads never fall short before end of file, so the read mode in the
/// options has no effect here. The mapping is bounded by the length
/// captured at construction even if the file grew since.
#[derive(Debug)]
pub struct MmapStream {
    path: PathBuf,
    length: u64,
    mmap: Option<Mmap>,
    pos: u64,
    state: StreamState,
    options: StreamOptions,
}

impl MmapStream {
    pub fn new<P: AsRef<Path>>(path: P) -> Option<Self> {
        Self::with_options(path, StreamOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(path: P, options: StreamOptions) -> Option<Self> {
        let path = path.as_ref().to_path_buf();
        let length = snapshot_length(&path)?;

        Some(Self {
            path,
            length,
            mmap: None,
            pos: 0,
            state: StreamState::default(),
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map(&self) -> std::io::Result<Mmap> {
        let file = File::open(&self.path)?;
        // SAFETY: memmap2::Mmap::map is safe here as long as the file is not
        // truncated while mapped; the stream owns the mapping exclusively.
        unsafe { Mmap::map(&file) }
    }

    /// Readable end of the mapping.
    fn end(mmap: &Mmap, length: u64) -> usize {
        std::cmp::min(mmap.len() as u64, length) as usize
    }
}

impl SeekableStream for MmapStream {
    fn length(&self) -> u64 {
        self.length
    }

    fn offset(&self) -> u64 {
        if self.mmap.is_some() {
            self.pos
        } else {
            0
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

        match self.map() {
            Ok(mmap) => {
                debug!("MmapStream {} mapped {} bytes", self.path.display(), mmap.len());
                self.mmap = Some(mmap);
                self.pos = 0;
                self.state.mark_open();
                Ok(())
            }
            Err(e) => {
                warn!("Could not map {}: {}", self.path.display(), e);
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
        if self.mmap.take().is_none() {
            return;
        }
        debug!("MmapStream {} unmapped", self.path.display());
        self.pos = 0;
        self.state.mark_closed();
    }

    fn read(&mut self, buf: &mut [u8], max_length: usize) -> Result<usize> {
        let requested = max_length.min(buf.len());
        let Some(mmap) = self.mmap.as_ref() else {
            return Err(self.state.fail(StreamError::HandleUnset));
        };

        let end = Self::end(mmap, self.length);
        let start = std::cmp::min(self.pos, end as u64) as usize;
        let to_read = std::cmp::min(end - start, requested);
        buf[..to_read].copy_from_slice(&mmap[start..start + to_read]);
        self.pos += to_read as u64;

        trace!(
            "MmapStream {} read {} of {} bytes",
            self.path.display(),
            to_read,
            requested
        );
        if to_read < requested {
            self.state.mark_at_end();
        }
        Ok(to_read)
    }

    fn seek(&mut self, offset: i64, whence: SeekOrigin) -> Result<()> {
        let target = seek_target(offset, whence);
        debug!("MmapStream {} offset {}", self.path.display(), target);

        if self.mmap.is_none() {
            return Err(self.state.fail(StreamError::HandleUnset));
        }
        self.pos = target;
        Ok(())
    }

    fn buffer(&self) -> Option<&[u8]> {
        let mmap = self.mmap.as_ref()?;
        let end = Self::end(mmap, self.length);
        let start = std::cmp::min(self.pos, end as u64) as usize;
        Some(&mmap[start..end])
    }
}

impl Drop for MmapStream {
    fn drop(&mut self) {
        if self.mmap.take().is_some() {
            debug!("MmapStream {} released on drop", self.path.display());
        }
    }
}
