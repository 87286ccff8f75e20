use std::io::{self, Read, Seek, SeekFrom};

use super::SeekableStream;
use crate::types::SeekOrigin;

/// Exposes a [`SeekableStream`] as `Read + Seek` so that container parsers
/// written against `std::io` can consume it.
///
/// The stream must already be open. Relative seeks are resolved against the
/// stream's current offset and length before being forwarded as a seek from
/// the start.
#[derive(Debug)]
pub struct StreamReader<S: SeekableStream> {
    inner: S,
}

impl<S: SeekableStream> StreamReader<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SeekableStream> Read for StreamReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        SeekableStream::read(&mut self.inner, buf, len).map_err(io::Error::from)
    }
}

impl<S: SeekableStream> Seek for StreamReader<S> {
    fn seek(&mut self, how: SeekFrom) -> io::Result<u64> {
        let target = match how {
            SeekFrom::Start(off) => Some(off),
            SeekFrom::Current(off) => self.inner.offset().checked_add_signed(off),
            SeekFrom::End(off) => self.inner.length().checked_add_signed(off),
        };

        let target = target
            .and_then(|t| i64::try_from(t).ok())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "invalid seek to a negative or overflowing position",
                )
            })?;

        SeekableStream::seek(&mut self.inner, target, SeekOrigin::StartOfStream)?;
        Ok(target as u64)
    }
}
