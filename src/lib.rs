//! Seekable byte streams over local files.
//!
//! A [`SeekableStream`] is a bounded, randomly positionable byte source with
//! an explicit open/close lifecycle and a status that callers can poll after
//! each operation. [`FileStream`] reads through an OS file handle and
//! [`MmapStream`] through a memory mapping; [`StreamReader`] lets either be
//! handed to code written against `std::io::{Read, Seek}`.

pub mod error;
pub mod io;
pub mod options;
mod seekable_mmap;
pub mod types;

pub use error::{Result, StreamError};
pub use io::{FileStream, SeekableStream, StreamReader};
pub use options::StreamOptions;
pub use seekable_mmap::MmapStream;
pub use types::{OpenPolicy, ReadMode, SeekOrigin, StreamStatus};
