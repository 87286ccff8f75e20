use std::io;

/// Errors reported by a seekable stream. Runtime failures are also recorded
/// on the stream itself, see [`crate::io::SeekableStream::error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    #[error("Read Failed: the underlying read or seek did not complete")]
    ReadFailed,
    #[error("Handle Init Failed: could not acquire a handle for the resource")]
    HandleInitFailed,
    #[error("Handle Unset: the stream holds no open handle")]
    HandleUnset,
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        let kind = match e {
            StreamError::ReadFailed => io::ErrorKind::Other,
            StreamError::HandleInitFailed => io::ErrorKind::NotFound,
            StreamError::HandleUnset => io::ErrorKind::NotConnected,
        };
        io::Error::new(kind, e)
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
