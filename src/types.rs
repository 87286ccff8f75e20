/// Lifecycle state of a stream. Exactly one value is held at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamStatus {
    #[default]
    NotOpen,
    Open,
    AtEnd,
    Closed,
    Error,
}

impl StreamStatus {
    /// `Closed` and `Error` never transition back to `Open`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamStatus::Closed | StreamStatus::Error)
    }
}

/// Reference point of a seek. Only `StartOfStream` is accepted by the
/// streams in this crate; the other origins are rejected by assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    StartOfStream,
    CurrentPosition,
    EndOfStream,
}

/// How many underlying reads a single `read` call may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// One underlying read per call. A short read marks the stream `AtEnd`
    /// even if the OS simply returned fewer bytes than asked. An
    /// `Interrupted` error is not retried and leaves the stream in `Error`
    /// for good, although the handle itself is still usable.
    #[default]
    Single,
    /// Keep reading until the request is satisfied or EOF is hit.
    Fill,
}

/// What `open()` does when the handle cannot be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenPolicy {
    /// Fail immediately with `HandleInitFailed` and move to `Error`.
    #[default]
    Strict,
    /// Report `Open` anyway; the first read or seek surfaces `HandleUnset`.
    Deferred,
}
