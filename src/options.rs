use crate::types::{OpenPolicy, ReadMode};

/// Behaviour knobs shared by every stream backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    pub read_mode: ReadMode,
    pub open_policy: OpenPolicy,
}

impl StreamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn with_open_policy(mut self, open_policy: OpenPolicy) -> Self {
        self.open_policy = open_policy;
        self
    }
}
