//! Store configuration.

/// Configuration for creating a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Initial capacity of the committed map.
    pub committed_capacity: usize,

    /// Initial capacity of the pending overlay.
    pub pending_capacity: usize,

    /// Whether reads during an open transaction see that transaction's
    /// staged writes and the committed data underneath.
    ///
    /// Off by default: an open transaction hides every key.
    pub read_your_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            committed_capacity: 0,
            pending_capacity: 0,
            read_your_writes: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of the committed map.
    #[must_use]
    pub const fn committed_capacity(mut self, capacity: usize) -> Self {
        self.committed_capacity = capacity;
        self
    }

    /// Sets the initial capacity of the pending overlay.
    #[must_use]
    pub const fn pending_capacity(mut self, capacity: usize) -> Self {
        self.pending_capacity = capacity;
        self
    }

    /// Sets whether open transactions can read their own writes.
    #[must_use]
    pub const fn read_your_writes(mut self, value: bool) -> Self {
        self.read_your_writes = value;
        self
    }
}
