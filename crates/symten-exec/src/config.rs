//! Thread group configuration

/// Configuration shared by [`crate::ThreadGroup`] and
/// [`crate::DetachThreadGroup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadGroupConfig {
    /// Maximum number of simultaneously active workers (at least 1)
    pub max_parallel_threads: usize,
}

impl Default for ThreadGroupConfig {
    fn default() -> Self {
        Self {
            max_parallel_threads: 2,
        }
    }
}

impl ThreadGroupConfig {
    /// Set the worker cap, clamped to at least one
    pub fn max_parallel_threads(mut self, n: usize) -> Self {
        self.max_parallel_threads = n.max(1);
        self
    }

    /// Cap equal to the available hardware parallelism
    pub fn available() -> Self {
        let n = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::default().max_parallel_threads(n)
    }
}
