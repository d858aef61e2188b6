//! Diagnostics sinks for projection warnings.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

/// Receives non-fatal warnings raised while projecting.
pub trait DiagnosticsSink: Send + Sync {
    /// Report a warning. Must not fail.
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

/// Keeps warnings in memory, for callers that report them in bulk.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of warnings received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no warning was received.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticsSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
