//! Warning sinks for recoverable helper failures.
//!
//! The shell helper never aborts a render; it reports through a [`Logger`]
//! instead. [`TracingLogger`] is the production sink, [`NullLogger`] is for
//! headless use and [`MemoryLogger`] records messages for tests.

use std::sync::Mutex;

/// Receives warning-level messages.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "notekit", "{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn warn(&self, _message: &str) {}
}

/// Keeps warnings in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    messages: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded warnings, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
