//! The command runner seam.
//!
//! Callers depend on [`CommandRunner`] rather than on [`run_piped`] directly,
//! so their failure policy can be exercised with a [`MockRunner`].

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use crate::shell::{run_piped, ShellError};

/// Runs a command string with some text on its standard input.
pub trait CommandRunner: Send + Sync {
    /// Runs `command`, writing `input` to its stdin, and returns its stdout.
    fn run(&self, command: &str, input: &str, timeout: Option<Duration>)
        -> Result<String, ShellError>;
}

/// Real runner that spawns the command through the system shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        command: &str,
        input: &str,
        timeout: Option<Duration>,
    ) -> Result<String, ShellError> {
        run_piped(command, input, timeout)
    }
}

// === Mock implementation for testing ===

/// A call recorded by [`MockRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub input: String,
}

/// The canned outcome of a mock command.
#[derive(Debug, Clone)]
pub enum MockResult {
    /// Command succeeds and prints this to stdout.
    Output(String),
    /// Command echoes its stdin back.
    Echo,
    /// Command exits with this code and stderr.
    Exit(i32, String),
    /// Command cannot be spawned.
    SpawnFailure(String),
    /// Command runs past its timeout.
    Timeout,
}

/// Mock command runner for testing.
///
/// Commands without a registered result fail as if the shell could not find
/// them (exit code 127).
#[derive(Debug, Default)]
pub struct MockRunner {
    results: HashMap<String, MockResult>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner that knows no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the outcome of a command.
    pub fn with_result(mut self, command: impl Into<String>, result: MockResult) -> Self {
        self.results.insert(command.into(), result);
        self
    }

    /// Register a command that succeeds with the given stdout.
    pub fn with_output(self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.with_result(command, MockResult::Output(stdout.into()))
    }

    /// Returns every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        command: &str,
        input: &str,
        timeout: Option<Duration>,
    ) -> Result<String, ShellError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                command: command.to_string(),
                input: input.to_string(),
            });
        }

        match self.results.get(command) {
            Some(MockResult::Output(stdout)) => Ok(stdout.clone()),
            Some(MockResult::Echo) => Ok(input.to_string()),
            Some(MockResult::Exit(code, stderr)) => Err(ShellError::CommandFailed {
                command: command.to_string(),
                code: Some(*code),
                stderr: stderr.clone(),
            }),
            Some(MockResult::SpawnFailure(msg)) => {
                Err(ShellError::Io(io::Error::new(io::ErrorKind::NotFound, msg.clone())))
            }
            Some(MockResult::Timeout) => Err(ShellError::Timeout(
                command.to_string(),
                timeout.unwrap_or_default(),
            )),
            None => Err(ShellError::CommandFailed {
                command: command.to_string(),
                code: Some(127),
                stderr: format!("{}: command not found", command),
            }),
        }
    }
}
