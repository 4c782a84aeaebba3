//! Shell command execution for template helpers.
//!
//! This crate runs a command string through the system shell (`sh -c`, or
//! `cmd /C` on Windows), writes a piece of text to its standard input and
//! captures its standard output.
//!
//! The [`CommandRunner`] trait is the seam used by callers: [`ShellRunner`]
//! spawns real processes, [`MockRunner`] answers from a table so callers can
//! test their failure handling without touching the OS.
//!
//! ```rust,no_run
//! use notekit_pipe::{CommandRunner, ShellRunner};
//! use std::time::Duration;
//!
//! let out = ShellRunner
//!     .run("tr '[a-z]' '[A-Z]'", "hello", Some(Duration::from_secs(5)))
//!     .unwrap();
//! assert_eq!(out, "HELLO");
//! ```

pub mod runner;
pub mod shell;

pub use runner::{CommandRunner, Invocation, MockResult, MockRunner, ShellRunner};
pub use shell::{run_piped, shell_command, ShellError};
