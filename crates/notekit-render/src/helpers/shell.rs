use std::sync::Arc;
use std::time::Duration;

use notekit_pipe::CommandRunner;

use super::{HelperError, HelperInvocation};
use crate::logger::Logger;

/// `{{sh "command"}}` or `{{#sh "command"}}stdin{{/sh}}`.
///
/// The inline form returns the command's stdout verbatim. The block form
/// pipes the rendered block to the command and drops one trailing newline
/// from its stdout, so the result can sit inside running text.
///
/// A command that cannot be spawned, exits non-zero or times out does not
/// fail the render: a warning goes to the logger and the helper renders as
/// empty text.
#[derive(Clone)]
pub struct ShellHelper {
    runner: Arc<dyn CommandRunner>,
    logger: Arc<dyn Logger>,
    timeout: Option<Duration>,
}

impl ShellHelper {
    pub const NAME: &'static str = "sh";

    pub fn new(
        runner: Arc<dyn CommandRunner>,
        logger: Arc<dyn Logger>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            runner,
            logger,
            timeout,
        }
    }

    pub fn call(&self, invocation: &HelperInvocation) -> Result<String, HelperError> {
        let command = invocation.arg(0).ok_or(HelperError::MissingArgument {
            helper: Self::NAME,
            what: "a command",
        })?;
        let input = invocation.block.as_deref().unwrap_or("");

        tracing::debug!(command, block = invocation.is_block(), "running shell helper");

        match self.runner.run(command, input, self.timeout) {
            Ok(output) if invocation.is_block() => Ok(trim_trailing_newline(output)),
            Ok(output) => Ok(output),
            Err(err) => {
                self.logger
                    .warn(&format!("sh helper: command `{}` failed: {}", command, err));
                Ok(String::new())
            }
        }
    }
}

fn trim_trailing_newline(mut output: String) -> String {
    if output.ends_with('\n') {
        output.pop();
        if output.ends_with('\r') {
            output.pop();
        }
    }
    output
}
