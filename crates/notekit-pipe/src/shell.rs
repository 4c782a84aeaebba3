use std::io::{self, ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{command}` failed with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Command output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Builds the platform shell invocation for a command string.
///
/// Pipes, quoting and redirections inside `command_str` are interpreted by
/// the shell, not by this crate.
pub fn shell_command(command_str: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_str);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_str);
        c
    }
}

/// Execute a shell command with the given input piped to stdin.
///
/// Returns the command's stdout on success, verbatim.
///
/// # Arguments
///
/// * `command_str` - The shell command to execute
/// * `input` - Data to write to the command's stdin (closed afterwards)
/// * `timeout` - Optional timeout; if exceeded, the process is killed
///
/// # Notes
///
/// Stdin is fed from its own thread while stdout and stderr are drained
/// concurrently, so a command producing more output than the pipe buffer
/// holds cannot deadlock against its own input. A command that exits without
/// reading its stdin is not an error.
///
/// The entire stdout is buffered in memory before being returned.
pub fn run_piped(
    command_str: &str,
    input: &str,
    timeout: Option<Duration>,
) -> Result<String, ShellError> {
    let mut child = shell_command(command_str)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let writer = feed(child.stdin.take(), input.as_bytes().to_vec());
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                // Reap the killed process; the pipe threads are left to finish on their own.
                let _ = child.wait();
                return Err(ShellError::Timeout(command_str.to_string(), duration));
            }
        },
        None => child.wait()?,
    };

    join(writer)?;
    let stdout = join(stdout)?;
    let stderr = join(stderr)?;

    if !status.success() {
        return Err(ShellError::CommandFailed {
            command: command_str.to_string(),
            code: status.code(),
            stderr: String::from_utf8_lossy(&stderr).trim_end().to_string(),
        });
    }

    Ok(String::from_utf8(stdout)?)
}

fn feed<W: Write + Send + 'static>(pipe: Option<W>, input: Vec<u8>) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        if let Some(mut pipe) = pipe {
            match pipe.write_all(&input) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
            // Dropping the handle closes stdin so the command sees EOF.
        }
        Ok(())
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join<T>(handle: JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .map_err(|_| io::Error::other("pipe thread panicked"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        let output = run_piped("echo hello", "", None).unwrap();
        assert!(output.trim().contains("hello"));
    }

    #[test]
    fn test_input_piping() {
        let cmd = if cfg!(windows) {
            "findstr foo"
        } else {
            "grep foo"
        };
        let input = "foo\nbar\nbaz";
        let output = run_piped(cmd, input, None).unwrap();
        assert_eq!(output.trim(), "foo");
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_verbatim() {
        let output = run_piped("echo 'Hello, world!'", "", None).unwrap();
        assert_eq!(output, "Hello, world!\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_pipes_are_interpreted() {
        let output = run_piped("tr '[a-z]' '[A-Z]' | tr -d B", "abc", None).unwrap();
        assert_eq!(output, "AC");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout() {
        let start = std::time::Instant::now();
        let res = run_piped("sleep 2", "", Some(Duration::from_millis(500)));
        assert!(matches!(res, Err(ShellError::Timeout(_, _))));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_command_failed_includes_command_name() {
        let cmd = "exit 1";
        let res = run_piped(cmd, "", None);
        match res {
            Err(ShellError::CommandFailed { command, code, .. }) => {
                assert_eq!(command, cmd);
                assert_eq!(code, Some(1));
            }
            other => panic!("Expected CommandFailed error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failed_captures_stderr() {
        let res = run_piped("echo oops >&2; exit 3", "", None);
        match res {
            Err(err @ ShellError::CommandFailed { .. }) => {
                let msg = err.to_string();
                assert!(msg.contains("exit code 3"), "{}", msg);
                assert!(msg.contains("oops"), "{}", msg);
            }
            other => panic!("Expected CommandFailed error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_command_fails() {
        let res = run_piped("definitely-not-a-real-command-xyz", "", None);
        assert!(matches!(
            res,
            Err(ShellError::CommandFailed { code: Some(127), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_large_payload_does_not_deadlock() {
        let input = "x".repeat(1 << 20);
        let output = run_piped("cat", &input, Some(Duration::from_secs(10))).unwrap();
        assert_eq!(output.len(), input.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_ignoring_stdin_is_not_an_error() {
        let input = "y".repeat(1 << 20);
        let output = run_piped("echo done", &input, Some(Duration::from_secs(10))).unwrap();
        assert_eq!(output, "done\n");
    }
}
