use std::fmt;

/// Structured error type for `systemctl` operations.
#[derive(Debug)]
pub enum SystemdError {
    /// `systemctl` ran but returned a non-zero exit.
    CommandFailed {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
    },

    /// `systemctl` couldn't be executed (not in PATH, permission denied).
    ExecFailed {
        command: String,
        source: std::io::Error,
    },

    /// `systemctl` succeeded but printed something we could not interpret.
    UnexpectedOutput { command: String, line: String },
}

impl SystemdError {
    /// Create a command-failed error from an `std::process::Output`.
    pub fn failed(cmd: impl Into<String>, output: &std::process::Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        SystemdError::CommandFailed {
            command: cmd.into(),
            stderr,
            exit_code: output.status.code(),
        }
    }

    /// Create a command-failed error from a stderr string and optional exit code.
    pub fn cmd_failed(
        cmd: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        SystemdError::CommandFailed {
            command: cmd.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Create an exec-failed error (binary not found / permission denied).
    pub fn exec_failed(cmd: impl Into<String>, err: std::io::Error) -> Self {
        SystemdError::ExecFailed {
            command: cmd.into(),
            source: err,
        }
    }

    pub fn unexpected_output(cmd: impl Into<String>, line: impl Into<String>) -> Self {
        SystemdError::UnexpectedOutput {
            command: cmd.into(),
            line: line.into(),
        }
    }

    /// Whether systemd (or polkit) refused the request for lack of privileges.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            SystemdError::CommandFailed { stderr, .. } => {
                stderr.contains("Access denied")
                    || stderr.contains("Interactive authentication required")
            }
            SystemdError::ExecFailed { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            SystemdError::UnexpectedOutput { .. } => false,
        }
    }
}

impl fmt::Display for SystemdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemdError::CommandFailed {
                command,
                stderr,
                exit_code,
            } => {
                if let Some(code) = exit_code {
                    write!(f, "'{}' failed (exit code {}): {}", command, code, stderr)
                } else {
                    write!(f, "'{}' failed: {}", command, stderr)
                }
            }
            SystemdError::ExecFailed { command, source } => {
                write!(f, "Failed to execute '{}': {}", command, source)
            }
            SystemdError::UnexpectedOutput { command, line } => {
                write!(f, "Unexpected output from '{}': {:?}", command, line)
            }
        }
    }
}

impl std::error::Error for SystemdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SystemdError::ExecFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
