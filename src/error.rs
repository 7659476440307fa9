//! Host and engine errors

use std::fmt;

/// The kind of host error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A session could not be constructed from its initial state
    SessionCreation,
    /// A pipeline was invoked against a session that is not open
    SessionNotOpen,
    /// Invalid statement syntax
    SyntaxError,
    /// Invalid usage of a command
    UsageError,
    /// Statement referenced an unknown command or stage
    UnknownCommand,
    /// A variable was read before being set
    UndefinedVariable,
    /// Command execution failed
    CommandFailed,
    /// A declared host capability that is not available
    Unsupported,
}

/// An error raised by the host or by executing script
#[derive(Debug)]
pub struct HostError {
    pub kind: ErrorKind,
    pub message: String,
    pub command: Option<String>,
}

impl HostError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::SyntaxError, msg)
    }

    pub fn usage(command: &str, expected: &str) -> Self {
        Self::new(
            ErrorKind::UsageError,
            format!("usage: {} {}", command, expected),
        )
    }

    /// A capability that is declared on the host surface but not available.
    /// These fail loudly instead of silently doing nothing.
    pub fn unsupported(operation: &str) -> Self {
        Self::new(
            ErrorKind::Unsupported,
            format!("host does not support {}", operation),
        )
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref command) = self.command {
            write!(f, "{}: ", command)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HostError {}
