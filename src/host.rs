//! Host identity and exit signalling
//!
//! A `Host` is the addressable identity a session runs under: a display
//! name, a reference to the output sink, and the exit signal executing
//! script uses to request batch termination. The wider interactive-host
//! capability surface is declared but unsupported.

use std::cell::Cell;

use crate::error::HostError;
use crate::ui::SharedUi;

/// The identity object bound to every session.
pub struct Host {
    name: String,
    ui: SharedUi,
    exit_requested: Cell<bool>,
    exit_code: Cell<Option<i32>>,
}

impl Host {
    /// Create a host wrapping the given sink. Exit state starts cleared.
    pub fn new(name: impl Into<String>, ui: SharedUi) -> Self {
        Self {
            name: name.into(),
            ui,
            exit_requested: Cell::new(false),
            exit_code: Cell::new(None),
        }
    }

    /// Display name of this host.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output sink all session output is routed to.
    pub fn ui(&self) -> &SharedUi {
        &self.ui
    }

    /// Request termination of the current batch with the given exit code.
    ///
    /// The request only takes effect between statements, never mid-statement.
    /// Calling it again simply overwrites the recorded code.
    pub fn set_should_exit(&self, code: i32) {
        self.exit_requested.set(true);
        self.exit_code.set(Some(code));
    }

    /// Whether termination has been requested.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.get()
    }

    /// The most recently requested exit code, if any.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code.get()
    }
}

/// Declared-but-unsupported host capabilities.
///
/// Invoking any of these fails with [`crate::ErrorKind::Unsupported`] so
/// callers exercising these paths get a clear signal instead of a silent
/// no-op.
impl Host {
    pub fn current_culture(&self) -> Result<String, HostError> {
        Err(HostError::unsupported("current culture"))
    }

    pub fn current_ui_culture(&self) -> Result<String, HostError> {
        Err(HostError::unsupported("current UI culture"))
    }

    pub fn instance_id(&self) -> Result<String, HostError> {
        Err(HostError::unsupported("instance id"))
    }

    pub fn version(&self) -> Result<String, HostError> {
        Err(HostError::unsupported("version"))
    }

    pub fn enter_nested_prompt(&self) -> Result<(), HostError> {
        Err(HostError::unsupported("nested prompts"))
    }

    pub fn exit_nested_prompt(&self) -> Result<(), HostError> {
        Err(HostError::unsupported("nested prompts"))
    }

    pub fn notify_begin_application(&self) -> Result<(), HostError> {
        Err(HostError::unsupported("application notifications"))
    }

    pub fn notify_end_application(&self) -> Result<(), HostError> {
        Err(HostError::unsupported("application notifications"))
    }
}
