//! Execution sessions and their initial state
//!
//! A session is an isolated execution context: its own command registry
//! and variables, bound to one host. It is created unopened, opened
//! before use, and closed by whoever created it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::commands;
use crate::engine::{Pipeline, SharedCommand, Value};
use crate::error::{ErrorKind, HostError};
use crate::host::Host;

/// Variable holding the host display name inside every session
pub const HOST_VARIABLE: &str = "HOST";

/// Template describing what a freshly created session contains.
///
/// Read-only during execution; every session created while a descriptor is
/// in effect is seeded from it.
#[derive(Clone, Default)]
pub struct InitialState {
    commands: HashMap<String, SharedCommand>,
    variables: Vec<(String, Value)>,
}

impl InitialState {
    /// Engine defaults: the full built-in command set, no variables.
    pub fn with_defaults() -> Self {
        Self {
            commands: commands::default_commands(),
            variables: Vec::new(),
        }
    }

    /// An empty template: sessions built from it know no commands at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a command under the given name. Replaces any previous
    /// registration.
    pub fn add_command(&mut self, name: impl Into<String>, command: SharedCommand) {
        self.commands.insert(name.into(), command);
    }

    /// Seed a variable into every session built from this template.
    pub fn add_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.push((name.into(), value));
    }
}

/// An isolated, stateful context in which statements run.
pub struct Session {
    host: Rc<Host>,
    commands: HashMap<String, SharedCommand>,
    variables: HashMap<String, Value>,
    open: bool,
}

impl Session {
    /// Create a new, unopened session bound to `host`.
    ///
    /// When `initial` is given, its commands and variables seed the
    /// session; otherwise engine defaults apply. A descriptor carrying a
    /// command name the statement parser could never produce is a fatal
    /// construction error.
    pub fn create(host: Rc<Host>, initial: Option<&InitialState>) -> Result<Session, HostError> {
        let defaults;
        let initial = match initial {
            Some(initial) => initial,
            None => {
                defaults = InitialState::with_defaults();
                &defaults
            }
        };

        for name in initial.commands.keys() {
            if name.is_empty()
                || name.contains(char::is_whitespace)
                || name.contains('\'')
                || name.contains('#')
            {
                return Err(HostError::new(
                    ErrorKind::SessionCreation,
                    format!("invalid command name {:?} in initial state", name),
                ));
            }
        }

        let mut variables = HashMap::new();
        variables.insert(
            HOST_VARIABLE.to_string(),
            Value::Text(host.name().to_string()),
        );
        for (name, value) in &initial.variables {
            variables.insert(name.clone(), value.clone());
        }

        Ok(Session {
            host,
            commands: initial.commands.clone(),
            variables,
            open: false,
        })
    }

    /// Open the session for use. Pipelines refuse to run until this is
    /// called.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the session. The batch driver never calls this; the session
    /// it used stays open for post-execution inspection.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The host identity this session is bound to.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Create a unit of work for one statement.
    pub fn create_pipeline(&mut self) -> Pipeline<'_> {
        Pipeline::new(self)
    }

    pub(crate) fn command(&self, name: &str) -> Option<SharedCommand> {
        self.commands.get(name).cloned()
    }

    /// Set a session variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Look up a session variable.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// All session variables, unordered.
    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }
}
