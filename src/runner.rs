//! Batch execution driver
//!
//! `ScriptHost` runs an ordered list of statements against one freshly
//! created session and returns everything a real interactive host would
//! have displayed. It is also the execution context: the initial-state
//! descriptor, the last session used, and the last requested exit code
//! live here, threaded explicitly instead of through ambient state.

use std::rc::Rc;

use crate::commands::OUT_DEFAULT;
use crate::engine::PipelineState;
use crate::error::HostError;
use crate::host::Host;
use crate::session::{InitialState, Session};
use crate::ui::{ErrorLineHandler, HostUi, SharedUi};

/// Display name of the hosts this driver creates
pub const HOST_NAME: &str = "script-host";

/// Options for a single batch execution
#[derive(Default)]
pub struct ExecuteOptions {
    /// Route error lines through the override handler instead of the
    /// sink's default append path
    pub log_errors: bool,
    /// Custom error-line handler; only consulted when `log_errors` is set.
    /// When absent, an explicit default handler appends the line to the
    /// sink's own buffer.
    pub on_error: Option<ErrorLineHandler>,
    /// Sink to capture output in; a fresh one is created when absent
    pub ui: Option<SharedUi>,
}

impl ExecuteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_errors(mut self, log_errors: bool) -> Self {
        self.log_errors = log_errors;
        self
    }

    pub fn on_error(mut self, handler: ErrorLineHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    pub fn ui(mut self, ui: SharedUi) -> Self {
        self.ui = Some(ui);
        self
    }
}

/// The batch driver and its execution context.
#[derive(Default)]
pub struct ScriptHost {
    initial_state: Option<InitialState>,
    last_session: Option<Session>,
    last_exit_code: Option<i32>,
}

impl ScriptHost {
    /// A context with no initial-state descriptor: sessions get engine
    /// defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or clear) the descriptor used by every session created
    /// from now on, until replaced.
    pub fn set_initial_state(&mut self, initial: Option<InitialState>) {
        self.initial_state = initial;
    }

    /// Execute a batch with default behavior: no error-line override, a
    /// fresh sink.
    pub fn execute(&mut self, statements: &[&str]) -> Result<String, HostError> {
        self.execute_with(ExecuteOptions::default(), statements)
    }

    /// Execute a batch with error logging enabled and the default
    /// handler, so error lines still land in the returned log.
    pub fn execute_logged(&mut self, statements: &[&str]) -> Result<String, HostError> {
        self.execute_with(ExecuteOptions::new().log_errors(true), statements)
    }

    /// Execute a batch of statements against one fresh session.
    ///
    /// Each statement becomes its own pipeline (the statement plus a
    /// terminal render stage). A failure raised by a statement is caught
    /// here, rendered, and written as an error line; error records of a
    /// failed pipeline follow it, in order. Execution stops early only
    /// when a statement requested termination via the host. The session
    /// is intentionally left open and exposed as [`ScriptHost::last_session`].
    ///
    /// Only session construction errors propagate: they are a fault in
    /// the harness setup, not in the statements under test.
    pub fn execute_with(
        &mut self,
        options: ExecuteOptions,
        statements: &[&str],
    ) -> Result<String, HostError> {
        let ui = options.ui.unwrap_or_else(HostUi::shared);
        if options.log_errors {
            let handler = options
                .on_error
                .unwrap_or_else(|| Box::new(|ui: &mut HostUi, line: &str| ui.write_line(line)));
            ui.borrow_mut().set_error_line_handler(handler);
        }

        self.last_exit_code = None;
        self.last_session = None;

        let host = Rc::new(Host::new(HOST_NAME, Rc::clone(&ui)));
        let mut session = Session::create(Rc::clone(&host), self.initial_state.as_ref())?;
        session.open();

        for statement in statements {
            if host.exit_requested() {
                break;
            }

            let mut pipeline = session.create_pipeline();
            pipeline.add_script(statement);
            pipeline.add_command(OUT_DEFAULT);

            if let Err(error) = pipeline.invoke() {
                ui.borrow_mut().write_error_line(&error.to_string());
            }
            if pipeline.state() == PipelineState::Failed {
                for record in pipeline.drain_errors() {
                    ui.borrow_mut().write_error_line(&record.to_string());
                }
            }
            // pipeline dropped here, releasing its hold on the session
        }

        self.last_exit_code = host.exit_code();
        self.last_session = Some(session);

        let log = ui.borrow().log().to_string();
        Ok(log)
    }

    /// Exit code requested during the last batch, if any statement asked
    /// to terminate.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code
    }

    /// The session the last batch ran in, still open for inspection.
    pub fn last_session(&self) -> Option<&Session> {
        self.last_session.as_ref()
    }
}

/// One-shot convenience: run a batch in a throwaway context with default
/// options and return the captured log.
pub fn execute(statements: &[&str]) -> Result<String, HostError> {
    ScriptHost::new().execute(statements)
}
