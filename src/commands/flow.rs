//! Flow and failure commands: error, throw, exit

use crate::engine::{Command, StageOutput, Value};
use crate::error::{ErrorKind, HostError};
use crate::session::Session;

// ──────────────────────────────────────────────────────────
// error — record a non-terminating error
// ──────────────────────────────────────────────────────────

pub(super) struct ErrorCmd;

impl Command for ErrorCmd {
    fn run(
        &self,
        _session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        if args.is_empty() {
            return Err(HostError::usage("error", "message..."));
        }
        Ok(StageOutput::error(HostError::new(
            ErrorKind::CommandFailed,
            args.join(" "),
        )))
    }
}

// ──────────────────────────────────────────────────────────
// throw — raise a terminating failure
// ──────────────────────────────────────────────────────────

pub(super) struct ThrowCmd;

impl Command for ThrowCmd {
    fn run(
        &self,
        _session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let message = if args.is_empty() {
            "statement terminated".to_string()
        } else {
            args.join(" ")
        };
        Err(HostError::new(ErrorKind::CommandFailed, message))
    }
}

// ──────────────────────────────────────────────────────────
// exit — request batch termination
// ──────────────────────────────────────────────────────────

pub(super) struct ExitCmd;

impl Command for ExitCmd {
    fn run(
        &self,
        session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let code = match args {
            [] => 0,
            [code] => code
                .parse::<i32>()
                .map_err(|_| HostError::usage("exit", "[code]"))?,
            _ => return Err(HostError::usage("exit", "[code]")),
        };
        // A side-effecting request, not control flow: the rest of this
        // pipeline still runs, and the batch stops before the next
        // statement.
        session.host().set_should_exit(code);
        Ok(StageOutput::none())
    }
}
