//! write / out-default — producing and rendering output values

use crate::engine::{Command, StageOutput, Value};
use crate::error::HostError;
use crate::session::Session;

/// Name of the terminal stage that renders pipeline values to the sink.
pub const OUT_DEFAULT: &str = "out-default";

// ──────────────────────────────────────────────────────────
// write — emit arguments as a text value
// ──────────────────────────────────────────────────────────

pub(super) struct WriteCmd;

impl Command for WriteCmd {
    fn run(
        &self,
        _session: &mut Session,
        input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let mut values = input;
        values.push(Value::Text(args.join(" ")));
        Ok(StageOutput::values(values))
    }
}

// ──────────────────────────────────────────────────────────
// out-default — render incoming values to the host sink
// ──────────────────────────────────────────────────────────

pub(super) struct OutDefaultCmd;

impl Command for OutDefaultCmd {
    fn run(
        &self,
        session: &mut Session,
        input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        if !args.is_empty() {
            return Err(HostError::usage(OUT_DEFAULT, ""));
        }
        let ui = session.host().ui().clone();
        for value in &input {
            ui.borrow_mut().write_line(&value.to_string());
        }
        Ok(StageOutput::none())
    }
}
