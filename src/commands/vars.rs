//! Session variable commands: set, get, vars

use crate::engine::{Command, StageOutput, Value};
use crate::error::{ErrorKind, HostError};
use crate::session::Session;

// ──────────────────────────────────────────────────────────
// set — set a session variable
// ──────────────────────────────────────────────────────────

pub(super) struct SetCmd;

impl Command for SetCmd {
    fn run(
        &self,
        session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let (name, text) = match args {
            [name, value] => (name, value),
            _ => return Err(HostError::usage("set", "NAME VALUE")),
        };
        let value = match text.parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(text.clone()),
        };
        session.set_variable(name.clone(), value);
        Ok(StageOutput::none())
    }
}

// ──────────────────────────────────────────────────────────
// get — emit a variable's value
// ──────────────────────────────────────────────────────────

pub(super) struct GetCmd;

impl Command for GetCmd {
    fn run(
        &self,
        session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let name = match args {
            [name] => name,
            _ => return Err(HostError::usage("get", "NAME")),
        };
        match session.variable(name) {
            Some(value) => Ok(StageOutput::values(vec![value.clone()])),
            // An unset variable is reported, not raised: the pipeline
            // finishes in the failed state and the batch moves on.
            None => Ok(StageOutput::error(HostError::new(
                ErrorKind::UndefinedVariable,
                format!("variable is not defined: {}", name),
            ))),
        }
    }
}

// ──────────────────────────────────────────────────────────
// vars — list session variables
// ──────────────────────────────────────────────────────────

pub(super) struct VarsCmd;

impl Command for VarsCmd {
    fn run(
        &self,
        session: &mut Session,
        _input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError> {
        let pattern = match args {
            [] => None,
            [pattern] => {
                let re = regex::Regex::new(pattern)
                    .map_err(|error| HostError::syntax(format!("invalid pattern: {}", error)))?;
                Some(re)
            }
            _ => return Err(HostError::usage("vars", "[pattern]")),
        };

        let mut names: Vec<&String> = session
            .variables()
            .keys()
            .filter(|name| pattern.as_ref().map_or(true, |re| re.is_match(name.as_str())))
            .collect();
        names.sort();

        let values = names
            .into_iter()
            .map(|name| {
                let value = &session.variables()[name];
                Value::Text(format!("{}={}", name, value))
            })
            .collect();
        Ok(StageOutput::values(values))
    }
}
