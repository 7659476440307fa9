//! Execution engine surface: values, commands, and pipelines
//!
//! A `Pipeline` is one statement's unit of work: an ordered list of stages
//! (script fragments and named stages) invoked against a session. Stages
//! pass values downstream; the terminal stage is expected to render
//! whatever reaches it.

use std::fmt;
use std::rc::Rc;

use crate::error::{ErrorKind, HostError};
use crate::parser::{self, Fragment};
use crate::session::Session;

/// A value flowing between pipeline stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Output of one pipeline stage: values passed downstream plus any
/// non-terminating error records collected along the way.
pub struct StageOutput {
    pub values: Vec<Value>,
    pub errors: Vec<HostError>,
}

impl StageOutput {
    /// No values, no errors.
    pub fn none() -> Self {
        Self {
            values: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Values only.
    pub fn values(values: Vec<Value>) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }

    /// A single non-terminating error record.
    pub fn error(error: HostError) -> Self {
        Self {
            values: Vec::new(),
            errors: vec![error],
        }
    }
}

/// A command that can be executed as a pipeline stage.
///
/// `input` carries the values produced by the preceding stage; most
/// commands ignore it. Returning `Err` terminates the pipeline; recording
/// errors in [`StageOutput::errors`] lets the pipeline finish in the
/// failed state without aborting later stages.
pub trait Command {
    fn run(
        &self,
        session: &mut Session,
        input: Vec<Value>,
        args: &[String],
    ) -> Result<StageOutput, HostError>;
}

/// A command shared between an initial state and the sessions built from it
pub type SharedCommand = Rc<dyn Command>;

/// Completion state of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Not yet invoked
    NotStarted,
    /// Invoked; every stage ran without raising or recording an error
    Completed,
    /// Invoked; a stage raised a failure or recorded error entries
    Failed,
}

enum Stage {
    /// A script fragment, parsed and dispatched on invocation
    Script(String),
    /// A registered command invoked by name, with no arguments
    Command(String),
}

/// One statement's unit of work, bound to its session for the duration of
/// a single invocation.
pub struct Pipeline<'s> {
    session: &'s mut Session,
    stages: Vec<Stage>,
    state: PipelineState,
    errors: Vec<HostError>,
}

impl<'s> Pipeline<'s> {
    pub(crate) fn new(session: &'s mut Session) -> Self {
        Self {
            session,
            stages: Vec::new(),
            state: PipelineState::NotStarted,
            errors: Vec::new(),
        }
    }

    /// Append a script fragment stage.
    pub fn add_script(&mut self, text: &str) {
        self.stages.push(Stage::Script(text.to_string()));
    }

    /// Append a named stage resolved from the session's command registry.
    pub fn add_command(&mut self, name: &str) {
        self.stages.push(Stage::Command(name.to_string()));
    }

    /// Run every stage in order, feeding each stage's values into the next.
    ///
    /// A raised failure stops the pipeline and is returned to the caller;
    /// error records collected by completed stages are kept either way and
    /// can be drained afterwards.
    pub fn invoke(&mut self) -> Result<(), HostError> {
        if !self.session.is_open() {
            self.state = PipelineState::Failed;
            return Err(HostError::new(
                ErrorKind::SessionNotOpen,
                "session is not open",
            ));
        }

        let stages = std::mem::take(&mut self.stages);
        let mut values = Vec::new();
        let mut raised = Ok(());

        for stage in &stages {
            match self.run_stage(stage, std::mem::take(&mut values)) {
                Ok(output) => {
                    values = output.values;
                    self.errors.extend(output.errors);
                }
                Err(error) => {
                    raised = Err(error);
                    break;
                }
            }
        }

        self.state = if raised.is_err() || !self.errors.is_empty() {
            PipelineState::Failed
        } else {
            PipelineState::Completed
        };
        raised
    }

    /// Completion state of the last invocation.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Take the error records collected during invocation, in order.
    pub fn drain_errors(&mut self) -> Vec<HostError> {
        std::mem::take(&mut self.errors)
    }

    fn run_stage(&mut self, stage: &Stage, input: Vec<Value>) -> Result<StageOutput, HostError> {
        match stage {
            Stage::Script(text) => self.run_script(text, input),
            Stage::Command(name) => {
                let command = self.session.command(name).ok_or_else(|| {
                    HostError::new(
                        ErrorKind::UnknownCommand,
                        format!("unknown command: {}", name),
                    )
                })?;
                command.run(self.session, input, &[])
            }
        }
    }

    fn run_script(&mut self, text: &str, input: Vec<Value>) -> Result<StageOutput, HostError> {
        let statement = match parser::parse_statement(text) {
            Ok(Some(statement)) => statement,
            // Blank statements produce nothing; pass the input through
            Ok(None) => return Ok(StageOutput::values(input)),
            Err(error) => return Err(HostError::syntax(error.message)),
        };

        let command = self.session.command(&statement.command).ok_or_else(|| {
            HostError::new(
                ErrorKind::UnknownCommand,
                format!("unknown command: {}", statement.command),
            )
        })?;

        let args = expand_args(self.session, &statement.raw_args);
        command
            .run(self.session, input, &args)
            .map_err(|error| error.with_command(statement.command.as_str()))
    }
}

/// Expand arguments from raw fragments: quoted fragments are emitted
/// verbatim, unquoted fragments have session variables expanded.
pub fn expand_args(session: &Session, raw_args: &[Vec<Fragment>]) -> Vec<String> {
    let mut args = Vec::with_capacity(raw_args.len());
    for fragments in raw_args {
        let mut buf = String::new();
        for fragment in fragments {
            if fragment.quoted {
                buf.push_str(&fragment.text);
            } else {
                buf.push_str(&parser::expand(&fragment.text, &|name| {
                    session.variable(name).map(|value| value.to_string())
                }));
            }
        }
        args.push(buf);
    }
    args
}
