//! script-host: a scripting-host harness for tests
//!
//! # Overview
//!
//! This crate drives a sequence of script statements through an embeddable
//! command-execution engine and captures everything a real interactive
//! host would have displayed (normal output and error lines) into a
//! single in-memory log for assertion.
//!
//! Each batch runs against one fresh, isolated session. Every statement
//! becomes its own unit of work (the statement plus a terminal
//! `out-default` render stage); a failing statement is reported as error
//! lines in the log and the batch carries on, unless the statement
//! explicitly requested termination.
//!
//! ```
//! let log = script_host::execute(&["write 'a'", "write 'b'"]).unwrap();
//! assert_eq!(log, "a\nb\n");
//! ```
//!
//! # Statement Syntax
//!
//! ```text
//! write 'hello world'     # single quotes keep words together
//! set NAME value          # session variable
//! write $NAME             # $NAME / ${NAME} expand outside quotes
//! exit 3                  # request batch termination
//! ```
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `write` | Emit arguments as one text value |
//! | `set` | Set a session variable |
//! | `get` | Emit a variable's value |
//! | `vars` | List variables, optionally regex-filtered |
//! | `error` | Record a non-terminating error |
//! | `throw` | Raise a terminating failure |
//! | `exit` | Request batch termination |
//! | `out-default` | Render incoming values to the sink |

mod commands;
mod engine;
mod error;
mod host;
mod parser;
mod runner;
mod session;
mod ui;

pub use commands::{default_commands, OUT_DEFAULT};
pub use engine::{expand_args, Command, Pipeline, PipelineState, SharedCommand, StageOutput, Value};
pub use error::{ErrorKind, HostError};
pub use host::Host;
pub use parser::{expand, parse_statement, Fragment, ParseError, Statement};
pub use runner::{execute, ExecuteOptions, ScriptHost, HOST_NAME};
pub use session::{InitialState, Session, HOST_VARIABLE};
pub use ui::{ErrorLineHandler, HostUi, SharedUi};
