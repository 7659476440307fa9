//! Built-in engine commands
//!
//! The default command set a session knows when no initial state says
//! otherwise: output, variables, and flow control.

mod flow;
mod output;
mod vars;

use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::SharedCommand;

pub use output::OUT_DEFAULT;

/// Return the default set of built-in commands
pub fn default_commands() -> HashMap<String, SharedCommand> {
    let mut commands: HashMap<String, SharedCommand> = HashMap::new();
    commands.insert("write".into(), Rc::new(output::WriteCmd));
    commands.insert(OUT_DEFAULT.into(), Rc::new(output::OutDefaultCmd));
    commands.insert("set".into(), Rc::new(vars::SetCmd));
    commands.insert("get".into(), Rc::new(vars::GetCmd));
    commands.insert("vars".into(), Rc::new(vars::VarsCmd));
    commands.insert("error".into(), Rc::new(flow::ErrorCmd));
    commands.insert("throw".into(), Rc::new(flow::ThrowCmd));
    commands.insert("exit".into(), Rc::new(flow::ExitCmd));
    commands
}
