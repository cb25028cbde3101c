//! Built in commands. Each one is a plain function plus the signature the
//! invoker checks before calling it.

pub mod arith;
pub mod convert;
pub mod from_file;
pub mod seq;

use std::vec::IntoIter;

use eel_core::{EelError, EelResult, Value};

use crate::interface::{Command, CommandRegistry};

pub const COMMANDS: &[Command] = &[
    arith::ARITH,
    arith::COMP,
    arith::NOT,
    convert::TO_NUM,
    convert::TO_STR,
    convert::TO_BOOL,
    convert::TO_LIST,
    convert::TO_DICT,
    seq::LEN,
    seq::CONTAINS,
    from_file::FROM_FILE,
];

/// Registry with every built in command.
pub fn registry() -> EelResult<CommandRegistry> {
    let mut reg = CommandRegistry::new();
    for cmd in COMMANDS {
        reg.register(*cmd)?;
    }
    log::debug!("registered {} commands", COMMANDS.len());
    Ok(reg)
}

/// Pulls the next validated argument. Missing required ones were already
/// rejected by the invoker, so running out here is an internal fault.
fn next_arg(args: &mut IntoIter<Value>, cmd: &str, name: &str) -> EelResult<Value> {
    args.next()
        .ok_or_else(|| EelError::Internal(format!("{cmd}: argument {name} was not supplied")))
}
