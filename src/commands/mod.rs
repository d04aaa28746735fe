//! The builtin set (spec §4.7): `pwd`, `echo`, `type`, `cd`, `exit`, `history`.
//!
//! Grounded in `gosh`'s `BuiltinRegistry` (`original_source/app/command.go`):
//! a name-to-function-pointer map rather than a trait object per builtin,
//! since every builtin has the same (args, stdin, stdout, stderr) shape and
//! none need per-instance state beyond what `BuiltinContext` already
//! carries.

mod cd;
mod echo;
mod exit_cmd;
mod history_cmd;
mod pwd;
mod type_cmd;

use crate::history::HistoryStore;
use std::io::{Read, Write};
use std::sync::Arc;

/// Shared state a builtin may need beyond its own argv and IO: the process
/// history, threaded through explicitly rather than reached via a global
/// (spec §9's "avoid hidden global state").
#[derive(Clone)]
pub struct BuiltinContext {
    pub history: Arc<HistoryStore>,
}

pub type BuiltinFn =
    fn(args: &[String], stdin: &mut dyn Read, stdout: &mut dyn Write, stderr: &mut dyn Write, ctx: &BuiltinContext) -> i32;

/// Look up the function implementing builtin `name`, or `None` if `name`
/// isn't one of the fixed builtins (see `interpreter::command_resolution`).
pub fn dispatch(name: &str) -> Option<BuiltinFn> {
    match name {
        "pwd" => Some(pwd::run),
        "echo" => Some(echo::run),
        "type" => Some(type_cmd::run),
        "cd" => Some(cd::run),
        "exit" => Some(exit_cmd::run),
        "history" => Some(history_cmd::run),
        _ => None,
    }
}
