//! `type name…`: classify each name independently (spec §4.7).

use super::BuiltinContext;
use crate::interpreter::command_resolution::{is_builtin, resolve_external};
use std::io::{Read, Write};

pub fn run(args: &[String], _stdin: &mut dyn Read, stdout: &mut dyn Write, stderr: &mut dyn Write, _ctx: &BuiltinContext) -> i32 {
    let mut status = 0;
    for name in args {
        let name = name.trim();
        if is_builtin(name) {
            let _ = writeln!(stdout, "{} is a shell builtin", name);
        } else if let Some(path) = resolve_external(name) {
            let _ = writeln!(stdout, "{} is {}", name, path);
        } else {
            let _ = writeln!(stderr, "{}: not found", name);
            status = 1;
        }
    }
    status
}
