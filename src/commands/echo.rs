//! `echo`: write the space-joined args plus a trailing newline (spec §4.7).
//! No flag parsing for this core.

use super::BuiltinContext;
use std::io::{Read, Write};

pub fn run(args: &[String], _stdin: &mut dyn Read, stdout: &mut dyn Write, _stderr: &mut dyn Write, _ctx: &BuiltinContext) -> i32 {
    let _ = writeln!(stdout, "{}", args.join(" "));
    0
}
