//! `pwd`: print the current working directory (spec §4.7).

use super::BuiltinContext;
use std::io::{Read, Write};

pub fn run(_args: &[String], _stdin: &mut dyn Read, stdout: &mut dyn Write, stderr: &mut dyn Write, _ctx: &BuiltinContext) -> i32 {
    match std::env::current_dir() {
        Ok(dir) => {
            let _ = writeln!(stdout, "{}", dir.display());
            0
        }
        Err(_) => {
            let _ = writeln!(stderr, "pwd: unable to get current working directory");
            1
        }
    }
}
