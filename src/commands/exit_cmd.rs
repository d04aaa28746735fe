//! `exit`: flush unsaved history to `$HISTFILE` if set, then terminate the
//! process with status 0 (spec §4.7).
//!
//! Grounded in `gosh`'s `exitBuiltin` (`original_source/app/command.go`),
//! which calls `os.Exit(0)` directly from the builtin's background
//! goroutine rather than signaling the caller to unwind — the same choice
//! here, via `std::process::exit`, since there is no cleanup above this
//! call that the spec requires to run (raw-mode restoration is the
//! REPL's own `Drop` guard, already unwound by the time a committed line
//! reaches a builtin).

use super::BuiltinContext;
use std::io::{Read, Write};

/// The history-flush side effect, factored out so it can be exercised
/// without actually terminating the process.
pub fn flush_history(ctx: &BuiltinContext) {
    crate::history::flush_if_configured(&ctx.history);
}

pub fn run(_args: &[String], _stdin: &mut dyn Read, _stdout: &mut dyn Write, _stderr: &mut dyn Write, ctx: &BuiltinContext) -> i32 {
    flush_history(ctx);
    std::process::exit(0);
}
