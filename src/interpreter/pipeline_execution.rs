//! The pipeline executor (spec §4.6): resolves each stage, wires real
//! anonymous pipes between adjacent stages, starts every stage left to
//! right, and waits for every stage left to right, returning the last
//! stage's exit code.
//!
//! Grounded in `gosh`'s `ExecuteCommand` (`original_source/app/execute.go`):
//! the same three-phase shape (build executables, start all, wait all),
//! with `os.Pipe()` replaced by a raw `libc::pipe()` call wrapped in
//! `std::fs::File` so that Rust's `Drop` closes each end exactly once —
//! the resource-owner guarantee spec §4.5/§9 calls for, obtained for free
//! instead of the source's explicit `Do(openFiles, file.Close)` pass.

use crate::ast::{Command, Pipeline};
use crate::commands::{self, BuiltinContext};
use crate::interpreter::command_resolution::{is_builtin, resolve_external};
use crate::interpreter::executable::{self, Executable, Started};
use crate::interpreter::redirections::{has_explicit_redir, resolve_fd, IoHandle};
use crate::interpreter::ShellError;
use std::fs::File;
use std::io;
use std::os::unix::io::FromRawFd;

fn create_pipe() -> io::Result<(File, File)> {
    let mut fds = [0i32; 2];
    // `pipe2` with `O_CLOEXEC` rather than plain `pipe`: without it, the
    // raw fds survive into every external child this process later
    // forks, not just the two stages they're wired to, so a downstream
    // external stage forked while an earlier stage's pipe end is still
    // open inherits its own stray copy of the write end and never sees
    // EOF on its stdin.
    if unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `libc::pipe` succeeded and handed back two freshly opened,
    // uniquely owned descriptors; wrapping each in a `File` transfers
    // ownership so it is closed exactly once, on drop.
    let read_end = unsafe { File::from_raw_fd(fds[0]) };
    let write_end = unsafe { File::from_raw_fd(fds[1]) };
    Ok((read_end, write_end))
}

fn build_executable(command: &Command) -> Result<Executable, ShellError> {
    if is_builtin(&command.name) {
        let func = commands::dispatch(&command.name).expect("is_builtin implies dispatch succeeds");
        Ok(Executable::builtin(func, command.args.clone()))
    } else if let Some(path) = resolve_external(&command.name) {
        Ok(Executable::external(&path, &command.name, &command.args))
    } else {
        Err(ShellError::Resolve(command.name.clone()))
    }
}

/// Run `pipeline` to completion and return the exit code of its last
/// stage. Stage-construction or redirection-open failures abort before
/// any stage starts; everything already opened is released by `Drop`
/// when this function returns.
pub fn run_pipeline(pipeline: &Pipeline, ctx: BuiltinContext, runtime: &tokio::runtime::Handle) -> Result<i32, ShellError> {
    let n = pipeline.len();
    let mut executables: Vec<Executable> = pipeline.iter().map(build_executable).collect::<Result<_, _>>()?;

    for (i, command) in pipeline.iter().enumerate() {
        executables[i].set_stderr(resolve_fd(command, 2)?);

        if i == 0 || has_explicit_redir(command, 0) {
            executables[i].set_stdin(resolve_fd(command, 0)?);
        }
        if i == n - 1 || has_explicit_redir(command, 1) {
            executables[i].set_stdout(resolve_fd(command, 1)?);
        }
    }

    for i in 0..n.saturating_sub(1) {
        let (read_end, write_end) = create_pipe()?;
        if has_explicit_redir(&pipeline[i], 1) {
            drop(write_end);
        } else {
            executables[i].set_stdout(IoHandle::File(write_end));
        }
        if has_explicit_redir(&pipeline[i + 1], 0) {
            drop(read_end);
        } else {
            executables[i + 1].set_stdin(IoHandle::File(read_end));
        }
    }

    let mut started: Vec<Started> = Vec::with_capacity(n);
    for exe in executables {
        started.push(executable::start(exe, runtime, ctx.clone())?);
    }

    let mut status = 0;
    for stage in started {
        status = executable::wait(stage, runtime);
    }
    Ok(status)
}
