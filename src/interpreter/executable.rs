//! The tagged "runnable thing" abstraction unifying builtin and external
//! pipeline stages (spec §9): `set_stdin`/`set_stdout`/`set_stderr` per
//! variant, then `start` (non-blocking) and `wait` (blocks for the exit
//! code).
//!
//! Grounded in `gosh`'s `Executable` interface and its two implementors
//! (`original_source/app/command.go`): `ExternalCommand` wraps `exec.Cmd`,
//! `BuiltinCommand` runs the builtin body on a goroutine and signals
//! completion over a one-shot channel. This core uses
//! `tokio::task::spawn_blocking` plus a `tokio::sync::oneshot` channel in
//! place of the goroutine/channel pair (spec §5, §9), since the builtin
//! body does blocking `Read`/`Write` IO rather than async IO.

use crate::commands::{self, BuiltinContext};
use crate::interpreter::redirections::IoHandle;
use std::io::{Read, Write};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command as ProcessCommand, Stdio};
use tokio::sync::oneshot;

/// A pipeline stage not yet started: either a builtin body awaiting its
/// final IO handles, or an external command awaiting `Stdio` assignment.
pub enum Executable {
    Builtin {
        func: commands::BuiltinFn,
        args: Vec<String>,
        stdin: Option<Box<dyn Read + Send>>,
        stdout: Option<Box<dyn Write + Send>>,
        stderr: Option<Box<dyn Write + Send>>,
    },
    External {
        command: ProcessCommand,
        stdin: Option<Stdio>,
        stdout: Option<Stdio>,
        stderr: Option<Stdio>,
    },
}

impl Executable {
    pub fn builtin(func: commands::BuiltinFn, args: Vec<String>) -> Self {
        Executable::Builtin { func, args, stdin: None, stdout: None, stderr: None }
    }

    pub fn external(path: &str, name: &str, args: &[String]) -> Self {
        let mut command = ProcessCommand::new(path);
        command.arg0(name);
        command.args(args);
        Executable::External { command, stdin: None, stdout: None, stderr: None }
    }

    pub fn set_stdin(&mut self, handle: IoHandle) {
        match self {
            Executable::Builtin { stdin, .. } => *stdin = Some(handle.into_reader()),
            Executable::External { stdin, .. } => *stdin = Some(handle.into_stdio()),
        }
    }

    pub fn set_stdout(&mut self, handle: IoHandle) {
        match self {
            Executable::Builtin { stdout, .. } => *stdout = Some(handle.into_writer()),
            Executable::External { stdout, .. } => *stdout = Some(handle.into_stdio()),
        }
    }

    pub fn set_stderr(&mut self, handle: IoHandle) {
        match self {
            Executable::Builtin { stderr, .. } => *stderr = Some(handle.into_writer()),
            Executable::External { stderr, .. } => *stderr = Some(handle.into_stdio()),
        }
    }
}

/// A started stage awaiting `wait`.
pub enum Started {
    Builtin(oneshot::Receiver<i32>),
    External(Box<Child>),
}

/// Start `executable`, handing any unset stdio slots the host's inherited
/// descriptor. Non-blocking: an external stage spawns its child; a builtin
/// stage is handed to `runtime` as a blocking task.
pub fn start(executable: Executable, runtime: &tokio::runtime::Handle, ctx: BuiltinContext) -> std::io::Result<Started> {
    match executable {
        Executable::Builtin { func, args, stdin, stdout, stderr } => {
            let mut stdin = stdin.unwrap_or_else(|| Box::new(std::io::stdin()));
            let mut stdout = stdout.unwrap_or_else(|| Box::new(std::io::stdout()));
            let mut stderr = stderr.unwrap_or_else(|| Box::new(std::io::stderr()));
            let (tx, rx) = oneshot::channel();
            runtime.spawn_blocking(move || {
                let code = func(&args, stdin.as_mut(), stdout.as_mut(), stderr.as_mut(), &ctx);
                let _ = tx.send(code);
            });
            Ok(Started::Builtin(rx))
        }
        Executable::External { mut command, stdin, stdout, stderr } => {
            command.stdin(stdin.unwrap_or_else(Stdio::inherit));
            command.stdout(stdout.unwrap_or_else(Stdio::inherit));
            command.stderr(stderr.unwrap_or_else(Stdio::inherit));
            let child = command.spawn()?;
            Ok(Started::External(Box::new(child)))
        }
    }
}

/// Block until `started` completes and return its exit code. An external
/// stage that could not be waited on, or that exited by signal, reports
/// 1 — the spec does not require the shell to interpret child failures
/// beyond the status it waits on (spec §7, ExternalFailure).
pub fn wait(started: Started, runtime: &tokio::runtime::Handle) -> i32 {
    match started {
        Started::Builtin(rx) => runtime.block_on(rx).unwrap_or(1),
        Started::External(mut child) => child
            .wait()
            .ok()
            .and_then(|status| status.code())
            .unwrap_or(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use std::sync::Arc;

    fn ctx() -> BuiltinContext {
        BuiltinContext { history: Arc::new(HistoryStore::new()) }
    }

    #[test]
    fn builtin_stage_runs_to_completion_on_the_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();
        let mut exe = Executable::builtin(commands::dispatch("echo").unwrap(), vec!["hi".to_string()]);
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out");
        exe.set_stdout(IoHandle::File(std::fs::File::create(&out_path).unwrap()));
        let started = start(exe, runtime.handle(), ctx()).unwrap();
        let code = wait(started, runtime.handle());
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "hi\n");
    }

    #[test]
    fn external_stage_runs_a_real_process() {
        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap();
        let path = crate::interpreter::command_resolution::resolve_external("true").unwrap();
        let exe = Executable::external(&path, "true", &[]);
        let started = start(exe, runtime.handle(), ctx()).unwrap();
        let code = wait(started, runtime.handle());
        assert_eq!(code, 0);
    }
}
