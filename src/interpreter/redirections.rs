//! Opens and owns the concrete file handles backing a Command's fd
//! redirections (spec §4.5).
//!
//! Grounded in `gosh`'s `SetIO`/`openFile` (`original_source/app/file.go`):
//! sentinel filenames mean "inherit", real targets are opened with
//! create/mode-0o644 plus truncate-or-append. Closure is handled for free
//! by Rust's `Drop` rather than the explicit resource-owner scope the
//! design notes call for in languages without RAII: an `IoHandle::File`
//! closes its fd exactly once, automatically, whichever way the pipeline
//! invocation returns; sentinels never own an fd and so are never closed.

use crate::ast::Command;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::OpenOptionsExt;

/// Which standard descriptor an `IoHandle::Inherit` stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdFd {
    In,
    Out,
    Err,
}

/// A resolved fd source/sink: either "inherit the host's corresponding
/// standard descriptor" or a real, owned file (which may itself be a pipe
/// end — see `interpreter::pipeline_execution`).
pub enum IoHandle {
    Inherit(StdFd),
    File(File),
}

impl IoHandle {
    pub fn into_stdio(self) -> std::process::Stdio {
        match self {
            IoHandle::Inherit(_) => std::process::Stdio::inherit(),
            IoHandle::File(f) => std::process::Stdio::from(f),
        }
    }

    pub fn into_reader(self) -> Box<dyn Read + Send> {
        match self {
            IoHandle::Inherit(_) => Box::new(io::stdin()),
            IoHandle::File(f) => Box::new(f),
        }
    }

    pub fn into_writer(self) -> Box<dyn Write + Send> {
        match self {
            IoHandle::Inherit(StdFd::Err) => Box::new(io::stderr()),
            IoHandle::Inherit(_) => Box::new(io::stdout()),
            IoHandle::File(f) => Box::new(f),
        }
    }
}

fn std_fd_for(fd: i32) -> StdFd {
    match fd {
        0 => StdFd::In,
        1 => StdFd::Out,
        _ => StdFd::Err,
    }
}

/// Resolve the concrete `IoHandle` for fd `fd` (0, 1, or 2) of `command`:
/// open its explicit redirection target if any, honoring append-vs-truncate
/// and the 0o644 create mode, or fall back to "inherit" for the sentinel
/// filenames and for fds the user never redirected.
pub fn resolve_fd(command: &Command, fd: i32) -> io::Result<IoHandle> {
    let redir = command.redir_for(fd);
    if redir.is_sentinel() {
        return Ok(IoHandle::Inherit(std_fd_for(fd)));
    }

    let mut opts = OpenOptions::new();
    if fd == 0 {
        opts.read(true);
    } else {
        opts.write(true).create(true).mode(0o644);
        if redir.append_only {
            opts.append(true);
        } else {
            opts.truncate(true);
        }
    }
    let file = opts.open(&redir.filename)?;
    Ok(IoHandle::File(file))
}

/// Whether `command` has an explicit user redirection for `fd` (as
/// opposed to the default "inherit" the executor would otherwise apply
/// for an inter-stage pipe).
pub fn has_explicit_redir(command: &Command, fd: i32) -> bool {
    command.redirs.contains_key(&fd)
}
