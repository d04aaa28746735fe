//! Shell-level error kinds, spec §7.
//!
//! Lex and parse errors are reported to stderr and discard the offending
//! line; resolve and open errors abort the pipeline before any stage
//! starts. `Runtime` and `History` don't abort anything — a builtin's
//! runtime failure (e.g. `cd` into a missing directory) is reported on
//! the builtin's own stderr target and surfaces only as a non-zero exit
//! code, and a history load/write IO failure leaves history state
//! otherwise consistent — but both still go through this enum so their
//! diagnostic wording lives in one place rather than being hand-formatted
//! at each call site. External-process failures are not represented here
//! at all: a child reports through its own stderr and exit status, which
//! the shell deliberately does not interpret (spec §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Lex(#[from] crate::parser::LexError),

    #[error("{0}")]
    Parse(#[from] crate::parser::ParseError),

    #[error("{0}: not found")]
    Resolve(String),

    #[error("{0}")]
    Open(#[from] std::io::Error),

    #[error("{0}")]
    Runtime(String),

    #[error("history: {0}")]
    History(String),
}
