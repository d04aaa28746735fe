//! Token, Redirection, Command, and Pipeline: the shapes produced by the
//! lexer and parser and consumed by the executor.

use std::collections::HashMap;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Redir,
    Pipe,
}

/// An immutable (value, kind) pair produced by the lexer.
///
/// `Redir` values are the literal operator text (`<`, `>`, `>>`, `1>`,
/// `2>`, `1>>`, `2>>`); the parser, not the lexer, maps these to fd numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind) -> Self {
        Self { value: value.into(), kind }
    }
}

/// A sentinel filename meaning "inherit the corresponding standard
/// descriptor" rather than opening a real file.
pub fn is_std_sentinel(filename: &str) -> bool {
    matches!(filename, "/dev/stdin" | "/dev/stdout" | "/dev/stderr")
}

/// A single fd redirection: where it points, and whether writes append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub filename: String,
    pub append_only: bool,
}

impl Redirection {
    pub fn new(filename: impl Into<String>, append_only: bool) -> Self {
        Self { filename: filename.into(), append_only }
    }

    /// A redirection that inherits the host's standard descriptor `fd`.
    pub fn inherit(fd: i32) -> Self {
        let name = match fd {
            0 => "/dev/stdin",
            1 => "/dev/stdout",
            _ => "/dev/stderr",
        };
        Self::new(name, false)
    }

    pub fn is_sentinel(&self) -> bool {
        is_std_sentinel(&self.filename)
    }
}

/// One pipeline stage: a command name, its argument vector, and any
/// redirections keyed by fd number (0, 1, or 2 only).
///
/// A later redirection for the same fd overrides an earlier one
/// (last-writer-wins); `redirs` therefore only ever holds at most one
/// entry per fd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
    pub redirs: HashMap<i32, Redirection>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new(), redirs: HashMap::new() }
    }

    /// Install a redirection for `fd`, replacing any earlier one.
    pub fn set_redir(&mut self, fd: i32, redir: Redirection) {
        self.redirs.insert(fd, redir);
    }

    pub fn redir_for(&self, fd: i32) -> Redirection {
        self.redirs.get(&fd).cloned().unwrap_or_else(|| Redirection::inherit(fd))
    }
}

/// An ordered, non-empty sequence of commands connected stdout-to-stdin.
pub type Pipeline = Vec<Command>;
