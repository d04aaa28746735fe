//! Lifts a token stream into an ordered, non-empty `Vec<Command>`
//! (a pipeline), resolving redirection operators to fd numbers and
//! splitting on pipe tokens. See spec §4.3.

use crate::ast::{Command, Redirection, TokenKind};
use crate::parser::lexer::{LexError, Lexer};
use thiserror::Error;

/// A parse-time error: a malformed pipeline or redirection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("empty pipeline stage")]
    EmptyStage,
    #[error("missing command name before redirection operator `{0}`")]
    MissingCommandName(String),
    #[error("missing operand for redirection operator `{0}`")]
    MissingOperand(String),
    #[error("unknown redirection operator `{0}`")]
    UnknownOperator(String),
}

/// Map a redirection operator's literal text to (fd, append_only).
fn classify_operator(op: &str) -> Result<(i32, bool), ParseError> {
    match op {
        "<" => Ok((0, false)),
        ">" | "1>" => Ok((1, false)),
        "2>" => Ok((2, false)),
        ">>" | "1>>" => Ok((1, true)),
        "2>>" => Ok((2, true)),
        other => Err(ParseError::UnknownOperator(other.to_string())),
    }
}

/// Parse one `|`-delimited segment of the token stream (from just after
/// the previous `|`, or the start of input, up to the next `|` or EOF)
/// into a single `Command`.
fn parse_stage(tokens: &[crate::ast::Token]) -> Result<Command, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyStage);
    }

    let mut iter = tokens.iter();
    let first = iter.next().expect("checked non-empty above");
    if first.kind != TokenKind::Word {
        return Err(ParseError::MissingCommandName(first.value.clone()));
    }
    let mut command = Command::new(first.value.clone());

    while let Some(tok) = iter.next() {
        match tok.kind {
            TokenKind::Word => command.args.push(tok.value.clone()),
            TokenKind::Redir => {
                let (fd, append_only) = classify_operator(&tok.value)?;
                let filename = match iter.next() {
                    Some(w) if w.kind == TokenKind::Word => w.value.clone(),
                    _ => return Err(ParseError::MissingOperand(tok.value.clone())),
                };
                command.set_redir(fd, Redirection::new(filename, append_only));
            }
            TokenKind::Pipe => unreachable!("pipe tokens are split out before parse_stage"),
        }
    }

    Ok(command)
}

/// Parse a full line into a pipeline: lex it, split the token stream on
/// `|`, and parse each non-empty segment into a `Command`.
pub fn parse(line: &str) -> Result<Vec<Command>, ParseError> {
    let tokens: Vec<_> = Lexer::new(line).collect::<Result<_, LexError>>()?;

    let mut stages: Vec<Vec<crate::ast::Token>> = vec![Vec::new()];
    for tok in tokens {
        if tok.kind == TokenKind::Pipe {
            stages.push(Vec::new());
        } else {
            stages.last_mut().expect("always at least one stage").push(tok);
        }
    }

    stages.into_iter().map(|stage| parse_stage(&stage)).collect()
}
