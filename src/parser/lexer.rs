//! Character-class driven state machine lexer.
//!
//! Converts a raw input line into a stream of `Token`s (words, redirection
//! operators, and pipe separators), honoring single-quote (fully literal),
//! double-quote (partially-escaping), and unquoted-backslash escaping, and
//! recognizing IO redirection operators with an optional leading
//! fd-number digit. See spec §4.2 for the exact state table this
//! implements.

use crate::ast::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// A lexical error: an unterminated quote or a dangling escape at EOF.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("unexpected end of input after `\\`")]
    DanglingEscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InWord,
    SQuoted,
    DQuoted,
    DQuotedEscape,
    Escape,
    Redir,
}

fn is_redir_byte(c: char) -> bool {
    c == '<' || c == '>'
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// A lazy, single-pushback-slot tokenizer over an input line.
///
/// The only lookahead the grammar needs is one rune (to decide whether a
/// leading digit belongs to a redirection operator, and to unread the byte
/// that terminates an in-progress word), so a single-slot peek buffer
/// suffices; the lexer never indexes the input at random.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pushback: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { chars: input.chars().peekable(), pushback: None }
    }

    fn bump(&mut self) -> Option<char> {
        if let Some(c) = self.pushback.take() {
            return Some(c);
        }
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        if let Some(c) = self.pushback {
            return Some(c);
        }
        self.chars.peek().copied()
    }

    fn unread(&mut self, c: char) {
        debug_assert!(self.pushback.is_none());
        self.pushback = Some(c);
    }

    /// Scan the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        let mut state = State::Start;
        let mut value = String::new();

        loop {
            let c = self.bump();
            match state {
                State::Start => match c {
                    None => return None,
                    Some(c) if is_space(c) => continue,
                    Some('|') => return Some(Ok(Token::new("|", TokenKind::Pipe))),
                    Some('\'') => state = State::SQuoted,
                    Some('"') => state = State::DQuoted,
                    Some('\\') => state = State::Escape,
                    Some(c) if is_redir_byte(c) => {
                        value.push(c);
                        state = State::Redir;
                    }
                    Some(c) if c.is_ascii_digit() => {
                        // Only a single digit immediately before `>` joins
                        // the redirection operator; otherwise it is just
                        // the start of an ordinary word.
                        if self.peek() == Some('>') {
                            value.push(c);
                            value.push(self.bump().unwrap());
                            state = State::Redir;
                        } else {
                            value.push(c);
                            state = State::InWord;
                        }
                    }
                    Some(c) => {
                        value.push(c);
                        state = State::InWord;
                    }
                },
                State::InWord => match c {
                    None => return Some(Ok(Token::new(value, TokenKind::Word))),
                    Some(c) if is_space(c) => {
                        return Some(Ok(Token::new(value, TokenKind::Word)))
                    }
                    Some('|') => {
                        self.unread('|');
                        return Some(Ok(Token::new(value, TokenKind::Word)));
                    }
                    Some(c) if is_redir_byte(c) => {
                        self.unread(c);
                        return Some(Ok(Token::new(value, TokenKind::Word)));
                    }
                    Some('\'') => state = State::SQuoted,
                    Some('"') => state = State::DQuoted,
                    Some('\\') => state = State::Escape,
                    Some(c) => value.push(c),
                },
                State::SQuoted => match c {
                    None => return Some(Err(LexError::UnterminatedQuote)),
                    Some('\'') => state = State::InWord,
                    Some(c) => value.push(c),
                },
                State::DQuoted => match c {
                    None => return Some(Err(LexError::UnterminatedQuote)),
                    Some('"') => state = State::InWord,
                    Some('\\') => state = State::DQuotedEscape,
                    Some(c) => value.push(c),
                },
                State::DQuotedEscape => match c {
                    None => return Some(Err(LexError::UnterminatedQuote)),
                    Some(c @ ('"' | '\\' | '$')) => {
                        value.push(c);
                        state = State::DQuoted;
                    }
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                        state = State::DQuoted;
                    }
                },
                State::Escape => match c {
                    None => return Some(Err(LexError::DanglingEscape)),
                    Some(c) => {
                        value.push(c);
                        state = State::InWord;
                    }
                },
                State::Redir => match c {
                    Some(c) if is_redir_byte(c) => value.push(c),
                    Some(c) => {
                        self.unread(c);
                        return Some(Ok(Token::new(value, TokenKind::Redir)));
                    }
                    None => return Some(Ok(Token::new(value, TokenKind::Redir))),
                },
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(input).collect()
    }

    fn words(input: &str) -> Vec<String> {
        lex(input)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn single_quotes_are_fully_literal() {
        assert_eq!(words("echo 'hello     world'"), vec!["echo", "hello     world"]);
    }

    #[test]
    fn single_quotes_preserve_backslash_and_double_quote() {
        assert_eq!(words(r#"echo '\"$x'"#), vec!["echo", r#"\"$x"#]);
    }

    #[test]
    fn double_quotes_unescape_quote_backslash_dollar() {
        assert_eq!(words(r#"echo "a\"b" "c\\d" "e$f""#), vec!["echo", "a\"b", "c\\d", "e$f"]);
    }

    #[test]
    fn double_quotes_preserve_backslash_before_other_chars() {
        assert_eq!(words(r#""a\nb""#), vec!["a\\nb"]);
    }

    #[test]
    fn unquoted_backslash_escapes_one_byte() {
        assert_eq!(words(r"foo\ bar"), vec!["foo bar"]);
    }

    #[test]
    fn adjacent_fragments_concatenate_into_one_word() {
        assert_eq!(words(r#"foo'bar'"baz"qux"#), vec!["foobarbazqux"]);
    }

    #[test]
    fn unterminated_single_quote_is_an_error() {
        assert_eq!(lex("echo 'abc"), Err(LexError::UnterminatedQuote));
    }

    #[test]
    fn unterminated_double_quote_is_an_error() {
        assert_eq!(lex(r#"echo "abc"#), Err(LexError::UnterminatedQuote));
    }

    #[test]
    fn dangling_escape_at_eof_is_an_error() {
        assert_eq!(lex(r"echo \"), Err(LexError::DanglingEscape));
    }

    #[test]
    fn redirection_operators_are_recognized() {
        let toks = lex("echo hi > out").unwrap();
        assert_eq!(toks[2].kind, TokenKind::Redir);
        assert_eq!(toks[2].value, ">");
    }

    #[test]
    fn digit_prefixed_redirections() {
        for op in ["1>", "2>", "1>>", "2>>", "<", ">>"] {
            let line = format!("cmd {}file", op);
            let toks = lex(&line).unwrap();
            assert_eq!(toks[1].kind, TokenKind::Redir, "op={op}");
            assert_eq!(toks[1].value, op, "op={op}");
        }
    }

    #[test]
    fn two_digit_prefix_does_not_join_the_operator() {
        let toks = lex("cmd 12>file").unwrap();
        assert_eq!(toks[1].value, "12");
        assert_eq!(toks[1].kind, TokenKind::Word);
        assert_eq!(toks[2].value, ">");
        assert_eq!(toks[2].kind, TokenKind::Redir);
    }

    #[test]
    fn pipe_is_its_own_token_and_splits_words() {
        let toks = lex("echo hi|cat").unwrap();
        let kinds: Vec<_> = toks.iter().map(|t| (t.value.as_str(), t.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("echo", TokenKind::Word),
                ("hi", TokenKind::Word),
                ("|", TokenKind::Pipe),
                ("cat", TokenKind::Word),
            ]
        );
    }

    #[test]
    fn trailing_redir_without_filename_is_not_a_lex_error() {
        assert!(lex("echo hi >").is_ok());
    }
}
