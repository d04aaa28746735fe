//! Abstract syntax model shared by the lexer, parser, and executor.

pub mod types;

pub use types::*;
