//! The interactive shell: REPL loop, startup config, and variable
//! expansion (spec §4.9, §6).

pub mod env;
pub mod rcfile;
pub mod repl;

pub use env::{expand_cd_target, expand_vars};
