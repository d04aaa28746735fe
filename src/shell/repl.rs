//! The raw-mode line editor and REPL loop (spec §4.9): character-at-a-time
//! input, history navigation, tab completion, and dispatch of committed
//! lines to the parser and pipeline executor.
//!
//! The overall loop shape — read one byte, switch on control byte, commit
//! on `\n`/`\r` by leaving raw mode for the duration of the pipeline — is
//! grounded in `gosh`'s `repl()` (`original_source/app/main.go`); raw-mode
//! entry/exit uses `nix::sys::termios` directly (as in the termios model
//! in `other_examples/c8789f75_maxgmr-tlenix__src-term-termios.rs.rs`)
//! rather than a line-editing crate like `rustyline`, since the spec's
//! completion and history-navigation algorithms are themselves the thing
//! under implementation, not delegated to a library.

use super::env;
use crate::commands::BuiltinContext;
use crate::history::HistoryStore;
use crate::interpreter::command_resolution;
use crate::trie::{longest_common_prefix, Trie};
use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg, Termios};
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Restores the terminal's original mode on drop, so a panic mid-REPL
/// still leaves the user's shell usable (spec §4.9's "guaranteed-restored
/// on exit or panic").
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    pub fn enable() -> nix::Result<Self> {
        let stdin = io::stdin();
        let original = tcgetattr(&stdin)?;
        let mut raw = original.clone();
        cfmakeraw(&mut raw);
        tcsetattr(&stdin, SetArg::TCSANOW, &raw)?;
        Ok(Self { original })
    }

    /// Temporarily return the terminal to its original (cooked) mode, for
    /// the duration of a running pipeline — so a foreground child sees
    /// normal line discipline and its own Ctrl-C handling.
    pub fn suspend(&self) {
        let stdin = io::stdin();
        let _ = tcsetattr(&stdin, SetArg::TCSANOW, &self.original);
    }

    pub fn resume(&self) -> nix::Result<()> {
        let stdin = io::stdin();
        let mut raw = self.original.clone();
        cfmakeraw(&mut raw);
        tcsetattr(&stdin, SetArg::TCSANOW, &raw)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.suspend();
    }
}

/// The result of a single tab-completion attempt against `buffer`
/// (spec §4.9's numbered algorithm), kept free of any IO so it can be
/// tested directly.
#[derive(Debug, PartialEq, Eq)]
pub enum TabOutcome {
    Bell,
    Complete(String),
    Extend(String),
    List(Vec<String>),
}

/// Compute the union of builtin and PATH-resolved completions for
/// `prefix`, then apply the LCP/disambiguation rule from spec §4.9.
pub fn tab_complete(buffer: &str, prev_keystroke_was_tab: bool) -> TabOutcome {
    let mut builtins = Trie::new();
    builtins.insert_all(command_resolution::BUILTINS);

    let mut combined: Vec<String> = builtins.search_all(buffer);
    combined.extend(command_resolution::search_by_prefix(buffer));
    combined.sort();
    combined.dedup();

    if combined.is_empty() {
        return TabOutcome::Bell;
    }
    if combined.len() == 1 {
        return TabOutcome::Complete(combined.into_iter().next().unwrap());
    }

    let lcp = longest_common_prefix(&combined);
    if lcp == buffer {
        if prev_keystroke_was_tab {
            TabOutcome::List(combined)
        } else {
            TabOutcome::Bell
        }
    } else {
        TabOutcome::Extend(lcp)
    }
}

pub struct Repl {
    history: Arc<HistoryStore>,
    ctx: BuiltinContext,
    runtime: tokio::runtime::Runtime,
}

impl Repl {
    pub fn new(history: Arc<HistoryStore>) -> Self {
        let ctx = BuiltinContext { history: history.clone() };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to start the pipeline executor's tokio runtime");
        Self { history, ctx, runtime }
    }

    /// Run the REPL to completion. Returns once Ctrl-D (or EOF on stdin)
    /// ends the session.
    pub fn run(&self, guard: &RawModeGuard) -> io::Result<()> {
        let prompt = std::env::var("PS").unwrap_or_default();
        let mut stdin = io::stdin();
        let mut stdout = io::stdout();

        let mut buffer = String::new();
        let mut history_idx = self.history.len();
        let mut prev_was_tab = false;

        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut byte = [0u8; 1];
        loop {
            if stdin.read(&mut byte)? == 0 {
                break;
            }
            let is_tab = byte[0] == b'\t';
            let mut suppress_tab_flag = false;

            match byte[0] {
                0x03 => {
                    buffer.clear();
                    write!(stdout, "\r\n{}", prompt)?;
                }
                0x04 => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    crate::history::flush_if_configured(&self.history);
                    break;
                }
                0x1b => {
                    let mut seq = [0u8; 2];
                    if stdin.read_exact(&mut seq).is_ok() && seq[0] == b'[' {
                        match seq[1] {
                            b'A' => {
                                buffer = self.history.prev(&mut history_idx);
                                self.redraw(&mut stdout, &prompt, &buffer)?;
                            }
                            b'B' => {
                                buffer = self.history.next(&mut history_idx);
                                self.redraw(&mut stdout, &prompt, &buffer)?;
                            }
                            _ => {}
                        }
                    }
                }
                b'\t' => match tab_complete(&buffer, prev_was_tab) {
                    TabOutcome::Bell => write!(stdout, "\x07")?,
                    TabOutcome::Complete(word) => {
                        buffer = format!("{} ", word);
                        self.redraw(&mut stdout, &prompt, &buffer)?;
                    }
                    TabOutcome::Extend(lcp) => {
                        buffer = lcp;
                        self.redraw(&mut stdout, &prompt, &buffer)?;
                        suppress_tab_flag = true;
                    }
                    TabOutcome::List(words) => {
                        write!(stdout, "\r\n{}\r\n", words.join("  "))?;
                        self.redraw(&mut stdout, &prompt, &buffer)?;
                    }
                },
                b'\n' | b'\r' => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    if !buffer.is_empty() {
                        guard.suspend();
                        self.history.add(&buffer);
                        history_idx = self.history.len();
                        self.execute(&buffer);
                        buffer.clear();
                        let _ = guard.resume();
                    }
                    write!(stdout, "{}", prompt)?;
                }
                0x7f | 0x08 => {
                    if buffer.pop().is_some() {
                        write!(stdout, "\x1b[D\x1b[K")?;
                    }
                }
                other => {
                    buffer.push(other as char);
                    write!(stdout, "{}", other as char)?;
                }
            }
            stdout.flush()?;
            prev_was_tab = if suppress_tab_flag { false } else { is_tab };
        }
        Ok(())
    }

    fn redraw(&self, stdout: &mut io::Stdout, prompt: &str, buffer: &str) -> io::Result<()> {
        write!(stdout, "\r{}{}\x1b[K", prompt, buffer)
    }

    fn execute(&self, line: &str) {
        let expanded = env::expand_vars(line);
        match crate::parser::parse(&expanded) {
            Ok(pipeline) if !pipeline.is_empty() => {
                if let Err(e) = crate::interpreter::run_pipeline(&pipeline, self.ctx.clone(), self.runtime.handle()) {
                    eprintln!("{}", e);
                }
            }
            Ok(_) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    // `std::env::set_var` is process-global; cargo runs tests on multiple
    // threads, so tests that temporarily repoint $PATH must not interleave.
    static PATH_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_path_containing(names: &[&str], test: impl FnOnce()) {
        let _guard = PATH_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempdir().unwrap();
        for name in names {
            let path = dir.path().join(name);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
        }
        let original = std::env::var("PATH").unwrap_or_default();
        std::env::set_var("PATH", dir.path());
        test();
        std::env::set_var("PATH", original);
    }

    #[test]
    fn unique_match_completes_with_trailing_space() {
        with_path_containing(&["gcc"], || {
            assert_eq!(tab_complete("gc", false), TabOutcome::Complete("gcc".to_string()));
        });
    }

    #[test]
    fn no_matches_rings_the_bell() {
        with_path_containing(&[], || {
            assert_eq!(tab_complete("zzzznosuch", false), TabOutcome::Bell);
        });
    }

    #[test]
    fn ambiguous_match_extends_to_the_shared_prefix() {
        with_path_containing(&["exec-foo", "exec-bar"], || {
            assert_eq!(tab_complete("exec", false), TabOutcome::Extend("exec-".to_string()));
        });
    }

    #[test]
    fn lcp_equal_to_buffer_rings_bell_then_lists_on_second_tab() {
        with_path_containing(&[], || {
            // "e" is shared by exactly the builtins echo/exit — LCP("echo","exit") == "e".
            assert_eq!(tab_complete("e", false), TabOutcome::Bell);
            match tab_complete("e", true) {
                TabOutcome::List(words) => {
                    assert!(words.contains(&"echo".to_string()));
                    assert!(words.contains(&"exit".to_string()));
                }
                other => panic!("expected a List outcome, got {other:?}"),
            }
        });
    }
}
