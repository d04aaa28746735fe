//! `Shell`: the top-level facade wiring history, startup config, and the
//! REPL together, mirroring the teacher's `Bash` facade
//! (`examples/arthur-zhang-just-bash/src/bash.rs`) — a single owned struct
//! the binary constructs once and drives, rather than free functions over
//! global state (spec §9).

use crate::history::HistoryStore;
use crate::shell::repl::{RawModeGuard, Repl};
use std::sync::Arc;

pub struct Shell {
    history: Arc<HistoryStore>,
}

impl Shell {
    pub fn new() -> Self {
        let history = Arc::new(HistoryStore::new());
        if let Ok(histfile) = std::env::var("HISTFILE") {
            if !histfile.is_empty() {
                history.load(std::path::Path::new(&histfile));
                history.mark_all_persisted();
            }
        }
        Self { history }
    }

    /// Load `.shellrc` from the current directory. Per spec §6, an
    /// unopenable config file is a fatal startup error (exit status 1);
    /// parse warnings on individual lines are not.
    pub fn load_rc_file(&self) -> std::io::Result<()> {
        crate::shell::rcfile::load(&std::path::PathBuf::from(".shellrc"))
    }

    /// Enter raw mode and run the REPL until Ctrl-D or EOF.
    pub fn run(&self) -> std::io::Result<()> {
        let guard = RawModeGuard::enable().map_err(|e| std::io::Error::other(e.to_string()))?;
        let repl = Repl::new(Arc::clone(&self.history));
        repl.run(&guard)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
