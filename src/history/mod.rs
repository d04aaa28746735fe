//! In-memory, optionally file-persisted command history.
//!
//! Grounded in `gosh`'s `History` type (`original_source/app/history.go`):
//! a `last_persisted_index` high-water mark rather than a per-entry dirty
//! flag, so `write` resets it to the full length and `append` only
//! advances past entries it actually wrote (spec §4.8). `load` never
//! touches the mark itself — only the one real startup call site
//! (`Shell::new`) sets it, mirroring `gosh`'s `GetHistory` doing that
//! adjustment itself right after the generic `LoadHistory`.

use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    commands: Vec<String>,
    last_persisted_index: usize,
}

/// Process-wide command history. Reads take a shared lock; the only
/// mutation (`add`) takes an exclusive lock, so a pipeline's background
/// builtin task (e.g. `history`) is safe against the editor's Enter
/// handler adding the just-submitted line concurrently.
#[derive(Debug, Default)]
pub struct HistoryStore {
    inner: RwLock<Inner>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `cmd` to history.
    pub fn add(&self, cmd: &str) {
        self.inner.write().unwrap().commands.push(cmd.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the last `min(n, len)` commands, one per line, formatted
    /// `    <1-based-index>  <cmd>\n` with indices counted from the
    /// entry's real position, not from 1.
    pub fn get_last(&self, n: usize) -> String {
        let inner = self.inner.read().unwrap();
        let start = inner.commands.len().saturating_sub(n);
        let mut out = String::new();
        for (i, cmd) in inner.commands.iter().enumerate().skip(start) {
            out.push_str(&format!("    {}  {}\n", i + 1, cmd));
        }
        out
    }

    /// A full snapshot of every entry, oldest first.
    pub fn all(&self) -> Vec<String> {
        self.inner.read().unwrap().commands.clone()
    }

    /// Mark every entry currently in history as already persisted. Used
    /// once at startup, right after loading `$HISTFILE`, so that a
    /// `history -a`/`exit` mid-session only appends what was typed this
    /// session rather than re-appending the file's own prior contents.
    pub fn mark_all_persisted(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.last_persisted_index = inner.commands.len();
    }

    /// Decrement `*idx` (clamped into `[0, len-1]`) and return that entry.
    /// Empty history returns the empty string and leaves `*idx` untouched.
    pub fn prev(&self, idx: &mut usize) -> String {
        let inner = self.inner.read().unwrap();
        if inner.commands.is_empty() {
            return String::new();
        }
        *idx = idx.saturating_sub(1).min(inner.commands.len() - 1);
        inner.commands[*idx].clone()
    }

    /// Symmetric with `prev`: increment `*idx` clamped into `[0, len-1]`.
    pub fn next(&self, idx: &mut usize) -> String {
        let inner = self.inner.read().unwrap();
        if inner.commands.is_empty() {
            return String::new();
        }
        let max = inner.commands.len() - 1;
        *idx = (*idx + 1).min(max);
        inner.commands[*idx].clone()
    }

    /// Read newline-delimited lines from `path` into history. A missing
    /// file is a silent no-op; other IO errors are reported once with
    /// partial entries retained. Does not touch the persisted high-water
    /// mark — loaded entries are not yet known to be in `path`'s sibling
    /// files, so a later `append` must still be able to write them.
    pub fn load(&self, path: &Path) {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return,
            Err(e) => {
                eprintln!("{}", crate::interpreter::ShellError::History(format!("unable to open {}: {}", path.display(), e)));
                return;
            }
        };
        let reader = BufReader::new(file);
        let mut inner = self.inner.write().unwrap();
        for line in reader.lines() {
            match line {
                Ok(l) => inner.commands.push(l),
                Err(e) => {
                    eprintln!("{}", crate::interpreter::ShellError::History(format!("error reading {}: {}", path.display(), e)));
                    break;
                }
            }
        }
    }

    /// Truncate-write every entry to `path`, advancing the persisted
    /// high-water mark as each one is successfully written.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        self.write_from(file)
    }

    /// Open `path` for append and write only entries at or past the
    /// persisted high-water mark, advancing it per entry written.
    pub fn append(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_from(file)
    }

    fn write_from(&self, mut file: std::fs::File) -> io::Result<()> {
        let mut inner = self.inner.write().unwrap();
        let start = inner.last_persisted_index;
        for i in start..inner.commands.len() {
            writeln!(file, "{}", inner.commands[i])?;
            inner.last_persisted_index = i + 1;
        }
        Ok(())
    }
}

/// Append `history`'s unwritten entries to `$HISTFILE`, if set to a
/// non-empty path. Shared by the `exit` builtin and the REPL's Ctrl-D
/// handler (spec §4.7, §4.9).
pub fn flush_if_configured(history: &HistoryStore) {
    if let Ok(histfile) = std::env::var("HISTFILE") {
        if !histfile.is_empty() {
            if let Err(e) = history.append(Path::new(&histfile)) {
                eprintln!("{}", crate::interpreter::ShellError::History(format!("{}: {}", histfile, e)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn add_and_get_last() {
        let h = HistoryStore::new();
        h.add("pwd");
        h.add("ls");
        h.add("echo hi");
        assert_eq!(h.get_last(2), "    2  ls\n    3  echo hi\n");
        assert_eq!(h.get_last(10), "    1  pwd\n    2  ls\n    3  echo hi\n");
    }

    #[test]
    fn prev_next_navigation() {
        let h = HistoryStore::new();
        h.add("pwd");
        h.add("ls");
        let mut idx = h.len();
        assert_eq!(h.prev(&mut idx), "ls");
        assert_eq!(h.prev(&mut idx), "pwd");
        assert_eq!(h.prev(&mut idx), "pwd"); // clamped
        assert_eq!(h.next(&mut idx), "ls");
        assert_eq!(h.next(&mut idx), "ls"); // clamped
    }

    #[test]
    fn prev_on_empty_history_returns_empty_without_mutating_index() {
        let h = HistoryStore::new();
        let mut idx = 0usize;
        assert_eq!(h.prev(&mut idx), "");
        assert_eq!(idx, 0);
    }

    #[test]
    fn load_missing_file_is_a_silent_noop() {
        let h = HistoryStore::new();
        h.load(Path::new("/nonexistent/path/to/histfile"));
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn load_then_append_writes_every_loaded_entry() {
        // load never touches the persisted high-water mark, so an
        // immediate append writes everything it just loaded (property 6).
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let other = dir.path().join("hist2");

        let h = HistoryStore::new();
        h.add("one");
        h.add("two");
        h.write(&path).unwrap();

        let h2 = HistoryStore::new();
        h2.load(&path);
        h2.append(&other).unwrap();

        assert_eq!(std::fs::read_to_string(&other).unwrap(), std::fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn mark_all_persisted_makes_a_following_append_write_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let other = dir.path().join("hist2");

        let h = HistoryStore::new();
        h.add("one");
        h.add("two");
        h.write(&path).unwrap();

        let h2 = HistoryStore::new();
        h2.load(&path);
        h2.mark_all_persisted();
        h2.append(&other).unwrap();

        assert_eq!(std::fs::read_to_string(&other).unwrap(), "");
    }

    #[test]
    fn after_mark_all_persisted_only_entries_added_since_are_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let other = dir.path().join("hist2");

        let h = HistoryStore::new();
        h.add("one");
        h.add("two");
        h.write(&path).unwrap();

        let h2 = HistoryStore::new();
        h2.load(&path);
        h2.mark_all_persisted();
        h2.add("three");
        h2.append(&other).unwrap();

        assert_eq!(std::fs::read_to_string(&other).unwrap(), "three\n");
    }

    #[test]
    fn write_then_append_only_sends_new_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");

        let h = HistoryStore::new();
        h.add("one");
        h.write(&path).unwrap();
        h.add("two");
        h.append(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }
}
