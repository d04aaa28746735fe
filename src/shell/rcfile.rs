//! `.shellrc` startup config: `KEY=VALUE` lines installed into the
//! environment (spec §6).
//!
//! Grounded verbatim on `gosh`'s `loadShellRC` (`original_source/app/setup.go`):
//! blank lines and `#`-comments are skipped, each remaining line is split
//! once on `=`, and a value wrapped in matching `'…'`/`"…"` has the quotes
//! stripped before `setenv`.

use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load `path` and `std::env::set_var` every `KEY=VALUE` line it contains.
/// A line that doesn't split into two parts on the first `=` is a warning,
/// not a hard failure — the file may still contain lines this format
/// can't express. Returns an error only if `path` couldn't be opened.
pub fn load(path: &Path) -> std::io::Result<()> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                std::env::set_var(key.trim(), strip_matching_quotes(value.trim()));
            }
            None => {
                eprintln!("{}:{}: not a KEY=VALUE line, ignoring", path.display(), lineno + 1);
            }
        }
    }
    Ok(())
}

fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_key_value_pairs_and_strips_quotes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".shellrc");
        std::fs::write(
            &path,
            "# a comment\n\nSHELLCORE_TEST_A=bare\nSHELLCORE_TEST_B='single'\nSHELLCORE_TEST_C=\"double\"\n",
        )
        .unwrap();

        load(&path).unwrap();

        assert_eq!(std::env::var("SHELLCORE_TEST_A").unwrap(), "bare");
        assert_eq!(std::env::var("SHELLCORE_TEST_B").unwrap(), "single");
        assert_eq!(std::env::var("SHELLCORE_TEST_C").unwrap(), "double");
        std::env::remove_var("SHELLCORE_TEST_A");
        std::env::remove_var("SHELLCORE_TEST_B");
        std::env::remove_var("SHELLCORE_TEST_C");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load(Path::new("/nonexistent/.shellrc")).is_err());
    }

    #[test]
    fn malformed_line_is_a_warning_not_a_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".shellrc");
        std::fs::write(&path, "this line has no equals sign\nSHELLCORE_TEST_D=ok\n").unwrap();
        load(&path).unwrap();
        assert_eq!(std::env::var("SHELLCORE_TEST_D").unwrap(), "ok");
        std::env::remove_var("SHELLCORE_TEST_D");
    }
}
