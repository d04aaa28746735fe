//! `cd [dir]`: change the process working directory (spec §4.7).

use super::BuiltinContext;
use crate::interpreter::ShellError;
use crate::shell::env::expand_cd_target;
use std::io::{Read, Write};

fn not_a_directory(target: &str) -> ShellError {
    ShellError::Runtime(format!("cd: {}: No such file or directory", target))
}

pub fn run(args: &[String], _stdin: &mut dyn Read, _stdout: &mut dyn Write, stderr: &mut dyn Write, _ctx: &BuiltinContext) -> i32 {
    let raw = args.first().map(String::as_str).unwrap_or("$HOME");
    let target = expand_cd_target(raw);

    match std::fs::metadata(&target) {
        Ok(meta) if meta.is_dir() => match std::env::set_current_dir(&target) {
            Ok(()) => 0,
            Err(_) => {
                let _ = writeln!(stderr, "{}", not_a_directory(&target));
                1
            }
        },
        _ => {
            let _ = writeln!(stderr, "{}", not_a_directory(&target));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // `set_current_dir` is process-wide state; serialize the tests that
    // touch it so they don't race against each other under the default
    // multi-threaded test runner.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn ctx() -> BuiltinContext {
        BuiltinContext { history: std::sync::Arc::new(crate::history::HistoryStore::new()) }
    }

    #[test]
    fn changes_into_an_existing_directory() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let original = std::env::current_dir().unwrap();
        let args = vec![dir.path().to_str().unwrap().to_string()];
        let code = run(&args, &mut std::io::empty(), &mut std::io::sink(), &mut std::io::sink(), &ctx());
        assert_eq!(code, 0);
        assert_eq!(std::fs::canonicalize(std::env::current_dir().unwrap()).unwrap(), std::fs::canonicalize(dir.path()).unwrap());
        std::env::set_current_dir(original).unwrap();
    }

    #[test]
    fn missing_directory_reports_error_and_leaves_cwd_unchanged() {
        let _guard = CWD_LOCK.lock().unwrap();
        let original = std::env::current_dir().unwrap();
        let mut stderr = Vec::new();
        let args = vec!["/definitely/not/a/real/path".to_string()];
        let code = run(&args, &mut std::io::empty(), &mut std::io::sink(), &mut stderr, &ctx());
        assert_eq!(code, 1);
        assert_eq!(stderr, b"cd: /definitely/not/a/real/path: No such file or directory\n");
        assert_eq!(std::env::current_dir().unwrap(), original);
    }
}
