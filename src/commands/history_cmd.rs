//! `history`: list, or persist via `-r|-w|-a FILE` (spec §4.7).

use super::BuiltinContext;
use crate::interpreter::ShellError;
use std::io::{Read, Write};
use std::path::Path;

pub fn run(args: &[String], _stdin: &mut dyn Read, stdout: &mut dyn Write, stderr: &mut dyn Write, ctx: &BuiltinContext) -> i32 {
    match args {
        [] => {
            let _ = write!(stdout, "{}", ctx.history.get_last(usize::MAX));
            0
        }
        [n] => match n.parse::<usize>() {
            Ok(count) => {
                let _ = write!(stdout, "{}", ctx.history.get_last(count));
                0
            }
            Err(_) => {
                let _ = writeln!(stderr, "history: {}: numeric argument required", n);
                1
            }
        },
        [flag, file] => {
            let path = Path::new(file);
            let result = match flag.as_str() {
                "-r" => {
                    ctx.history.load(path);
                    Ok(())
                }
                "-w" => ctx.history.write(path),
                "-a" => ctx.history.append(path),
                other => {
                    let _ = writeln!(stderr, "history: {}: invalid option", other);
                    return 1;
                }
            };
            match result {
                Ok(()) => 0,
                Err(e) => {
                    let _ = writeln!(stderr, "{}", ShellError::History(format!("{}: {}", file, e)));
                    1
                }
            }
        }
        _ => {
            let _ = writeln!(stderr, "history: usage: history [n] | history -r|-w|-a file");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn ctx(history: Arc<HistoryStore>) -> BuiltinContext {
        BuiltinContext { history }
    }

    #[test]
    fn no_args_lists_every_entry() {
        let history = Arc::new(HistoryStore::new());
        history.add("pwd");
        history.add("ls");
        let mut stdout = Vec::new();
        run(&[], &mut std::io::empty(), &mut stdout, &mut std::io::sink(), &ctx(history));
        assert_eq!(stdout, b"    1  pwd\n    2  ls\n");
    }

    #[test]
    fn numeric_arg_limits_to_last_n() {
        let history = Arc::new(HistoryStore::new());
        history.add("a");
        history.add("b");
        history.add("c");
        let mut stdout = Vec::new();
        run(&["1".to_string()], &mut std::io::empty(), &mut stdout, &mut std::io::sink(), &ctx(history));
        assert_eq!(stdout, b"    3  c\n");
    }

    #[test]
    fn dash_w_then_dash_a_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist");
        let history = Arc::new(HistoryStore::new());
        history.add("one");
        run(&["-w".to_string(), path.to_str().unwrap().to_string()], &mut std::io::empty(), &mut std::io::sink(), &mut std::io::sink(), &ctx(history.clone()));
        history.add("two");
        run(&["-a".to_string(), path.to_str().unwrap().to_string()], &mut std::io::empty(), &mut std::io::sink(), &mut std::io::sink(), &ctx(history));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn non_numeric_single_arg_is_an_error() {
        let mut stderr = Vec::new();
        let code = run(&["abc".to_string()], &mut std::io::empty(), &mut std::io::sink(), &mut stderr, &ctx(Arc::new(HistoryStore::new())));
        assert_eq!(code, 1);
        assert!(!stderr.is_empty());
    }
}
