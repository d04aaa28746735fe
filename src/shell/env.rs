//! Variable expansion: `$NAME` and `${NAME}` against the process
//! environment (spec §4.9's "expand before lexing", and `cd`'s `~`→$HOME
//! substitution, spec §4.7).
//!
//! Grounded in `gosh`'s `cdBuiltin` (`original_source/app/command.go`),
//! which leans on `os.ExpandEnv`; this core implements the same `$NAME`
//! forms directly rather than pulling in a templating crate, since the
//! grammar is intentionally this small (spec §1's non-goals: no brace/glob
//! expansion).

/// Replace every `$NAME` or `${NAME}` run with that variable's value (empty
/// string if unset). A `$` not followed by an identifier character or `{`
/// is left as-is.
pub fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if closed {
                out.push_str(&std::env::var(&name).unwrap_or_default());
            } else {
                out.push_str("${");
                out.push_str(&name);
            }
            continue;
        }

        let mut name = String::new();
        if let Some(&c) = chars.peek() {
            if c.is_ascii_alphabetic() || c == '_' {
                name.push(c);
                chars.next();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
        }
        if name.is_empty() {
            out.push('$');
        } else {
            out.push_str(&std::env::var(&name).unwrap_or_default());
        }
    }
    out
}

/// Expand a `cd` target: a leading `~` becomes `$HOME`, then the whole
/// string goes through `expand_vars`.
pub fn expand_cd_target(target: &str) -> String {
    let replaced = if let Some(rest) = target.strip_prefix('~') {
        format!("$HOME{}", rest)
    } else {
        target.replace('~', "$HOME")
    };
    expand_vars(&replaced)
}
