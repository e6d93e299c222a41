//! Shell quoting for paths embedded in plan command lines.

/// Quote an argument for a POSIX shell.
///
/// Arguments made only of characters that are never special to the shell are
/// returned unchanged, so ordinary paths produce the same command line they
/// always have. Anything else is wrapped in single quotes.
pub fn quote(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_safe) {
        return arg.to_string();
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | ':' | '@' | '%' | ',' | '=')
}
