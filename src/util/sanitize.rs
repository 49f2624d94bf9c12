use regex::Regex;
use std::sync::LazyLock;

// CSI (ESC [ ... cmd) and OSC (ESC ] ... BEL/ST) sequences.
static ESCAPES: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;?]*[ -/]*[@-~]|\x1B\][^\x07\x1B]*(\x07|\x1B\\)").ok()
});

/// Make untrusted API text safe to print: strip escape sequences and control
/// characters, collapse whitespace runs to single spaces, trim.
pub fn sanitize_for_terminal(s: &str) -> String {
    let no_escapes = match ESCAPES.as_ref() {
        Some(re) => re.replace_all(s, ""),
        None => s.into(),
    };

    let mut out = String::with_capacity(no_escapes.len());
    let mut pending_space = false;
    for ch in no_escapes.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if ch.is_control() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}
