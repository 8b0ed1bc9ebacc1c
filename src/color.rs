//! Color markup translation for rendered lines.
//!
//! Descriptions and themes may carry `[red]`-style markup tags. When color
//! interpretation is enabled, [`colorize`] rewrites known tags into ANSI
//! escape sequences before the frame is written; [`strip_ansi`] removes the
//! escapes again so width measurement only counts visible cells. Unknown
//! tags (including the bar's own `[`/`]` brackets) pass through verbatim.

/// Tag-to-SGR-code table. Foreground colors plus the common attributes.
const CODES: &[(&str, &str)] = &[
    ("reset", "0"),
    ("bold", "1"),
    ("dim", "2"),
    ("underline", "4"),
    ("blink", "5"),
    ("invert", "7"),
    ("black", "30"),
    ("red", "31"),
    ("green", "32"),
    ("yellow", "33"),
    ("blue", "34"),
    ("magenta", "35"),
    ("cyan", "36"),
    ("white", "37"),
    ("light_black", "90"),
    ("light_red", "91"),
    ("light_green", "92"),
    ("light_yellow", "93"),
    ("light_blue", "94"),
    ("light_magenta", "95"),
    ("light_cyan", "96"),
    ("light_white", "97"),
];

fn lookup(tag: &str) -> Option<&'static str> {
    CODES.iter().find(|(name, _)| *name == tag).map(|(_, code)| *code)
}

/// Replace known `[tag]` markup with ANSI escape sequences.
pub(crate) fn colorize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(']').and_then(|close| {
            lookup(&after[..close]).map(|code| (close, code))
        }) {
            Some((close, code)) => {
                out.push_str("\x1b[");
                out.push_str(code);
                out.push('m');
                rest = &after[close + 1..];
            }
            None => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Remove ANSI CSI sequences, leaving only cell-occupying characters.
pub(crate) fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.clone().next() == Some('[') {
            chars.next();
            // params and intermediates end at the first ASCII letter
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
