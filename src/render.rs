//! The layout engine: a pure function from configuration and state to one
//! terminal line plus its printable width.
//!
//! Two top-level modes exist. Determinate mode draws
//! `description percent |fill+pad| (annotations) [elapsed:remaining]`;
//! indeterminate mode draws a time-indexed spinner frame followed by the
//! description and annotations. The returned width is the `char` count of
//! the line excluding the leading carriage return and, when color markup is
//! interpreted, excluding the ANSI escapes, so it reflects only what
//! occupies terminal cells.

use std::{fmt::Write as _, time::Duration};

use web_time::Instant;

use crate::{builder::Config, color, spinner};

/// One rendered line and the number of terminal cells it occupies.
pub(crate) struct Frame {
    pub(crate) line: String,
    pub(crate) width: usize,
}

/// The numeric state a render needs, copied out of the bar's lock.
pub(crate) struct LayoutState {
    pub(crate) current: i64,
    pub(crate) current_bytes: f64,
    pub(crate) percent: i64,
    pub(crate) fill_width: usize,
    pub(crate) start: Instant,
    pub(crate) finished: bool,
    /// Rolling-window rate, if any samples have been cut yet.
    pub(crate) smoothed_rate: Option<f64>,
}

/// Lay out one frame.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub(crate) fn layout(config: &Config, state: &LayoutState, now: Instant) -> Frame {
    let secs_since_start = now.duration_since(state.start).as_secs_f64();

    // The annotated rate and the ETA both use the smoothed figure; before
    // the first sample, and once finished, the whole-run average applies.
    let average_rate = match state.smoothed_rate {
        Some(rate) if !state.finished => rate,
        _ if secs_since_start > 0.0 => state.current_bytes / secs_since_start,
        _ => 0.0,
    };

    let annotations = annotation_clause(config, state, average_rate);

    let mut elapsed_str = String::new();
    let mut remaining_str = String::new();
    if config.predict_time {
        elapsed_str = format_duration(Duration::from_secs(secs_since_start as u64));
        let mut remaining_secs = if average_rate > 0.0 {
            (1.0 / average_rate) * (config.max - state.current) as f64
        } else {
            0.0
        };
        if !remaining_secs.is_finite() || remaining_secs < 0.0 {
            remaining_secs = 0.0;
        }
        remaining_str = format_duration(Duration::from_secs(remaining_secs as u64));
    }

    let mut width = config.width;
    let mut fill = state.fill_width;
    if config.full_width && !config.ignore_length {
        // Pin the whole line to the terminal: 13 cells of fixed decoration
        // plus the variable-length parts are reserved, the bar gets the rest.
        let reserved = config.description.chars().count()
            + 13
            + annotations.chars().count()
            + elapsed_str.chars().count()
            + remaining_str.chars().count();
        width = config.terminal.columns().saturating_sub(reserved).max(1);
        fill = (state.percent as f64 / 100.0 * width as f64) as usize;
    }

    let mut body = String::new();
    if fill > 0 {
        let segment = if config.ignore_length {
            &config.theme.pad
        } else {
            &config.theme.fill
        };
        body.push_str(&segment.repeat(fill - 1));
        // the head glyph marks the leading edge; a full or headless bar
        // keeps the plain fill glyph
        let head = if config.theme.head.is_empty() || fill == width {
            &config.theme.fill
        } else {
            &config.theme.head
        };
        body.push_str(head);
    }
    let pad = config.theme.pad.repeat(width.saturating_sub(fill));

    let mut line = if config.ignore_length {
        format!(
            "\r{} {} {} ",
            spinner::frame(config.spinner, now.duration_since(state.start)),
            config.description,
            annotations,
        )
    } else if elapsed_str.is_empty() {
        format!(
            "\r{}{:>4}% {}{}{}{} {} ",
            config.description,
            state.percent,
            config.theme.bar_start,
            body,
            pad,
            config.theme.bar_end,
            annotations,
        )
    } else {
        format!(
            "\r{}{:>4}% {}{}{}{} {} [{}:{}]",
            config.description,
            state.percent,
            config.theme.bar_start,
            body,
            pad,
            config.theme.bar_end,
            annotations,
            elapsed_str,
            remaining_str,
        )
    };

    if config.color_codes {
        line = color::colorize(&line);
    }

    // measure cells: drop the carriage return, and escapes when colored
    let clean = line.replace('\r', "");
    let clean = if config.color_codes {
        color::strip_ansi(&clean)
    } else {
        clean
    };

    Frame {
        width: clean.chars().count(),
        line,
    }
}

/// Assemble the parenthesized annotation group: count clause, byte-rate
/// clause, iteration-rate clause, comma-separated, each behind its flag.
#[allow(clippy::cast_precision_loss)]
fn annotation_clause(config: &Config, state: &LayoutState, average_rate: f64) -> String {
    let mut out = String::new();

    if config.show_iterations_count {
        open_clause(&mut out);
        if !config.ignore_length {
            if config.show_bytes {
                let _ = write!(
                    out,
                    "{}/{}",
                    humanize_bytes(state.current_bytes, false),
                    humanize_bytes(config.max as f64, true),
                );
            } else {
                let _ = write!(out, "{:.0}/{}", state.current_bytes, config.max);
            }
        } else if config.show_bytes {
            out.push_str(&humanize_bytes(state.current_bytes, true));
        } else {
            let _ = write!(out, "{:.0}/-", state.current_bytes);
        }
    }

    if config.show_bytes {
        open_clause(&mut out);
        let kb_per_second = average_rate / 1024.0;
        if kb_per_second > 1024.0 {
            let _ = write!(out, "{:.3} MB/s", kb_per_second / 1024.0);
        } else if kb_per_second > 0.0 {
            let _ = write!(out, "{kb_per_second:.3} kB/s");
        }
    }

    if config.show_iterations_per_second {
        open_clause(&mut out);
        if average_rate > 1.0 {
            let _ = write!(out, "{average_rate:.0} it/s");
        } else {
            let _ = write!(out, "{:.0} it/min", 60.0 * average_rate);
        }
    }

    if !out.is_empty() {
        out.push(')');
    }
    out
}

fn open_clause(out: &mut String) {
    if out.is_empty() {
        out.push('(');
    } else {
        out.push_str(", ");
    }
}

/// Humanize a byte count with base-1000 suffixes (` B` through ` EB`),
/// keeping two significant digits below 10 units.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn humanize_bytes(value: f64, with_suffix: bool) -> String {
    const SUFFIXES: [&str; 7] = [" B", " kB", " MB", " GB", " TB", " PB", " EB"];
    const BASE: f64 = 1000.0;

    if value < 10.0 {
        return format!("{value:2.0} B");
    }

    let exponent = (value.ln() / BASE.ln()).floor();
    let suffix = if with_suffix {
        SUFFIXES[(exponent as usize).min(SUFFIXES.len() - 1)]
    } else {
        ""
    };
    let scaled = (value / BASE.powf(exponent) * 10.0 + 0.5).floor() / 10.0;
    if scaled < 10.0 {
        format!("{scaled:.1}{suffix}")
    } else {
        format!("{scaled:.0}{suffix}")
    }
}

/// Render a duration on whole seconds: `42s`, `1m5s`, `2h0m13s`.
pub(crate) fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
