//! Cyclic frame tables for indeterminate (spinner) rendering.
//!
//! Frames are selected by elapsed wall-clock time, not by call count, so the
//! animation advances at a steady pace however often the counter is bumped.

use std::time::Duration;

/// Frame sequences, indexed by the builder's spinner variant.
pub(crate) const SPINNERS: &[&[&str]] = &[
    &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
    &["▁", "▃", "▄", "▅", "▆", "▇", "█", "▇", "▆", "▅", "▄", "▃"],
    &["▖", "▘", "▝", "▗"],
    &["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"],
    &["◢", "◣", "◤", "◥"],
    &["◰", "◳", "◲", "◱"],
    &["◴", "◷", "◶", "◵"],
    &["◐", "◓", "◑", "◒"],
    &[".", "o", "O", "@", "*"],
    &["|", "/", "-", "\\"],
    &["◡◡", "⊙⊙", "◠◠"],
    &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
    &[
        ">))'>", " >))'>", "  >))'>", "   >))'>", "    >))'>", "   <'((<", "  <'((<", " <'((<",
    ],
    &["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"],
    &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    &["▉", "▊", "▋", "▌", "▍", "▎", "▏", "▎", "▍", "▌", "▋", "▊"],
    &["■", "□", "▪", "▫"],
    &["←", "↑", "→", "↓"],
    &["╫", "╪"],
    &["⇐", "⇖", "⇑", "⇗", "⇒", "⇘", "⇓", "⇙"],
    &[".  ", ".. ", "..."],
    &["▌", "▀", "▐", "▄"],
    &["+", "x"],
    &["v", "<", "^", ">"],
];

/// The classic `|/-\` spinner.
pub(crate) const DEFAULT_SPINNER: usize = 9;

/// Spinner used by the preset constructors (braille dots).
pub(crate) const PRESET_SPINNER: usize = 14;

/// Highest accepted spinner variant.
pub(crate) const MAX_VARIANT: usize = 75;

/// Frame table for a variant. Variants beyond the table fold back onto it,
/// so every index up to [`MAX_VARIANT`] yields a usable animation.
pub(crate) fn charset(variant: usize) -> &'static [&'static str] {
    SPINNERS[variant % SPINNERS.len()]
}

/// Frame shown at `elapsed` for the given variant. One frame per 100ms.
pub(crate) fn frame(variant: usize, elapsed: Duration) -> &'static str {
    let frames = charset(variant);
    let tick = (elapsed.as_millis() / 100) as usize;
    frames[tick % frames.len()]
}
