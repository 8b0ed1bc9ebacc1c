//! Fluent construction of [`ProgressBar`] instances.
//!
//! The builder collects every knob the bar understands and freezes them into
//! an immutable configuration at [`build`](ProgressBarBuilder::build) time.
//! There is no process-wide mutable default: the default theme is an explicit
//! constant, and anything environmental (the terminal width provider, the
//! output sink) is injected here and can be substituted in tests.
//!
//! Passing `-1` as the maximum puts the bar into indeterminate mode: the
//! internal maximum is substituted with the bar width so the counter wraps
//! like a repeating spinner, and time prediction is switched off.

use std::{
    io::{self, Write},
    sync::Arc,
    time::Duration,
};

use compact_str::CompactString;

use crate::{
    error::ProgressError,
    progress::ProgressBar,
    spinner,
    term::{EnvTerminal, TerminalWidth},
};

/// Glyph set used to draw a determinate bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Glyph repeated for the filled portion.
    pub fill: CompactString,
    /// Glyph drawn at the leading edge of the fill. Empty means "use `fill`",
    /// which also applies when the bar is exactly full.
    pub head: CompactString,
    /// Glyph repeated for the unfilled portion.
    pub pad: CompactString,
    /// Left bracket.
    pub bar_start: CompactString,
    /// Right bracket.
    pub bar_end: CompactString,
}

impl Default for Theme {
    /// The block-glyph theme: `|███    |`.
    fn default() -> Self {
        Self {
            fill: "█".into(),
            head: "".into(),
            pad: " ".into(),
            bar_start: "|".into(),
            bar_end: "|".into(),
        }
    }
}

/// Immutable configuration, read by every render. Built once, shared by all
/// clones of the bar handle.
pub(crate) struct Config {
    pub(crate) max: i64,
    pub(crate) width: usize,
    pub(crate) theme: Theme,
    pub(crate) description: CompactString,
    /// True when the caller passed `-1` for max: the counter wraps and the
    /// bar renders as a spinner.
    pub(crate) ignore_length: bool,
    pub(crate) color_codes: bool,
    pub(crate) show_bytes: bool,
    pub(crate) show_iterations_per_second: bool,
    pub(crate) show_iterations_count: bool,
    pub(crate) predict_time: bool,
    pub(crate) throttle: Duration,
    pub(crate) clear_on_finish: bool,
    pub(crate) spinner: usize,
    pub(crate) full_width: bool,
    pub(crate) on_completion: Option<Box<dyn Fn() + Send + Sync>>,
    pub(crate) terminal: Arc<dyn TerminalWidth>,
}

/// Builder for [`ProgressBar`].
///
/// ```no_run
/// use barline::ProgressBarBuilder;
///
/// let bar = ProgressBarBuilder::new(1000)
///     .with_description("downloading")
///     .with_width(20)
///     .with_iterations_count()
///     .build()?;
/// bar.advance(10)?;
/// # Ok::<(), barline::ProgressError>(())
/// ```
pub struct ProgressBarBuilder {
    max: i64,
    width: usize,
    theme: Theme,
    description: CompactString,
    color_codes: bool,
    show_bytes: bool,
    show_iterations_per_second: bool,
    show_iterations_count: bool,
    predict_time: bool,
    throttle: Duration,
    clear_on_finish: bool,
    spinner: usize,
    full_width: bool,
    render_blank: bool,
    on_completion: Option<Box<dyn Fn() + Send + Sync>>,
    terminal: Arc<dyn TerminalWidth>,
    out: Box<dyn Write + Send>,
}

impl ProgressBarBuilder {
    /// Starts building a bar with the given maximum. `-1` means the length
    /// is unknown and the bar renders as a spinner.
    #[must_use]
    pub fn new(max: i64) -> Self {
        Self {
            max,
            width: 40,
            theme: Theme::default(),
            description: CompactString::default(),
            color_codes: false,
            show_bytes: false,
            show_iterations_per_second: false,
            show_iterations_count: false,
            predict_time: true,
            throttle: Duration::ZERO,
            clear_on_finish: false,
            spinner: spinner::DEFAULT_SPINNER,
            full_width: false,
            render_blank: false,
            on_completion: None,
            terminal: Arc::new(EnvTerminal),
            out: Box::new(io::stdout()),
        }
    }

    /// Sets the bar width in characters (default 40).
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the glyphs the bar is drawn with.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the description rendered in front of the bar.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<CompactString>) -> Self {
        self.description = description.into();
        self
    }

    /// Enables or disables `[red]`-style color markup interpretation.
    #[must_use]
    pub fn with_color_codes(mut self, color_codes: bool) -> Self {
        self.color_codes = color_codes;
        self
    }

    /// Shows throughput as kB/s or MB/s and humanizes the iteration count.
    #[must_use]
    pub fn with_bytes(mut self, show_bytes: bool) -> Self {
        self.show_bytes = show_bytes;
        self
    }

    /// Shows the iteration rate (`it/s`, or `it/min` below one per second).
    #[must_use]
    pub fn with_iterations_per_second(mut self) -> Self {
        self.show_iterations_per_second = true;
        self
    }

    /// Shows the iteration count as `current/max`.
    #[must_use]
    pub fn with_iterations_count(mut self) -> Self {
        self.show_iterations_count = true;
        self
    }

    /// Enables or disables the `[elapsed:remaining]` prediction clause
    /// (default on; forced off in indeterminate mode).
    #[must_use]
    pub fn with_predict_time(mut self, predict_time: bool) -> Self {
        self.predict_time = predict_time;
        self
    }

    /// Sets the minimum wall-clock time between renders (default zero).
    #[must_use]
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Erases the bar instead of drawing the final full frame on completion.
    #[must_use]
    pub fn with_clear_on_finish(mut self) -> Self {
        self.clear_on_finish = true;
        self
    }

    /// Selects the spinner variant used in indeterminate mode. Variants
    /// 0 through 75 are accepted; anything higher is rejected at
    /// [`build`](Self::build) time.
    #[must_use]
    pub fn with_spinner(mut self, variant: usize) -> Self {
        self.spinner = variant;
        self
    }

    /// Recomputes the bar width from the live terminal column count on
    /// every render, keeping the whole line pinned to the terminal width.
    #[must_use]
    pub fn with_full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Draws the 0% frame immediately after construction.
    #[must_use]
    pub fn with_render_blank(mut self, render_blank: bool) -> Self {
        self.render_blank = render_blank;
        self
    }

    /// Installs a handler invoked exactly once when the counter reaches max.
    ///
    /// The handler runs synchronously under the bar's lock, on whichever
    /// thread triggered the completing update. It must not call back into
    /// the bar (that would deadlock) and should return quickly.
    #[must_use]
    pub fn with_on_completion(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_completion = Some(Box::new(hook));
        self
    }

    /// Substitutes the terminal width provider (defaults to a live query).
    #[must_use]
    pub fn with_terminal(mut self, terminal: impl TerminalWidth + 'static) -> Self {
        self.terminal = Arc::new(terminal);
        self
    }

    /// Sets the output sink (defaults to stdout).
    #[must_use]
    pub fn with_writer(mut self, out: impl Write + Send + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    /// Validates the options and constructs the bar.
    ///
    /// # Errors
    ///
    /// [`ProgressError::UnknownSpinner`] if the spinner variant is out of
    /// range; an I/O error if the initial blank render was requested and
    /// fails.
    pub fn build(self) -> Result<ProgressBar, ProgressError> {
        if self.spinner > spinner::MAX_VARIANT {
            return Err(ProgressError::UnknownSpinner(self.spinner));
        }
        let render_blank = self.render_blank;
        let bar = self.assemble();
        if render_blank {
            bar.render_blank()?;
        }
        Ok(bar)
    }

    /// Infallible assembly for callers whose options are known valid
    /// (the crate's own presets and `ProgressBar::new`).
    pub(crate) fn assemble(self) -> ProgressBar {
        debug_assert!(self.spinner <= spinner::MAX_VARIANT);

        let mut max = self.max;
        let mut predict_time = self.predict_time;
        let ignore_length = max == -1;
        if ignore_length {
            // unknown length: wrap the counter over the bar width
            max = self.width as i64;
            predict_time = false;
        }

        let config = Config {
            max,
            width: self.width,
            theme: self.theme,
            description: self.description,
            ignore_length,
            color_codes: self.color_codes,
            show_bytes: self.show_bytes,
            show_iterations_per_second: self.show_iterations_per_second,
            show_iterations_count: self.show_iterations_count,
            predict_time,
            throttle: self.throttle,
            clear_on_finish: self.clear_on_finish,
            spinner: self.spinner,
            full_width: self.full_width,
            on_completion: self.on_completion,
            terminal: self.terminal,
        };
        ProgressBar::from_parts(config, self.out)
    }
}
