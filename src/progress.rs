//! The progress state machine: a guarded counter that renders itself.
//!
//! [`ProgressBar`] is a cheap-to-clone handle ([`Arc`]-based) over one
//! mutable state record guarded by a single [`Mutex`](parking_lot::Mutex).
//! Every mutator, the render path included, runs under that lock, so
//! concurrent updates are fully serialized and frames never interleave.
//! There is no background thread: rendering happens synchronously inside
//! the caller's update, throttled two ways:
//!
//! * **Percent change:** a bar-only display re-renders only when the integer
//!   percent moves, bounding a full run to ~100 renders regardless of how
//!   granular the deltas are. Displays with live rate or count annotations
//!   re-render on every call, since those numbers change continuously.
//! * **Wall clock:** successive writes are additionally spaced by the
//!   configured throttle interval, except for the frame that reaches max.
//!
//! # Completion
//!
//! `finished` transitions false to true exactly once, on the render path,
//! when the counter reaches max. The final full frame is drawn (or the line
//! erased, with clear-on-finish), the completion hook runs, and no further
//! bytes are ever written.

use std::{io::Write, sync::Arc};

use parking_lot::Mutex;
use tracing::trace;
use web_time::Instant;

use crate::{
    builder::{Config, ProgressBarBuilder},
    error::ProgressError,
    rate::RateEstimator,
    render::{self, LayoutState},
    spinner, writer,
};

/// A thread-safe, cloneable terminal progress bar.
///
/// Cloning is cheap (Arc bump) and points at the same underlying state.
///
/// ```no_run
/// use barline::ProgressBar;
///
/// let bar = ProgressBar::new(100);
/// for _ in 0..100 {
///     bar.advance(1)?;
/// }
/// # Ok::<(), barline::ProgressError>(())
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    config: Arc<Config>,
    state: Arc<Mutex<State>>,
}

impl core::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressBar").finish_non_exhaustive()
    }
}

/// Everything mutable, exclusively owned by the lock. The output sink lives
/// here too, so a render can never race a clear.
struct State {
    current: i64,
    current_bytes: f64,
    percent: i64,
    last_percent: i64,
    fill_width: usize,
    start: Instant,
    last_render: Instant,
    rate: RateEstimator,
    /// Widest line drawn so far; erasing overwrites exactly this many cells.
    max_line_width: usize,
    finished: bool,
    out: Box<dyn Write + Send>,
}

impl State {
    fn fresh(out: Box<dyn Write + Send>, now: Instant) -> Self {
        Self {
            current: 0,
            current_bytes: 0.0,
            percent: 0,
            last_percent: 0,
            fill_width: 0,
            start: now,
            last_render: now,
            rate: RateEstimator::new(now),
            max_line_width: 0,
            finished: false,
            out,
        }
    }

    /// Reinitialize every counter and time anchor, keeping the sink.
    fn rearm(&mut self, now: Instant) {
        self.current = 0;
        self.current_bytes = 0.0;
        self.percent = 0;
        self.last_percent = 0;
        self.fill_width = 0;
        self.start = now;
        self.last_render = now;
        self.rate = RateEstimator::new(now);
        self.max_line_width = 0;
        self.finished = false;
    }
}

impl ProgressBar {
    /// Creates a bar with default options. Pass `-1` for an unknown length
    /// (spinner mode). Use [`ProgressBarBuilder`] for anything fancier.
    #[must_use]
    pub fn new(max: i64) -> Self {
        ProgressBarBuilder::new(max).assemble()
    }

    /// A bar with recommended defaults for counting iterations: stderr
    /// sink, narrow bar pinned to the terminal width, 65ms throttle, count
    /// and rate annotations, newline on completion.
    #[must_use]
    pub fn preset(max: i64, description: impl Into<compact_str::CompactString>) -> Self {
        let bar = Self::preset_builder(max, description)
            .with_iterations_per_second()
            .assemble();
        let _ = bar.render_blank();
        bar
    }

    /// Like [`preset`](Self::preset), but for byte counts: sizes and
    /// throughput are humanized (kB/s, MB/s).
    #[must_use]
    pub fn preset_bytes(max: i64, description: impl Into<compact_str::CompactString>) -> Self {
        let bar = Self::preset_builder(max, description)
            .with_bytes(true)
            .assemble();
        let _ = bar.render_blank();
        bar
    }

    fn preset_builder(
        max: i64,
        description: impl Into<compact_str::CompactString>,
    ) -> ProgressBarBuilder {
        ProgressBarBuilder::new(max)
            .with_description(description)
            .with_writer(std::io::stderr())
            .with_width(10)
            .with_throttle(std::time::Duration::from_millis(65))
            .with_iterations_count()
            .with_spinner(spinner::PRESET_SPINNER)
            .with_full_width()
            .with_on_completion(|| {
                let _ = std::io::stderr().write_all(b"\n");
            })
    }

    pub(crate) fn from_parts(config: Config, out: Box<dyn Write + Send>) -> Self {
        let now = Instant::now();
        trace!(max = config.max, ignore_length = config.ignore_length, "progress bar created");
        Self {
            config: Arc::new(config),
            state: Arc::new(Mutex::new(State::fresh(out, now))),
        }
    }

    /// Adds `delta` to the counter, re-rendering if the display changed.
    ///
    /// In indeterminate mode the counter wraps modulo the internal maximum
    /// instead of overflowing, which makes the bar a repeating spinner.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidConfiguration`] if max is zero;
    /// [`ProgressError::CounterOverflow`] if, in determinate mode, the
    /// result would exceed max (the state is left untouched); any sink
    /// write failure, verbatim.
    pub fn advance(&self, delta: i64) -> Result<(), ProgressError> {
        let mut state = self.state.lock();
        self.advance_locked(&mut state, delta)
    }

    /// Sets the counter to an absolute value: `advance(value - current)`.
    ///
    /// # Errors
    ///
    /// Same as [`advance`](Self::advance).
    pub fn set(&self, value: i64) -> Result<(), ProgressError> {
        let mut state = self.state.lock();
        let delta = value - state.current;
        self.advance_locked(&mut state, delta)
    }

    /// Fills the bar to max and forces the final render/completion check.
    ///
    /// # Errors
    ///
    /// Same as [`advance`](Self::advance).
    pub fn finish(&self) -> Result<(), ProgressError> {
        let mut state = self.state.lock();
        state.current = self.config.max;
        self.advance_locked(&mut state, 0)
    }

    /// Reinitializes the counters, time anchors, and the rate window. The
    /// configuration is untouched.
    pub fn reset(&self) {
        let now = Instant::now();
        self.state.lock().rearm(now);
        trace!("progress bar reset");
    }

    /// Erases the bar's line from the terminal. Display-only: no counter
    /// or percent value changes.
    ///
    /// # Errors
    ///
    /// Sink write failures, verbatim.
    pub fn clear(&self) -> Result<(), ProgressError> {
        let mut state = self.state.lock();
        let State {
            out,
            max_line_width,
            ..
        } = &mut *state;
        writer::clear_line(out.as_mut(), *max_line_width)?;
        Ok(())
    }

    /// Draws the current frame immediately, typically to show the 0% state
    /// right after construction.
    ///
    /// # Errors
    ///
    /// Sink write failures, verbatim.
    pub fn render_blank(&self) -> Result<(), ProgressError> {
        let mut state = self.state.lock();
        self.render_locked(&mut state, Instant::now())
    }

    /// The configured maximum. In indeterminate mode this is the substituted
    /// internal maximum (the bar width).
    #[must_use]
    pub fn max(&self) -> i64 {
        self.config.max
    }

    /// Whether the counter has reached max.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.lock().finished
    }

    /// A read-only projection of the current state for programmatic
    /// consumers. Acquires the lock, copies, releases.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock();
        let now = Instant::now();

        let seconds_elapsed = now.duration_since(state.start).as_secs_f64();
        let percent_complete = if self.config.max == 0 {
            0.0
        } else {
            state.current as f64 / self.config.max as f64
        };
        let seconds_remaining = if state.current > 0 {
            seconds_elapsed / state.current as f64 * (self.config.max - state.current) as f64
        } else {
            0.0
        };
        let kb_per_second = if seconds_elapsed > 0.0 {
            state.current_bytes / 1024.0 / seconds_elapsed
        } else {
            0.0
        };

        Snapshot {
            percent_complete,
            bytes_processed: state.current_bytes,
            seconds_elapsed,
            seconds_remaining,
            kb_per_second,
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn advance_locked(&self, state: &mut State, delta: i64) -> Result<(), ProgressError> {
        let config = &self.config;
        if config.max == 0 {
            return Err(ProgressError::InvalidConfiguration);
        }

        // Overflow is rejected before anything is touched, so a failed call
        // leaves the state exactly as it was.
        if !config.ignore_length {
            match state.current.checked_add(delta) {
                Some(next) if next <= config.max => {}
                _ => {
                    return Err(ProgressError::CounterOverflow {
                        current: state.current,
                        delta,
                        max: config.max,
                    });
                }
            }
        }

        let now = Instant::now();
        if config.ignore_length {
            state.current = state.current.wrapping_add(delta).rem_euclid(config.max);
        } else {
            state.current += delta;
        }
        state.current_bytes += delta as f64;
        state.rate.record(delta as f64, now);

        let fraction = state.current as f64 / config.max as f64;
        state.fill_width = (fraction * config.width as f64) as usize;
        state.percent = (fraction * 100.0) as i64;
        let percent_changed = state.percent != state.last_percent && state.percent > 0;
        state.last_percent = state.percent;

        // Annotated displays change on every call; bar-only displays only
        // when the integer percent moves.
        if percent_changed
            || config.show_iterations_per_second
            || config.show_iterations_count
        {
            self.render_locked(state, now)?;
        }
        Ok(())
    }

    fn render_locked(&self, state: &mut State, now: Instant) -> Result<(), ProgressError> {
        let config = &self.config;

        // One-way transition: once the final frame is out nothing more is
        // written, not even an erase.
        if state.finished {
            return Ok(());
        }

        // Wall-clock throttle. The frame that reaches max always shows.
        if now.duration_since(state.last_render) < config.throttle && state.current < config.max {
            return Ok(());
        }

        // The frame that lands on max is the completion frame. The flag
        // flips before layout so that frame reports the whole-run average
        // instead of the rolling window, which over-weights a recent burst.
        let completing = state.current >= config.max;
        if completing {
            state.finished = true;
        }

        let layout_state = LayoutState {
            current: state.current,
            current_bytes: state.current_bytes,
            percent: state.percent,
            fill_width: state.fill_width,
            start: state.start,
            finished: state.finished,
            smoothed_rate: state.rate.smoothed(),
        };

        writer::clear_line(state.out.as_mut(), state.max_line_width)?;

        if completing {
            trace!(max = config.max, "progress bar finished");
            if !config.clear_on_finish {
                let frame = render::layout(config, &layout_state, now);
                writer::write_frame(state.out.as_mut(), &frame.line)?;
                state.max_line_width = state.max_line_width.max(frame.width);
            }
            if let Some(hook) = &config.on_completion {
                hook();
            }
            return Ok(());
        }

        let frame = render::layout(config, &layout_state, now);
        writer::write_frame(state.out.as_mut(), &frame.line)?;
        state.max_line_width = state.max_line_width.max(frame.width);
        state.last_render = now;
        Ok(())
    }
}

/// A plain-data snapshot of the bar's derived metrics at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    percent_complete: f64,
    bytes_processed: f64,
    seconds_elapsed: f64,
    seconds_remaining: f64,
    kb_per_second: f64,
}

impl Snapshot {
    /// Fraction of max completed, 0.0 to 1.0.
    #[must_use]
    pub const fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    /// Cumulative advanced amount.
    #[must_use]
    pub const fn bytes_processed(&self) -> f64 {
        self.bytes_processed
    }

    /// Seconds since construction or the last reset.
    #[must_use]
    pub const fn seconds_elapsed(&self) -> f64 {
        self.seconds_elapsed
    }

    /// Predicted seconds to completion at the average rate since start.
    #[must_use]
    pub const fn seconds_remaining(&self) -> f64 {
        self.seconds_remaining
    }

    /// Whole-run average throughput in kB per second.
    #[must_use]
    pub const fn kb_per_second(&self) -> f64 {
        self.kb_per_second
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    use compact_str::CompactString;
    use parking_lot::Mutex;

    use super::ProgressBar;
    use crate::{
        builder::{ProgressBarBuilder, Theme},
        error::ProgressError,
    };

    /// In-memory sink shared between the bar and the test.
    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn hash_theme() -> Theme {
        Theme {
            fill: "#".into(),
            head: "".into(),
            pad: "-".into(),
            bar_start: "[".into(),
            bar_end: "]".into(),
        }
    }

    fn bare_bar(max: i64, sink: &SharedSink) -> ProgressBar {
        ProgressBarBuilder::new(max)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_writer(sink.clone())
            .assemble()
    }

    /// Concrete Scenario
    /// max=200, width=10: advance(100) draws `[#####-----]` at 50%, a second
    /// advance(100) draws the full bar at 100% and triggers completion once.
    #[test]
    fn test_half_then_full() {
        let sink = SharedSink::default();
        let completions = Arc::new(AtomicUsize::new(0));
        let hook_count = completions.clone();
        let bar = ProgressBarBuilder::new(200)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_on_completion(move || {
                hook_count.fetch_add(1, Ordering::SeqCst);
            })
            .with_writer(sink.clone())
            .assemble();

        bar.advance(100).unwrap();
        let halfway = sink.contents();
        assert!(halfway.contains("[#####-----]"), "got: {halfway:?}");
        assert!(halfway.contains("  50%"), "got: {halfway:?}");
        assert_eq!(completions.load(Ordering::SeqCst), 0);

        bar.advance(100).unwrap();
        let done = sink.contents();
        assert!(done.contains("[##########]"), "got: {done:?}");
        assert!(done.contains(" 100%"), "got: {done:?}");
        assert!(bar.is_finished());
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    /// Completion Uniqueness
    /// Any sequence of deltas summing to max finishes exactly once and
    /// invokes the hook exactly once, even with redundant finish calls.
    #[test]
    fn test_completion_fires_once() {
        let sink = SharedSink::default();
        let completions = Arc::new(AtomicUsize::new(0));
        let hook_count = completions.clone();
        let bar = ProgressBarBuilder::new(100)
            .with_width(10)
            .with_predict_time(false)
            .with_on_completion(move || {
                hook_count.fetch_add(1, Ordering::SeqCst);
            })
            .with_writer(sink.clone())
            .assemble();

        for _ in 0..4 {
            bar.advance(25).unwrap();
        }
        assert!(bar.is_finished());
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        bar.finish().unwrap();
        bar.advance(0).unwrap();
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    /// Zero Max
    /// Advancing a zero-max bar always fails, whatever the delta.
    #[test]
    fn test_zero_max_is_invalid() {
        let sink = SharedSink::default();
        let bar = bare_bar(0, &sink);
        assert!(matches!(
            bar.advance(0),
            Err(ProgressError::InvalidConfiguration)
        ));
        assert!(matches!(
            bar.advance(10),
            Err(ProgressError::InvalidConfiguration)
        ));
    }

    /// Overflow Atomicity
    /// A rejected advance leaves every counter untouched, and the bar keeps
    /// working afterwards.
    #[test]
    fn test_overflow_leaves_state_unchanged() {
        let sink = SharedSink::default();
        let bar = bare_bar(100, &sink);

        bar.advance(60).unwrap();
        let before = bar.snapshot();

        let err = bar.advance(60).unwrap_err();
        assert!(matches!(
            err,
            ProgressError::CounterOverflow {
                current: 60,
                delta: 60,
                max: 100,
            }
        ));

        let after = bar.snapshot();
        assert_eq!(before.percent_complete(), after.percent_complete());
        assert_eq!(before.bytes_processed(), after.bytes_processed());

        bar.advance(40).unwrap();
        assert!(bar.is_finished());
    }

    /// Indeterminate Wraparound
    /// With an unknown length the counter wraps modulo the internal max and
    /// never overflows.
    #[test]
    fn test_unknown_length_wraps() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(-1)
            .with_width(10)
            .with_writer(sink.clone())
            .assemble();

        bar.advance(7).unwrap();
        assert_eq!(bar.state.lock().current, 7);
        bar.advance(7).unwrap();
        assert_eq!(bar.state.lock().current, 4);
        bar.advance(1_000_003).unwrap();
        assert_eq!(bar.state.lock().current, 7);
    }

    /// Percent Throttling
    /// Sub-percent advances on a bar-only display write nothing; the first
    /// boundary crossing writes exactly one frame.
    #[test]
    fn test_renders_only_on_percent_change() {
        let sink = SharedSink::default();
        let bar = bare_bar(1000, &sink);

        for _ in 0..5 {
            bar.advance(1).unwrap();
        }
        assert!(sink.contents().is_empty(), "sub-percent advances must not draw");

        bar.advance(5).unwrap();
        let drawn = sink.contents();
        assert_eq!(drawn.matches('%').count(), 1, "got: {drawn:?}");
        assert!(drawn.contains("   1%"), "got: {drawn:?}");
    }

    /// Wall-Clock Throttle
    /// Inside the throttle interval nothing is written, except the frame
    /// that reaches max, which always shows.
    #[test]
    fn test_throttle_suppresses_frames_until_max() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(100)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_throttle(std::time::Duration::from_secs(3600))
            .with_writer(sink.clone())
            .assemble();

        bar.advance(50).unwrap();
        assert!(sink.contents().is_empty(), "throttled frame must not draw");

        bar.advance(50).unwrap();
        assert!(
            sink.contents().contains("[##########]"),
            "reaching max bypasses the throttle, got: {:?}",
            sink.contents()
        );
    }

    /// Final Frame Rate
    /// An early burst inflates the rolling-window mean; the completion
    /// frame must report the whole-run average instead.
    #[test]
    fn test_final_frame_reports_whole_run_average() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(1000)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_iterations_per_second()
            .with_writer(sink.clone())
            .assemble();

        // ~1650 units/sec in the window, ~475 units/sec over the run
        thread::sleep(std::time::Duration::from_millis(600));
        bar.advance(990).unwrap();
        thread::sleep(std::time::Duration::from_millis(1500));
        bar.advance(10).unwrap();

        let output = sink.contents();
        let last = output.rsplit('\r').find(|f| f.contains('%')).unwrap();
        let rate: f64 = last
            .split_once('(')
            .and_then(|(_, rest)| rest.split_once(' '))
            .and_then(|(figure, _)| figure.parse().ok())
            .unwrap();
        assert!(rate < 600.0, "got {rate} it/s in frame {last:?}");
    }

    /// Annotated displays bypass percent throttling.
    #[test]
    fn test_count_annotation_renders_every_call() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(1000)
            .with_width(10)
            .with_predict_time(false)
            .with_iterations_count()
            .with_writer(sink.clone())
            .assemble();

        bar.advance(1).unwrap();
        bar.advance(1).unwrap();
        let drawn = sink.contents();
        assert!(drawn.contains("(1/1000)"), "got: {drawn:?}");
        assert!(drawn.contains("(2/1000)"), "got: {drawn:?}");
    }

    /// Display-Only Clear
    /// Clearing erases the line but changes no counter.
    #[test]
    fn test_clear_is_display_only() {
        let sink = SharedSink::default();
        let bar = bare_bar(200, &sink);

        bar.advance(100).unwrap();
        let before = bar.snapshot();
        bar.clear().unwrap();
        let after = bar.snapshot();

        assert_eq!(before.percent_complete(), after.percent_complete());
        assert_eq!(before.bytes_processed(), after.bytes_processed());
        assert!(sink.contents().ends_with('\r'), "clear must end rewound");
    }

    /// Clear On Finish
    /// Completion erases the line instead of drawing the full bar.
    #[test]
    fn test_clear_on_finish_erases_final_frame() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(10)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_clear_on_finish()
            .with_writer(sink.clone())
            .assemble();

        bar.advance(10).unwrap();
        assert!(bar.is_finished());
        assert!(
            !sink.contents().contains("[##########]"),
            "final frame must be suppressed, got: {:?}",
            sink.contents()
        );
    }

    #[test]
    fn test_set_is_relative_advance() {
        let sink = SharedSink::default();
        let bar = bare_bar(100, &sink);

        bar.set(30).unwrap();
        assert_eq!(bar.state.lock().current, 30);
        bar.set(20).unwrap();
        assert_eq!(bar.state.lock().current, 20);
        assert!(bar.set(101).is_err());
        assert_eq!(bar.state.lock().current, 20);
    }

    #[test]
    fn test_reset_rearms_counters() {
        let sink = SharedSink::default();
        let bar = bare_bar(100, &sink);

        bar.advance(80).unwrap();
        bar.reset();

        let snap = bar.snapshot();
        assert_eq!(snap.percent_complete(), 0.0);
        assert_eq!(snap.bytes_processed(), 0.0);
        assert!(!bar.is_finished());
        bar.advance(80).unwrap();
    }

    /// Serialized Updates
    /// Concurrent advances through cloned handles are lossless.
    #[test]
    fn test_concurrent_advances_are_serialized() {
        let sink = SharedSink::default();
        let bar = bare_bar(1000, &sink);
        let mut handles = vec![];

        for _ in 0..10 {
            let bar = bar.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    bar.advance(1).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(bar.is_finished());
        assert_eq!(bar.state.lock().current, 1000);
    }

    /// Blank Render
    /// The 0% frame can be drawn before any progress.
    #[test]
    fn test_render_blank_draws_zero_state() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(50)
            .with_width(10)
            .with_theme(hash_theme())
            .with_predict_time(false)
            .with_render_blank(true)
            .with_writer(sink.clone())
            .build()
            .unwrap();

        assert!(sink.contents().contains("   0%"), "got: {:?}", sink.contents());
        drop(bar);
    }

    #[test]
    fn test_description_is_rendered() {
        let sink = SharedSink::default();
        let bar = ProgressBarBuilder::new(10)
            .with_width(10)
            .with_description(CompactString::from("syncing "))
            .with_predict_time(false)
            .with_writer(sink.clone())
            .assemble();

        bar.advance(5).unwrap();
        assert!(sink.contents().contains("syncing "), "got: {:?}", sink.contents());
    }
}
