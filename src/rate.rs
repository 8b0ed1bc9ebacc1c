//! Rolling throughput estimation.
//!
//! Single-call deltas can be very bursty (one huge chunk, then silence), so
//! the rendered rate and the ETA both come from a bounded window of recent
//! samples instead of raw deltas. Deltas accumulate until more than half a
//! second of wall time has passed, then one sample (units per second over
//! that span) is cut into the window. The reported rate is the arithmetic
//! mean of the window.
//!
//! All methods take `now` explicitly so tests can drive a synthetic clock.

use std::{collections::VecDeque, time::Duration};

use web_time::Instant;

/// Number of samples retained in the rolling window.
const WINDOW_CAPACITY: usize = 10;

/// Minimum wall-clock span accumulated before a sample is cut.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

/// Bounded sliding window of throughput samples.
#[derive(Debug)]
pub(crate) struct RateEstimator {
    window_start: Instant,
    since_window_start: f64,
    samples: VecDeque<f64>,
}

impl RateEstimator {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            since_window_start: 0.0,
            samples: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Feed a counter delta observed at `now`.
    pub(crate) fn record(&mut self, delta: f64, now: Instant) {
        self.since_window_start += delta;

        let elapsed = now.duration_since(self.window_start);
        if elapsed > SAMPLE_INTERVAL {
            if self.samples.len() == WINDOW_CAPACITY {
                self.samples.pop_front();
            }
            self.samples
                .push_back(self.since_window_start / elapsed.as_secs_f64());
            self.window_start = now;
            self.since_window_start = 0.0;
        }
    }

    /// Mean of the rolling window, or `None` while no sample has been cut.
    ///
    /// Callers fall back to the whole-run average in the `None` case, which
    /// covers the first half second of a run.
    pub(crate) fn smoothed(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        }
    }
}
