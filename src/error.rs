//! Error types surfaced by counter mutations, construction, and rendering.

use thiserror::Error;

/// Errors returned by [`ProgressBar`](crate::ProgressBar) mutators and by
/// [`ProgressBarBuilder::build`](crate::ProgressBarBuilder::build).
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The configured maximum is zero, so progress cannot be expressed.
    #[error("max must be greater than zero")]
    InvalidConfiguration,

    /// A determinate-mode advance would push the counter past the maximum.
    ///
    /// The call is rejected before any state is touched, so the bar is left
    /// exactly as it was.
    #[error("counter would exceed max ({current} + {delta} > {max})")]
    CounterOverflow {
        /// Counter value at the time of the rejected call.
        current: i64,
        /// The rejected delta.
        delta: i64,
        /// Configured maximum.
        max: i64,
    },

    /// The requested spinner variant is not in the frame table.
    #[error("unknown spinner variant {0}")]
    UnknownSpinner(usize),

    /// Writing to the output sink failed. Propagated verbatim, never retried.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
