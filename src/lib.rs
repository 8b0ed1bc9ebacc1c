//! # `barline`
//!
//! A thread-safe, single-line, in-place-updating terminal progress bar.
//!
//! `barline` turns a monotonically advancing counter into live feedback for
//! long-running command-line operations: a filling bar (or a spinner when
//! the total is unknown), throughput, and an estimated completion time. It
//! is designed to be:
//!
//! * **Synchronous**: no background redraw thread. Rendering happens inside
//!   the caller's update calls, throttled by integer-percent change and by
//!   wall-clock time.
//! * **Concurrent**: handles are cheap to clone ([`std::sync::Arc`]-based);
//!   one lock serializes all updates, so frames never interleave.
//! * **Deterministic to test**: the terminal width provider and the output
//!   sink are injected capabilities, not globals.
//!
//! ```no_run
//! use barline::ProgressBar;
//!
//! let bar = ProgressBar::preset_bytes(64 * 1024 * 1024, "downloading");
//! for chunk in std::iter::repeat(4096i64).take(16 * 1024) {
//!     // ... transfer a chunk ...
//!     bar.advance(chunk)?;
//! }
//! # Ok::<(), barline::ProgressError>(())
//! ```
//!
//! ## Modules
//!
//! * [`builder`]: Fluent construction of [`ProgressBar`] instances.
//! * [`error`]: The error taxonomy for counter mutations and rendering.
//! * [`io`]: Wrappers for [`std::io::Read`] and [`std::io::Write`] that
//!   advance the counter automatically.
//! * [`iter`]: Extension traits for tracking progress over iterators.
//! * [`progress`]: The core state machine, render throttling, and snapshots.
//! * [`term`]: The injectable terminal width capability.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod io;
pub mod iter;
pub mod progress;
pub mod term;

mod color;
mod rate;
mod render;
mod spinner;
mod writer;

pub use builder::{ProgressBarBuilder, Theme};
pub use error::ProgressError;
pub use io::{CloseStream, ProgressReader, ProgressWriter};
pub use iter::{ProgressIterator, ProgressIteratorExt};
pub use progress::{ProgressBar, Snapshot};
pub use term::{EnvTerminal, FixedTerminal, TerminalWidth};
