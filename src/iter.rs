//! Iterator adapters for automatic progress tracking.
//!
//! The [`ProgressIteratorExt`] trait attaches a bar to any [`Iterator`] with
//! one method call. [`Iterator::size_hint`] decides the mode: an exact upper
//! bound gives a determinate bar with that maximum, unknown bounds give an
//! indeterminate spinner.
//!
//! ```no_run
//! use barline::ProgressIteratorExt as _;
//!
//! for item in (0..1000).progress() {
//!     // ...
//! }
//! ```

use crate::progress::ProgressBar;

/// An iterator adapter that advances a bar once per yielded item and
/// finishes it on exhaustion.
pub struct ProgressIterator<I> {
    iter: I,
    bar: ProgressBar,
}

impl<I> ProgressIterator<I> {
    /// Wraps `iter`, advancing `bar` on every `next()`.
    ///
    /// Usually constructed via [`ProgressIteratorExt`].
    pub const fn new(iter: I, bar: ProgressBar) -> Self {
        Self { iter, bar }
    }

    /// A clone of the attached bar handle.
    #[must_use]
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl<I: Iterator> Iterator for ProgressIterator<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();
        if item.is_some() {
            let _ = self.bar.advance(1);
        } else {
            let _ = self.bar.finish();
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait attaching progress tracking to any [`Iterator`].
pub trait ProgressIteratorExt: Sized {
    /// Wraps the iterator with a default bar, sized from `size_hint` (an
    /// indeterminate spinner when the size is unknown).
    fn progress(self) -> ProgressIterator<Self>;

    /// Wraps the iterator with an existing bar.
    fn progress_with(self, bar: ProgressBar) -> ProgressIterator<Self>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> ProgressIterator<Self> {
        let max = max_from_size_hint(&self);
        ProgressIterator::new(self, ProgressBar::new(max))
    }

    fn progress_with(self, bar: ProgressBar) -> ProgressIterator<Self> {
        ProgressIterator::new(self, bar)
    }
}

/// Exact upper bound when known, otherwise the unknown-length sentinel.
#[allow(clippy::cast_possible_wrap)]
fn max_from_size_hint<I: Iterator>(iter: &I) -> i64 {
    match iter.size_hint() {
        (lower, Some(upper)) if upper == lower => upper as i64,
        _ => -1,
    }
}
