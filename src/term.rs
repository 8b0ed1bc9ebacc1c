//! Terminal width as an injected capability.
//!
//! Full-width rendering needs the live column count of the terminal. Rather
//! than querying the environment from inside the layout code, the bar carries
//! a [`TerminalWidth`] provider chosen at construction: [`EnvTerminal`] asks
//! the real terminal, [`FixedTerminal`] returns a constant for tests and
//! non-tty sinks.

/// Provides the terminal column count at render time.
pub trait TerminalWidth: Send + Sync {
    /// Current number of terminal columns.
    fn columns(&self) -> usize;
}

/// Queries the live terminal, falling back to 80 columns when the query
/// fails (e.g. output is piped).
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvTerminal;

impl TerminalWidth for EnvTerminal {
    fn columns(&self) -> usize {
        crossterm::terminal::size().map_or(80, |(w, _)| usize::from(w))
    }
}

/// A fixed column count.
#[derive(Clone, Copy, Debug)]
pub struct FixedTerminal(
    /// The column count to report.
    pub usize,
);

impl TerminalWidth for FixedTerminal {
    fn columns(&self) -> usize {
        self.0
    }
}
