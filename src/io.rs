//! I/O wrappers for tracking data transfer.
//!
//! [`ProgressReader`] and [`ProgressWriter`] wrap any [`std::io::Read`] or
//! [`std::io::Write`] and advance the bar by the number of bytes moved on
//! every call, so a bar can sit transparently inside a copy pipeline.
//! Counter errors (e.g. a transfer running past a mis-declared max) are
//! deliberately not surfaced through the stream: the transfer itself is the
//! source of truth and must not be aborted by its own progress display.
//!
//! Closing is an explicit capability: wrapped streams that can be closed
//! implement [`CloseStream`], and only then do the wrappers offer
//! [`close`](ProgressReader::close). No runtime type inspection.
//!
//! The bar itself also implements [`Read`] and [`Write`] as pure counting
//! endpoints: bytes are counted, not stored.

use std::{
    fs::File,
    io::{self, Read, Write},
    net::{Shutdown, TcpStream},
};

use crate::ProgressBar;

/// Explicit close capability for streams wrapped by the progress adapters.
pub trait CloseStream {
    /// Flush any buffered state and close the stream.
    ///
    /// # Errors
    ///
    /// Whatever the underlying close reports.
    fn close(&mut self) -> io::Result<()>;
}

impl CloseStream for File {
    fn close(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl CloseStream for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// A wrapper around [`Read`] that advances a [`ProgressBar`] by bytes read.
pub struct ProgressReader<R> {
    inner: R,
    bar: ProgressBar,
}

impl<R> ProgressReader<R> {
    /// Wraps `inner`, advancing `bar` on every read.
    pub const fn new(inner: R, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// Unwraps the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: CloseStream> ProgressReader<R> {
    /// Closes the wrapped stream and drives the bar to completion.
    ///
    /// # Errors
    ///
    /// Whatever the underlying close reports.
    pub fn close(mut self) -> io::Result<()> {
        self.inner.close()?;
        let _ = self.bar.finish();
        Ok(())
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let _ = self.bar.advance(n as i64);
        Ok(n)
    }
}

/// A wrapper around [`Write`] that advances a [`ProgressBar`] by bytes
/// written.
pub struct ProgressWriter<W> {
    inner: W,
    bar: ProgressBar,
}

impl<W> ProgressWriter<W> {
    /// Wraps `inner`, advancing `bar` on every write.
    pub const fn new(inner: W, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// Unwraps the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: CloseStream> ProgressWriter<W> {
    /// Closes the wrapped sink and drives the bar to completion.
    ///
    /// # Errors
    ///
    /// Whatever the underlying close reports.
    pub fn close(mut self) -> io::Result<()> {
        self.inner.close()?;
        let _ = self.bar.finish();
        Ok(())
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        let _ = self.bar.advance(n as i64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Counting sink: bytes are tallied, not kept. A counter failure (overflow
/// past max) surfaces as an I/O error.
impl Write for ProgressBar {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len();
        self.advance(n as i64).map_err(io::Error::other)?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Counting source: reports the whole buffer as read and tallies it.
impl Read for ProgressBar {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len();
        self.advance(n as i64).map_err(io::Error::other)?;
        Ok(n)
    }
}
