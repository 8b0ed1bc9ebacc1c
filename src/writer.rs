//! Line-oriented output: erase the previous frame, emit the next one.
//!
//! The writer never assumes terminal-level clear-line support. Erasing is
//! done by overwriting the widest line seen so far with spaces, and frames
//! are written with a leading carriage return and no trailing newline so
//! successive frames overwrite in place.

use std::io::{self, Write};

/// Erase the previously drawn line: `\r`, `width` spaces, `\r`.
pub(crate) fn clear_line(out: &mut dyn Write, width: usize) -> io::Result<()> {
    write!(out, "\r{:width$}\r", "")?;
    flush_best_effort(out);
    Ok(())
}

/// Write one frame. The frame carries its own leading `\r`.
pub(crate) fn write_frame(out: &mut dyn Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    flush_best_effort(out);
    Ok(())
}

/// Not every sink can flush, and a failed flush is not actionable.
fn flush_best_effort(out: &mut dyn Write) {
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::{clear_line, write_frame};

    #[test]
    fn test_clear_overwrites_with_spaces() {
        let mut buf = Vec::new();
        clear_line(&mut buf, 5).unwrap();
        assert_eq!(buf, b"\r     \r");
    }

    #[test]
    fn test_clear_zero_width() {
        let mut buf = Vec::new();
        clear_line(&mut buf, 0).unwrap();
        assert_eq!(buf, b"\r\r");
    }

    #[test]
    fn test_frame_written_verbatim() {
        let mut buf = Vec::new();
        write_frame(&mut buf, "\r 50% |██  |").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\r 50% |██  |");
    }
}
