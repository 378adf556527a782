//! Wire-level SSE event record and its encoder.

use std::io::{self, Write};

/// One Server-Sent Events record.
///
/// Fields are raw bytes; the encoder makes no attempt to escape them beyond
/// the newline handling the format requires. `data` may contain embedded
/// newlines: each resulting segment is written as its own `data:` line and
/// a conforming client concatenates them back with newline separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub id: Vec<u8>,
    pub data: Vec<u8>,
    /// The named event type, matched by `EventSource.addEventListener`.
    pub event: Vec<u8>,
    /// Reconnection delay hint in milliseconds.
    pub retry: Vec<u8>,
    /// Comment line, ignored by clients; usable as a keep-alive.
    pub comment: Vec<u8>,
}

impl Event {
    /// A comment-only record, e.g. a keep-alive.
    pub fn comment(text: impl Into<Vec<u8>>) -> Self {
        Self {
            comment: text.into(),
            ..Self::default()
        }
    }

    /// Encodes this record into `w`.
    ///
    /// An event with neither data nor comment encodes to nothing. Otherwise
    /// the record is, in order: an `id:` line (always present with data,
    /// even when the id is empty), one `data:` line per newline-separated
    /// segment of the payload, `event:` and `retry:` lines when non-empty,
    /// a comment line when non-empty, and the mandatory blank-line
    /// terminator.
    ///
    /// The first failed write aborts the remaining steps; whatever prefix
    /// already reached `w` is left as-is, since a failing sink means the
    /// connection is being torn down anyway.
    pub fn marshal_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.data.is_empty() && self.comment.is_empty() {
            return Ok(());
        }

        if !self.data.is_empty() {
            w.write_all(b"id: ")?;
            w.write_all(&self.id)?;
            w.write_all(b"\n")?;

            for segment in self.data.split(|byte| *byte == b'\n') {
                w.write_all(b"data: ")?;
                w.write_all(segment)?;
                w.write_all(b"\n")?;
            }

            if !self.event.is_empty() {
                w.write_all(b"event: ")?;
                w.write_all(&self.event)?;
                w.write_all(b"\n")?;
            }

            if !self.retry.is_empty() {
                w.write_all(b"retry: ")?;
                w.write_all(&self.retry)?;
                w.write_all(b"\n")?;
            }
        }

        if !self.comment.is_empty() {
            w.write_all(b": ")?;
            w.write_all(&self.comment)?;
            w.write_all(b"\n")?;
        }

        w.write_all(b"\n")
    }
}
