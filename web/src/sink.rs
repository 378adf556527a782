use async_trait::async_trait;
use bytes::Bytes;
use sse::EventSink;
use std::io;
use tokio::sync::mpsc;

/// Bridges a stream loop to the HTTP response body.
///
/// Each record becomes its own body chunk, which hyper writes and flushes to
/// the socket, so "flush after each event" holds without the loop touching
/// the connection directly. When the client goes away axum drops the
/// receiving half and the next write surfaces as a broken pipe.
pub(crate) struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelSink {
    pub(crate) fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn write_event(&mut self, record: Bytes) -> io::Result<()> {
        self.tx
            .send(record)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "client disconnected"))
    }
}
