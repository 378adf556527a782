//! Per-connection consumption loop.

use crate::broadcaster::Broadcaster;
use crate::event::Event;
use async_trait::async_trait;
use bytes::Bytes;
use events::SensorKind;
use log::*;
use std::io;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant};

/// Destination for fully encoded event records.
///
/// One sink is exclusively owned by one connection's stream loop. An
/// implementation must have flushed the record toward the client by the time
/// `write_event` returns; an error means the connection is dead and the loop
/// stops without retrying.
#[async_trait]
pub trait EventSink: Send {
    async fn write_event(&mut self, record: Bytes) -> io::Result<()>;
}

const KEEP_ALIVE_COMMENT: &[u8] = b"keep-alive";

/// Streams sensor updates to one client until shutdown or a sink failure.
///
/// The loop waits simultaneously on the shutdown signal, all sensor slots of
/// the broadcaster, and a keep-alive timer. A received reading is rendered
/// by `render` into the event payload and sent under its kind's wire label;
/// after `keep_alive` of inactivity a comment-only record goes out so
/// intermediaries do not tear the idle connection down.
///
/// Returns `Ok(())` on shutdown (a deliberate signal, not an error) and the
/// underlying I/O error when encoding or delivery fails.
pub async fn stream_updates<S, R>(
    broadcaster: &Broadcaster,
    render: R,
    sink: &mut S,
    mut shutdown: watch::Receiver<bool>,
    keep_alive: Duration,
) -> io::Result<()>
where
    S: EventSink,
    R: Fn(SensorKind, &str) -> String + Send,
{
    let mut keep_alive = interval_at(Instant::now() + keep_alive, keep_alive);

    loop {
        let event = tokio::select! {
            _ = shutdown.changed() => {
                debug!("shutdown signalled, closing event stream");
                return Ok(());
            }
            reading = broadcaster.recv() => match reading {
                Some(reading) => Event {
                    data: render(reading.kind, &reading.value).into_bytes(),
                    event: reading.kind.event_label().as_bytes().to_vec(),
                    ..Event::default()
                },
                // Every ingest handle is gone; nothing further can arrive.
                None => return Ok(()),
            },
            _ = keep_alive.tick() => Event::comment(KEEP_ALIVE_COMMENT),
        };

        let mut record = Vec::new();
        event.marshal_to(&mut record)?;
        if record.is_empty() {
            continue;
        }
        sink.write_event(record.into()).await?;
        keep_alive.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::SensorReading;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    // Long enough that no keep-alive fires during a normal test.
    const QUIET_KEEP_ALIVE: Duration = Duration::from_secs(3600);

    fn render(kind: SensorKind, value: &str) -> String {
        format!("[{kind}] {value}")
    }

    /// Forwards records to the test body and optionally starts failing after
    /// a number of successful writes.
    struct TestSink {
        tx: mpsc::UnboundedSender<Bytes>,
        successes_left: usize,
    }

    #[async_trait]
    impl EventSink for TestSink {
        async fn write_event(&mut self, record: Bytes) -> io::Result<()> {
            if self.successes_left == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.successes_left -= 1;
            self.tx
                .send(record)
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "receiver dropped"))
        }
    }

    struct Harness {
        broadcaster: Arc<Broadcaster>,
        shutdown_tx: watch::Sender<bool>,
        records: mpsc::UnboundedReceiver<Bytes>,
        loop_task: JoinHandle<io::Result<()>>,
    }

    fn start(successes_left: usize, keep_alive: Duration) -> Harness {
        let broadcaster = Arc::new(Broadcaster::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (tx, records) = mpsc::unbounded_channel();

        let loop_task = {
            let broadcaster = broadcaster.clone();
            tokio::spawn(async move {
                let mut sink = TestSink { tx, successes_left };
                stream_updates(&broadcaster, render, &mut sink, shutdown_rx, keep_alive).await
            })
        };

        Harness {
            broadcaster,
            shutdown_tx,
            records,
            loop_task,
        }
    }

    #[tokio::test]
    async fn test_reading_is_encoded_and_delivered() {
        let mut harness = start(usize::MAX, QUIET_KEEP_ALIVE);

        harness
            .broadcaster
            .publish(SensorReading::new(SensorKind::LocalTemperature, "21.5"))
            .await;

        let record = timeout(Duration::from_secs(1), harness.records.recv())
            .await
            .expect("record should arrive")
            .unwrap();
        assert_eq!(
            record,
            &b"id: \ndata: [localtemp] 21.5\nevent: localtemp\n\n"[..]
        );

        harness.shutdown_tx.send(true).unwrap();
        harness.loop_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_while_waiting_exits_cleanly() {
        let mut harness = start(usize::MAX, QUIET_KEEP_ALIVE);

        harness.shutdown_tx.send(true).unwrap();

        let result = timeout(Duration::from_secs(1), harness.loop_task)
            .await
            .expect("loop should observe shutdown")
            .unwrap();
        assert!(result.is_ok());
        // No writes happened before or after the signal.
        assert!(harness.records.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sink_failure_terminates_after_first_event() {
        let mut harness = start(1, QUIET_KEEP_ALIVE);

        harness
            .broadcaster
            .publish(SensorReading::new(SensorKind::LocalHumidity, "61"))
            .await;
        let first = timeout(Duration::from_secs(1), harness.records.recv())
            .await
            .expect("first record should arrive")
            .unwrap();
        assert_eq!(first, &b"id: \ndata: [localhumi] 61\nevent: localhumi\n\n"[..]);

        // The second delivery fails; the loop must stop with the error.
        harness
            .broadcaster
            .publish(SensorReading::new(SensorKind::LocalHumidity, "62"))
            .await;
        let result = timeout(Duration::from_secs(1), harness.loop_task)
            .await
            .expect("loop should stop on sink failure")
            .unwrap();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);

        // The failed event was never delivered and nothing else was tried.
        assert!(harness.records.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_stream_sends_keep_alive_comment() {
        let mut harness = start(usize::MAX, Duration::from_secs(15));

        // No readings are published; virtual time advances to the tick.
        let record = harness.records.recv().await.unwrap();
        assert_eq!(record, &b": keep-alive\n\n"[..]);

        harness.shutdown_tx.send(true).unwrap();
        harness.loop_task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivered_event_defers_keep_alive() {
        let mut harness = start(usize::MAX, Duration::from_secs(15));

        harness
            .broadcaster
            .publish(SensorReading::new(SensorKind::OutdoorTemperature, "12"))
            .await;

        let first = harness.records.recv().await.unwrap();
        assert!(first.starts_with(b"id: "), "reading should arrive first");

        // The next record is a keep-alive, a full interval after the event.
        let second = harness.records.recv().await.unwrap();
        assert_eq!(second, &b": keep-alive\n\n"[..]);

        harness.shutdown_tx.send(true).unwrap();
        harness.loop_task.await.unwrap().unwrap();
    }
}
