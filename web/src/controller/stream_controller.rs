use crate::sink::ChannelSink;
use async_stream::stream;
use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use bytes::Bytes;
use events::SensorKind;
use log::*;
use service::AppState;
use std::convert::Infallible;
use tokio::sync::mpsc;

/// How a reading is shown to the browser: each event's payload is a small
/// HTML fragment the dashboard swaps into the matching section.
pub(crate) fn render_reading(kind: SensorKind, value: &str) -> String {
    match kind {
        SensorKind::LocalTemperature => format!("<h3>{value}\u{00b0}C</h3>"),
        SensorKind::LocalHumidity => format!("<h3>{value}%</h3>"),
        SensorKind::OutdoorTemperature => format!("<h3>{value}</h3>"),
    }
}

/// SSE handler that establishes a long-lived connection streaming sensor
/// updates until the client disconnects or the server shuts down.
pub(crate) async fn stream(State(app_state): State<AppState>) -> impl IntoResponse {
    debug!("establishing event stream connection");

    // Capacity 1: the stream loop stays suspended until the previous record
    // has been handed to the body, so each event is flushed out on its own.
    let (tx, mut rx) = mpsc::channel::<Bytes>(1);

    let broadcaster = app_state.broadcaster.clone();
    let shutdown = app_state.shutdown_signal();
    let keep_alive = app_state.config.sse_keep_alive_interval();

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);
        let result =
            sse::stream_updates(&broadcaster, render_reading, &mut sink, shutdown, keep_alive)
                .await;
        match result {
            Ok(()) => debug!("event stream closed"),
            Err(e) => debug!("event stream aborted: {e}"),
        }
    });

    let body = Body::from_stream(stream! {
        while let Some(record) = rx.recv().await {
            yield Ok::<_, Infallible>(record);
        }
    });

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        body,
    )
}
