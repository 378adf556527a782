use crate::controller::ApiResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json};
use events::{SensorKind, SensorReading};
use log::*;
use serde::Deserialize;
use service::AppState;

/// Form body posted by the station firmware. A field it has no new value
/// for is omitted or left empty.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WeatherParams {
    localtemp: Option<String>,
    localhumi: Option<String>,
    outtemp: Option<String>,
}

impl WeatherParams {
    /// The readings actually submitted. An empty string means "no update
    /// for this field in this submission" and is dropped here, before
    /// anything reaches the broadcaster.
    fn into_readings(self) -> Vec<SensorReading> {
        let fields = [
            (SensorKind::LocalTemperature, self.localtemp),
            (SensorKind::LocalHumidity, self.localhumi),
            (SensorKind::OutdoorTemperature, self.outtemp),
        ];

        fields
            .into_iter()
            .filter_map(|(kind, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| SensorReading::new(kind, v))
            })
            .collect()
    }
}

/// POST a weather submission.
///
/// Each submitted value is published onto its sensor's slot in field order.
/// A publish suspends this handler while the previous value of the same
/// kind is still undrained; the station posts infrequently enough that this
/// is the intended pacing, not a problem to engineer around.
pub(crate) async fn submit(
    State(app_state): State<AppState>,
    Form(params): Form<WeatherParams>,
) -> impl IntoResponse {
    let readings = params.into_readings();

    for reading in &readings {
        info!("POSTed {}: {}", reading.kind, reading.value);
        app_state.broadcaster.publish(reading.clone()).await;
    }

    Json(ApiResponse::new(StatusCode::OK.into(), readings))
}
