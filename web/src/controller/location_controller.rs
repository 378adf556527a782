use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use service::AppState;

/// GET the configured location label of this station.
pub(crate) async fn location(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, app_state.config.station_location.clone())
}
