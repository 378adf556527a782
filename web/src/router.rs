use crate::controller::{
    index_controller, location_controller, stream_controller, weather_controller,
};
use axum::{
    routing::{get, post},
    Router,
};
use service::AppState;
use tower_http::services::ServeDir;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(index_routes())
        .merge(stream_routes(app_state.clone()))
        .merge(weather_routes(app_state.clone()))
        .merge(location_routes(app_state))
        .nest_service("/static", static_routes())
}

fn index_routes() -> Router {
    Router::new().route("/", get(index_controller::index))
}

fn stream_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sse", get(stream_controller::stream))
        .with_state(app_state)
}

fn weather_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/weather", post(weather_controller::submit))
        .with_state(app_state)
}

fn location_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/location", get(location_controller::location))
        .with_state(app_state)
}

fn static_routes() -> ServeDir {
    ServeDir::new("static")
}
