use axum::response::Html;

/// The dashboard page, compiled into the binary so the server has no view
/// directory to locate at runtime. It subscribes to `/sse` and swaps each
/// event's payload into the matching section.
const INDEX_PAGE: &str = include_str!("../../../static/index.html");

/// GET the station dashboard.
pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
