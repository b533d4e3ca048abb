//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::location::LocationSnapshot;
use crate::map::MapFrame;
use crate::search::{annotate, SearchRequest, SiteResult};
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::warn;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir)
        .append_index_html_on_directories(true);

    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/location", get(location_handler))
        .route("/api/location/device", post(device_handler))
        .route("/api/location/device/failed", post(device_failed_handler))
        .route("/api/location/click", post(click_handler))
        .route("/api/location/draft", put(draft_handler))
        .route("/api/location/manual", post(manual_submit_handler))
        .route("/api/location/reset", post(reset_handler))
        .route("/api/location/mode", post(mode_handler))
        .route("/api/search", post(search_handler))
        .route("/api/results", get(results_handler))
        .route("/api/map", get(map_handler))
        .fallback_service(static_dir)
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip)]
    status: Option<u16>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            e if e.is_user_correctable() => StatusCode::BAD_REQUEST,
            Error::LocationUnresolved => StatusCode::CONFLICT,
            Error::Transport(_) | Error::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("Request failed: {}", err);
        }
        ApiError {
            error: err.user_message(),
            code: err.code().to_string(),
            status: Some(status.as_u16()),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    /// Search API query URL
    pub api_url: String,
    /// Theme the front-end should start in
    pub theme_mode: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_url: state.coordinator.query_url().to_string(),
        theme_mode: state.config.theme.default_mode.clone(),
    })
}

/// Current location state
///
/// GET /api/location
async fn location_handler(State(state): State<Arc<AppState>>) -> Json<LocationSnapshot> {
    Json(state.location.read().await.snapshot())
}

/// Device location reported by the front-end
///
/// POST /api/location/device
async fn device_handler(
    State(state): State<Arc<AppState>>,
    Json(coords): Json<Coordinates>,
) -> Result<Json<LocationSnapshot>, ApiError> {
    coords.validate()?;
    let mut location = state.location.write().await;
    location.resolve_device(coords);
    Ok(Json(location.snapshot()))
}

/// Front-end could not determine the device location
///
/// POST /api/location/device/failed
async fn device_failed_handler(State(state): State<Arc<AppState>>) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    location.resolve_device_failed();
    Json(location.snapshot())
}

/// Map click sets the search point
///
/// POST /api/location/click
async fn click_handler(
    State(state): State<Arc<AppState>>,
    Json(coords): Json<Coordinates>,
) -> Result<Json<LocationSnapshot>, ApiError> {
    // Coordinates arrive over the network here, not from the map surface
    coords.validate()?;
    let mut location = state.location.write().await;
    location.set_search_point_from_map_click(coords);
    Ok(Json(location.snapshot()))
}

/// Manual draft body
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub lat: String,
    pub lon: String,
}

/// Replace the manual draft text
///
/// PUT /api/location/draft
async fn draft_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DraftRequest>,
) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    location.set_draft(req.lat, req.lon);
    Json(location.snapshot())
}

/// Submit the manual draft
///
/// POST /api/location/manual
async fn manual_submit_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LocationSnapshot>, ApiError> {
    let mut location = state.location.write().await;
    location.submit_manual_draft()?;
    Ok(Json(location.snapshot()))
}

/// Return to the device location
///
/// POST /api/location/reset
async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    location.reset_to_device();
    Json(location.snapshot())
}

/// Mode selection body; toggles when `manual` is omitted
#[derive(Debug, Default, Deserialize)]
pub struct ModeRequest {
    pub manual: Option<bool>,
}

/// Switch between map selection and manual entry
///
/// POST /api/location/mode
async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModeRequest>,
) -> Json<LocationSnapshot> {
    let mut location = state.location.write().await;
    match req.manual {
        Some(manual) => location.set_manual_mode(manual),
        None => location.toggle_manual_mode(),
    }
    Json(location.snapshot())
}

/// Search body
///
/// `limit` and `radius_km` accept numbers or form text; unusable values
/// fall back to the defaults.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query_text: String,
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
    #[serde(default)]
    pub radius_km: Option<serde_json::Value>,
}

fn field_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub request: SearchRequest,
    pub results: Vec<SiteResult>,
}

/// Run a search around the active point
///
/// POST /api/search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    // The location lock is not held across the network call
    let center = state.location.read().await.active_search_point();
    let request = SearchRequest::build(
        center,
        &body.query_text,
        &field_text(body.limit.as_ref()),
        &field_text(body.radius_km.as_ref()),
    )?;

    let sites = state.coordinator.send(&request).await?;

    let current = state.location.read().await.display_point();
    let results = annotate(&sites, current);
    state.store_results(sites).await;

    Ok(Json(SearchResponse { request, results }))
}

/// Last results, annotated against the current search point
///
/// GET /api/results
async fn results_handler(State(state): State<Arc<AppState>>) -> Json<Vec<SiteResult>> {
    Json(state.annotated_results().await)
}

/// What the map should show
///
/// GET /api/map
async fn map_handler(State(state): State<Arc<AppState>>) -> Json<MapFrame> {
    let results = state.annotated_results().await;
    let location = state.location.read().await;
    Json(MapFrame::build(&location, &results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::location::LocationState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn delhi() -> Coordinates {
        Coordinates::new(28.7041, 77.1025)
    }

    fn create_test_state(api_base: &str) -> Arc<AppState> {
        let mut config = Config::default();
        config.api.base_url = api_base.to_string();
        let mut location = LocationState::new();
        location.resolve_device(delhi());
        Arc::new(AppState::new(config, location).unwrap())
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn mock_search_api(reply: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .mount(&server)
            .await;
        server
    }

    fn sites() -> serde_json::Value {
        json!([{
            "id": 5,
            "score": 0.9,
            "payload": {
                "article_title": "Qutub Minar",
                "text": "Minaret.",
                "location": { "lat": 28.5245, "lon": 77.1855 }
            }
        }])
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state("http://localhost:5000"));
        let (status, body) = send(app, "GET", "/api/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["running"], true);
        assert_eq!(body["api_url"], "http://localhost:5000/api/query");
        assert_eq!(body["theme_mode"], "light");
    }

    #[tokio::test]
    async fn test_location_endpoint() {
        let app = create_router(create_test_state("http://localhost:5000"));
        let (status, body) = send(app, "GET", "/api/location", None).await;

        assert_eq!(status, StatusCode::OK);
        let snapshot: LocationSnapshot = serde_json::from_value(body).unwrap();
        assert_eq!(snapshot.active_search_point, Some(delhi()));
    }

    #[tokio::test]
    async fn test_click_moves_search_point() {
        let state = create_test_state("http://localhost:5000");
        let app = create_router(state.clone());

        let (status, body) = send(
            app,
            "POST",
            "/api/location/click",
            Some(json!({ "lat": 28.5, "lon": 77.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active_search_point"]["lat"], 28.5);
        assert_eq!(body["device_location"]["lat"], 28.7041);
    }

    #[tokio::test]
    async fn test_click_rejects_out_of_range() {
        let app = create_router(create_test_state("http://localhost:5000"));
        let (status, body) = send(
            app,
            "POST",
            "/api/location/click",
            Some(json!({ "lat": 120.0, "lon": 77.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "COORDINATE_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_manual_entry_flow() {
        let state = create_test_state("http://localhost:5000");

        let (_, body) = send(
            create_router(state.clone()),
            "POST",
            "/api/location/mode",
            Some(json!({})),
        )
        .await;
        assert_eq!(body["manual_mode"], true);
        assert_eq!(body["manual_draft"]["lat_text"], "28.704100");

        send(
            create_router(state.clone()),
            "PUT",
            "/api/location/draft",
            Some(json!({ "lat": "abc", "lon": "77" })),
        )
        .await;
        let (status, body) =
            send(create_router(state.clone()), "POST", "/api/location/manual", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_COORDINATE_FORMAT");

        send(
            create_router(state.clone()),
            "PUT",
            "/api/location/draft",
            Some(json!({ "lat": "28.6139", "lon": "77.2090" })),
        )
        .await;
        let (status, body) =
            send(create_router(state.clone()), "POST", "/api/location/manual", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active_search_point"]["lat"], 28.6139);

        let (_, body) =
            send(create_router(state), "POST", "/api/location/reset", None).await;
        assert_eq!(body["active_search_point"]["lat"], 28.7041);
        assert_eq!(body["manual_mode"], false);
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let server = mock_search_api(sites()).await;
        let state = create_test_state(&server.uri());

        let (status, body) = send(
            create_router(state.clone()),
            "POST",
            "/api/search",
            Some(json!({ "query_text": "minaret", "limit": "abc", "radius_km": 25 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["request"]["limit"], 5);
        assert_eq!(body["request"]["radius_meter"], 25000.0);
        assert_eq!(body["results"][0]["title"], "Qutub Minar");
        assert!(body["results"][0]["distance_km"].as_f64().unwrap() > 0.0);

        let (_, results) = send(create_router(state), "GET", "/api/results", None).await;
        assert_eq!(results.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_results_follow_search_point() {
        let server = mock_search_api(sites()).await;
        let state = create_test_state(&server.uri());

        send(
            create_router(state.clone()),
            "POST",
            "/api/search",
            Some(json!({ "query_text": "minaret" })),
        )
        .await;
        send(
            create_router(state.clone()),
            "POST",
            "/api/location/click",
            Some(json!({ "lat": 28.5245, "lon": 77.1855 })),
        )
        .await;

        let (_, results) = send(create_router(state), "GET", "/api/results", None).await;
        assert_eq!(results[0]["distance_km"], 0.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_click_during_search_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sites())
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;
        let state = create_test_state(&server.uri());

        let search = tokio::spawn(send(
            create_router(state.clone()),
            "POST",
            "/api/search",
            Some(json!({ "query_text": "minaret" })),
        ));
        tokio::time::sleep(Duration::from_millis(200)).await;

        // the search is still waiting on the API; the click must not block on it
        let (status, body) = tokio::time::timeout(
            Duration::from_millis(400),
            send(
                create_router(state.clone()),
                "POST",
                "/api/location/click",
                Some(json!({ "lat": 28.5245, "lon": 77.1855 })),
            ),
        )
        .await
        .expect("click waited for the search to finish");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active_search_point"]["lat"], 28.5245);

        let (status, body) = search.await.unwrap();
        assert_eq!(status, StatusCode::OK);

        // the request already sent keeps the pre-click center
        assert_eq!(body["request"]["lat"], 28.7041);
        assert_eq!(body["request"]["lon"], 77.1025);
        let sent = server.received_requests().await.unwrap();
        assert_eq!(sent.len(), 1);
        let sent_body: serde_json::Value = sent[0].body_json().unwrap();
        assert_eq!(sent_body["lat"], 28.7041);
        assert_eq!(sent_body["lon"], 77.1025);

        // distances are measured from the point clicked while in flight
        assert_eq!(body["results"][0]["distance_km"], 0.0);
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let app = create_router(create_test_state(&server.uri()));
        let (status, body) = send(
            app,
            "POST",
            "/api/search",
            Some(json!({ "query_text": "   " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_QUERY");
        assert_eq!(body["error"], "Please enter a search query");
    }

    #[tokio::test]
    async fn test_search_api_down() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let state = create_test_state(&server.uri());
        let (status, body) = send(
            create_router(state.clone()),
            "POST",
            "/api/search",
            Some(json!({ "query_text": "fort" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "TRANSPORT_ERROR");

        let (_, results) = send(create_router(state), "GET", "/api/results", None).await;
        assert!(results.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_map_endpoint() {
        let server = mock_search_api(sites()).await;
        let state = create_test_state(&server.uri());

        send(
            create_router(state.clone()),
            "POST",
            "/api/search",
            Some(json!({ "query_text": "minaret" })),
        )
        .await;

        let (status, frame) = send(create_router(state), "GET", "/api/map", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(frame["zoom"], 10);
        assert_eq!(frame["markers"].as_array().unwrap().len(), 2);
        assert_eq!(frame["markers"][0]["kind"], "device");
        assert_eq!(frame["markers"][1]["kind"], "site");
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(Some(&json!("7"))), "7");
        assert_eq!(field_text(Some(&json!(12))), "12");
        assert_eq!(field_text(Some(&json!(2.5))), "2.5");
        assert_eq!(field_text(Some(&json!(null))), "");
        assert_eq!(field_text(None), "");
    }
}
