use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Utc;
use log::{debug, error, warn};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::constants::MAX_UPLOAD_BYTES;
use crate::schema::Part;
use crate::speechace::SpeechAceClient;
use crate::store::SessionStore;

/// Shared state for the request handlers
///
/// Both components are constructed once at startup and injected here; the
/// handlers never reach for process-wide globals.
pub struct AppState {
    pub store: SessionStore,
    pub scorer: SpeechAceClient,
}

/// Run the HTTP API server
///
/// Connects to the configured MySQL database, creates the part tables if
/// needed, and serves the three exam-client endpoints until shutdown.
pub fn serve(config: Config, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let store = SessionStore::connect_from_config(&config).await?;
        store.init_schema().await?;
        let scorer = SpeechAceClient::new(config.speechace_api_key.clone());

        let app = router(AppState { store, scorer });

        let listener = tokio::net::TcpListener::bind(format!("[::]:{}", port))
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", port, e))?;
        println!("Listening on port {}", port);
        axum::serve(listener, app)
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Build the application router around the injected components
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/create_test", post(create_test_handler))
        .route("/upload_data", post(upload_data_handler))
        .route("/get_part_result", post(get_part_result_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Current Unix time as float seconds, the timestamp format of the part tables
fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

async fn health_handler() -> &'static str {
    "ok"
}

/// POST /create_test - open a new session, one row per part table
///
/// Responds with the JSON pair `[id_a, id_b]`. This response is the only
/// place the two ids appear together.
async fn create_test_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let start_time = unix_timestamp();
    match state.store.create_session(start_time).await {
        Ok((id_a, id_b)) => Json([id_a, id_b]).into_response(),
        Err(e) => {
            error!("Failed to create test session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
                .into_response()
        }
    }
}

fn bad_field(name: &str, err: axum::extract::multipart::MultipartError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("Failed to read field '{}': {}", name, err),
    )
        .into_response()
}

/// POST /upload_data - store a part's recording and its scoring result
///
/// Multipart fields: `id`, `part` ("0" or "1"), `video`, `audio`. The audio
/// is scored inline; a scoring failure fails the request, while a storage
/// failure is reported as `false` per the API contract.
async fn upload_data_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut id: Option<i64> = None;
    let mut part: Option<Part> = None;
    let mut audio: Option<Vec<u8>> = None;
    let mut audio_name = String::from("user_audio");
    let mut video_bytes = 0usize;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Malformed multipart body: {}", e),
                )
                    .into_response()
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "id" => {
                let text = match field.text().await {
                    Ok(t) => t,
                    Err(e) => return bad_field("id", e),
                };
                id = match text.trim().parse() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        return (StatusCode::BAD_REQUEST, format!("Invalid id value: '{}'", text))
                            .into_response()
                    }
                };
            }
            "part" => {
                let text = match field.text().await {
                    Ok(t) => t,
                    Err(e) => return bad_field("part", e),
                };
                part = match text.parse() {
                    Ok(p) => Some(p),
                    Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
                };
            }
            "video" => {
                // The recordings would be pushed to object storage here and
                // the returned links stored; until that lands the links stay
                // empty and the video is dropped after this read.
                match field.bytes().await {
                    Ok(bytes) => video_bytes = bytes.len(),
                    Err(e) => return bad_field("video", e),
                }
            }
            "audio" => {
                if let Some(name) = field.file_name() {
                    audio_name = name.to_string();
                }
                match field.bytes().await {
                    Ok(bytes) => audio = Some(bytes.to_vec()),
                    Err(e) => return bad_field("audio", e),
                }
            }
            _ => {}
        }
    }

    let (Some(id), Some(part), Some(audio)) = (id, part, audio) else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing required field: id, part, and audio are all required",
        )
            .into_response();
    };
    debug!(
        "Upload for id {} part {}: {} audio bytes, {} video bytes",
        id,
        part,
        audio.len(),
        video_bytes
    );

    let video_link = String::new();
    let audio_link = String::new();
    let upload_time = unix_timestamp();

    let speechace_json = match state.scorer.score(audio, &audio_name).await {
        Ok(json) => json,
        Err(e) => {
            error!("Scoring failed for id {} part {}: {}", id, part, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Scoring error: {}", e),
            )
                .into_response();
        }
    };

    match state
        .store
        .update_part(id, part, &video_link, &audio_link, upload_time, &speechace_json)
        .await
    {
        Ok(0) => {
            warn!("Upload for id {} part {} matched no row", id, part);
            Json(false).into_response()
        }
        Ok(_) => Json(true).into_response(),
        Err(e) => {
            if e.is_transient() {
                warn!("Failed to store result for id {} part {}: {}", id, part, e);
            } else {
                error!("Failed to store result for id {} part {}: {}", id, part, e);
            }
            Json(false).into_response()
        }
    }
}

#[derive(Deserialize)]
struct PartQuery {
    id: i64,
    part: String,
}

/// POST /get_part_result - return the stored scoring JSON, or `null`
///
/// The stored string is returned verbatim so the round trip through the
/// store is byte-exact.
async fn get_part_result_handler(
    State(state): State<Arc<AppState>>,
    Form(params): Form<PartQuery>,
) -> impl IntoResponse {
    let part: Part = match params.part.parse() {
        Ok(p) => p,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    match state.store.part_result(params.id, part).await {
        Ok(result) => {
            let body = result.unwrap_or_else(|| "null".to_string());
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(e) => {
            error!(
                "Failed to fetch result for id {} part {}: {}",
                params.id, part, e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
                .into_response()
        }
    }
}
