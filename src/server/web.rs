//! # Web Layer
//!
//! HTTP API for image steganography.
//!
//! ## Routes
//!
//! | Route              | Form fields          | Response                              |
//! |--------------------|----------------------|---------------------------------------|
//! | `GET /`            |                      | configured index page                 |
//! | `POST /encode`     | `image`, `message`   | base64 of the image with the message  |
//! | `POST /decode`     | `image`              | the hidden message as plain text      |
//! | `GET /api/health`  |                      | JSON status and request counters      |
//!
//! Any other path is served from the static directory.

use anyhow::Result;
use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::error::ApiError;
use super::metrics::ServiceMetrics;
use super::server::StegoService;
use crate::common::config::ServiceConfig;

/// State shared by all handlers.
pub struct AppState {
    pub service: StegoService,
    pub config: ServiceConfig,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            service: StegoService::new(ServiceMetrics::new()),
            config,
        }
    }
}

/// Fields of an encode/decode upload.
#[derive(Debug, Default)]
struct UploadForm {
    image: Option<Vec<u8>>,
    message: Option<String>,
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let web = &state.config.web;
    let index = ServeFile::new(web.index_path());
    let assets = ServeDir::new(&web.static_dir);
    let cors = web.cors_permissive;
    let body_limit = state.config.server.max_upload_bytes;

    let app = Router::new()
        .route("/encode", post(encode_handler))
        .route("/decode", post(decode_handler))
        .route("/api/health", get(health_check))
        .route_service("/", index)
        .fallback_service(assets)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(state));

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind the configured address and serve until the process is stopped.
pub async fn run(config: ServiceConfig) -> Result<()> {
    let addr = config.server.address.clone();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Web server running on http://{}", addr);
    info!("📡 API endpoints: POST /encode, POST /decode");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "lsb-steganography",
        "metrics": state.service.metrics().snapshot(),
    }))
}

async fn encode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<String, ApiError> {
    let form = read_form(multipart).await?;
    let image = form.image.ok_or(ApiError::MissingField("image"))?;
    // A missing message field embeds the empty message.
    let message = form.message.unwrap_or_default();

    let request_id = rand::random::<u64>();
    let encoded = state.service.encode(request_id, image, message).await?;

    Ok(general_purpose::STANDARD.encode(&encoded))
}

async fn decode_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<String, ApiError> {
    let form = read_form(multipart).await?;
    let image = form.image.ok_or(ApiError::MissingField("image"))?;

    let request_id = rand::random::<u64>();
    state.service.decode(request_id, image).await
}

/// Drain the multipart body, keeping the `image` and `message` fields.
/// Unknown fields are skipped.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let data = field.bytes().await?;
                info!("📤 Received image: {} ({} bytes)", filename, data.len());
                form.image = Some(data.to_vec());
            }
            "message" => form.message = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}
