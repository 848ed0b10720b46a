//! HTTP transport for the modem
//!
//! JSON in, JSON out. WAV bytes travel as standard base64. Modem work runs
//! on the blocking pool so long payloads do not stall the runtime.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fskwave_core::{validate_noise_level, ModemError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub text: String,
    #[serde(default)]
    pub noise_level: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub audio_base64: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub audio_base64: String,
    #[serde(default)]
    pub add_noise: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Modem(#[from] ModemError),

    #[error("Invalid base64 audio: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/encode", post(encode))
        .route("/decode", post(decode))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(bind: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn encode(Json(request): Json<EncodeRequest>) -> Result<Json<EncodeResponse>, ApiError> {
    if request.text.is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }
    let noise_level = validate_noise_level(request.noise_level)?;

    let text = request.text;
    let wav = tokio::task::spawn_blocking(move || fskwave_core::encode(&text, noise_level)).await??;
    info!("Encoded request into {} WAV bytes", wav.len());

    Ok(Json(EncodeResponse {
        audio_base64: STANDARD.encode(wav),
    }))
}

async fn decode(Json(request): Json<DecodeRequest>) -> Result<Json<DecodeResponse>, ApiError> {
    let wav = STANDARD.decode(request.audio_base64.trim())?;
    let add_noise = request.add_noise;

    let text = tokio::task::spawn_blocking(move || fskwave_core::decode(&wav, add_noise)).await??;
    info!("Decoded {} characters", text.chars().count());

    Ok(Json(DecodeResponse { text }))
}
