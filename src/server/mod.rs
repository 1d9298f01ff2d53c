use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::extractors::{FetchOptions, TranscriptPayload, TranscriptSource};
use crate::utils::redact_url_credentials;
use crate::TranscriptError;

const USAGE: &str = "YouTube transcript API is running. Use `/transcript/:videoId` to fetch transcripts, optionally with `?lang=<code>`.";

const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn TranscriptSource>,
}

impl AppState {
    pub fn new(source: impl TranscriptSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(usage))
        .route("/transcript/{video_id}", get(transcript))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &Config, state: AppState) -> crate::Result<()> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.bind_address()))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "{} transcript API listening on http://{}",
        state.source.platform_name(),
        addr
    );
    match &config.http.proxy_url {
        Some(proxy) => tracing::info!("Using proxy: {}", redact_url_credentials(proxy)),
        None => tracing::info!("No proxy configured. Set PROXY_URL to route requests through one."),
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM (what `docker stop` sends)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("Shutting down");
}

async fn usage() -> &'static str {
    USAGE
}

async fn transcript(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let options = FetchOptions {
        lang: query_lang(query.as_deref()),
    };
    let lang = options.display_language().to_string();

    match state.source.fetch_transcript(&video_id, &options).await {
        Ok(transcript) => Ok(Json(TranscriptResponse {
            success: true,
            video_id,
            lang,
            transcript,
        })),
        Err(source) => {
            if source.is_classified() {
                tracing::warn!("Failed to fetch transcript for {}: {}", video_id, source);
            } else {
                tracing::error!("Failed to fetch transcript for {}: {}", video_id, source);
            }
            Err(ApiError {
                video_id,
                lang,
                source,
            })
        }
    }
}

/// First `lang` value of the query string; later repeats are ignored
fn query_lang(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "lang")
        .map(|(_, value)| value.into_owned())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub success: bool,
    pub video_id: String,
    pub lang: String,
    pub transcript: TranscriptPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub video_id: String,
    pub lang: String,
    pub error: String,
}

/// A failed fetch together with the request it belongs to
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct ApiError {
    video_id: String,
    lang: String,
    source: TranscriptError,
}

/// HTTP status reported for each kind of fetch failure
pub fn status_for(error: &TranscriptError) -> StatusCode {
    match error {
        TranscriptError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        TranscriptError::VideoUnavailable { .. }
        | TranscriptError::TranscriptsDisabled { .. }
        | TranscriptError::TranscriptsNotAvailable { .. }
        | TranscriptError::LanguageNotAvailable { .. } => StatusCode::NOT_FOUND,
        TranscriptError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
        TranscriptError::Http(_) | TranscriptError::InvalidPayload(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.source);
        let error = if self.source.is_classified() {
            self.source.to_string()
        } else {
            UNEXPECTED_ERROR.to_string()
        };

        let body = ErrorResponse {
            success: false,
            video_id: self.video_id,
            lang: self.lang,
            error,
        };

        (status, Json(body)).into_response()
    }
}
