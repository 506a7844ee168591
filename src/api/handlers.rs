//! Request handlers for the HTTP surface
//!
//! Each handler translates one HTTP request into extractor calls and shapes
//! the outcome as a response. Handlers hold no state beyond their arguments;
//! a failing request affects nothing but its own response.

use crate::api::error::ApiError;
use crate::api::models::{
    DownloadParams, FormatsResponse, HealthResponse, InfoParams, InfoResponse, SERVICE_NAME,
};
use crate::api::state::AppState;
use crate::extractor::models::{Format, FormatSelector, VideoInfo};
use crate::extractor::youtube;
use crate::utils::error::TubeloaderError;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Json, Response};
use std::sync::Arc;
use tracing::{debug, info};

/// GET / - service index
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/info": "GET /info?url=<video URL or id>",
            "/formats": "GET /formats?url=<video URL or id>",
            "/download": "GET /download?url=<video URL or id>&format=<format id or best|medium|worst|audio>",
            "/health": "Health check"
        },
        "example": "/info?url=https://youtu.be/kV1qVKlseIU"
    }))
}

/// GET /health - liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

/// GET /info - full metadata for a video reference
pub async fn info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InfoParams>,
) -> Result<Json<InfoResponse>, ApiError> {
    let target = required_url(params.url)?;
    debug!("GetInfo for {}", target);

    let video = state.extractor.extract_info(&target).await?;
    info!(
        "Resolved {} via {}",
        video.id,
        video.extractor.as_deref().unwrap_or("unknown")
    );

    Ok(Json(InfoResponse::from_video(&video)))
}

/// GET /formats - downloadable formats in the extractor's own order
///
/// Goes through the routed extractor without the metadata fallback: the
/// fallback knows no formats, so an upstream failure must stay an upstream
/// failure instead of becoming an empty list.
pub async fn formats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InfoParams>,
) -> Result<Json<FormatsResponse>, ApiError> {
    let target = required_url(params.url)?;
    debug!("ListFormats for {}", target);

    let video = state.extractor.extract_info_routed(&target).await?;
    Ok(Json(FormatsResponse::from_video(&video)))
}

/// GET /download - redirect to (or relay) the selected format's media URL
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    let target = required_url(params.url)?;
    let requested = params.format.unwrap_or_default();
    let selector = FormatSelector::parse(&requested);

    let video = state.extractor.extract_info_routed(&target).await?;
    let format = selector.resolve(&video.formats).ok_or_else(|| {
        TubeloaderError::FormatNotAvailable(if requested.trim().is_empty() {
            "best".to_string()
        } else {
            requested.clone()
        })
    })?;

    info!(
        "Download {} format {} ({})",
        video.id,
        format.format_id,
        if params.proxy { "proxy" } else { "redirect" }
    );

    let media_url = if format.url.is_empty() {
        state
            .extractor
            .get_direct_url(&target, &format.format_id)
            .await?
    } else {
        format.url.clone()
    };

    if params.proxy {
        proxy_stream(&state, &video, format, &media_url).await
    } else {
        redirect_to(&media_url)
    }
}

/// Reject a missing or malformed `url` parameter before touching any
/// extractor.
fn required_url(url: Option<String>) -> Result<String, ApiError> {
    match url {
        Some(raw) => Ok(youtube::normalize_reference(&raw)?),
        None => Err(TubeloaderError::InvalidReference(
            "missing required query parameter 'url'".to_string(),
        )
        .into()),
    }
}

/// 302 to the resolved media URL
fn redirect_to(media_url: &str) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(media_url).map_err(|_| {
        TubeloaderError::OperationFailed("resolved media URL is not a valid header value".to_string())
    })?;

    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(Body::empty())
        .map_err(|e| TubeloaderError::OperationFailed(format!("failed to build redirect: {e}")).into())
}

/// Relay the media bytes through this service.
///
/// The upstream body is pulled lazily: when the client drops the
/// connection, this response body is dropped with it, which releases the
/// upstream connection as well.
async fn proxy_stream(
    state: &AppState,
    video: &VideoInfo,
    format: &Format,
    media_url: &str,
) -> Result<Response, ApiError> {
    debug!("Proxying media for {} from {}", video.id, media_url);

    let upstream = state
        .http
        .get(media_url)
        .send()
        .await
        .map_err(TubeloaderError::from)?;

    if !upstream.status().is_success() {
        return Err(TubeloaderError::Upstream(format!(
            "media host returned {}",
            upstream.status()
        ))
        .into());
    }

    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(content_type_for_container(&format.ext)));
    let content_length = upstream.content_length();

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type);
    if let Some(length) = content_length {
        builder = builder.header(CONTENT_LENGTH, length);
    }

    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment_filename(&video.title, &format.ext)
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        builder = builder.header(CONTENT_DISPOSITION, value);
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| TubeloaderError::OperationFailed(format!("failed to build response: {e}")).into())
}

/// Content type by container extension, for hosts that don't say
fn content_type_for_container(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "3gp" => "video/3gpp",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        "ogg" | "oga" | "opus" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Filename for the Content-Disposition header, built from the video title
fn attachment_filename(title: &str, ext: &str) -> String {
    let base: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(80)
        .collect();
    let base = base.trim().trim_matches('.');

    if base.is_empty() {
        format!("download.{ext}")
    } else {
        format!("{base}.{ext}")
    }
}
