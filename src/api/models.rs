//! Wire types for the HTTP surface

use crate::extractor::models::{Format, FormatKind, VideoInfo};
use crate::extractor::youtube;
use serde::{Deserialize, Serialize};

/// Service name reported by `/` and `/health`
pub const SERVICE_NAME: &str = "tubeloader";

/// Query parameters for `/info` and `/formats`
#[derive(Debug, Deserialize)]
pub struct InfoParams {
    pub url: Option<String>,
}

/// Query parameters for `/download`
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
    pub format: Option<String>,
    #[serde(default)]
    pub proxy: bool,
}

/// One downloadable encoding, as exposed over the API
#[derive(Debug, Clone, Serialize)]
pub struct FormatDescriptor {
    pub format_id: String,
    pub kind: FormatKind,
    pub container: String,
    pub resolution: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f32>,
    pub bitrate_kbps: Option<f32>,
    pub filesize_approx: Option<u64>,
    pub note: Option<String>,
}

impl FormatDescriptor {
    /// Build the wire form of an extractor format.
    ///
    /// Formats carrying neither audio nor video (storyboards) are not
    /// downloadable encodings and yield `None`.
    pub fn from_format(format: &Format) -> Option<Self> {
        let kind = format.kind()?;
        Some(Self {
            format_id: format.format_id.clone(),
            kind,
            container: format.ext.clone(),
            resolution: format.resolution.clone().or_else(|| {
                match (format.width, format.height) {
                    (Some(w), Some(h)) => Some(format!("{w}x{h}")),
                    _ => None,
                }
            }),
            width: format.width,
            height: format.height,
            fps: format.fps,
            bitrate_kbps: format.tbr,
            filesize_approx: format.approx_size(),
            note: format.format_note.clone(),
        })
    }
}

/// Wire forms of every downloadable format, in the extractor's own order
pub fn descriptors(formats: &[Format]) -> Vec<FormatDescriptor> {
    formats.iter().filter_map(FormatDescriptor::from_format).collect()
}

/// Thumbnail URL tiers served by img.youtube.com
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailSet {
    pub default: String,
    pub medium: String,
    pub high: String,
    pub standard: String,
    pub maxres: String,
}

impl ThumbnailSet {
    pub fn for_video(id: &str) -> Self {
        Self {
            default: youtube::thumbnail_url(id, "default"),
            medium: youtube::thumbnail_url(id, "mqdefault"),
            high: youtube::thumbnail_url(id, "hqdefault"),
            standard: youtube::thumbnail_url(id, "sddefault"),
            maxres: youtube::thumbnail_url(id, "maxresdefault"),
        }
    }
}

/// Response body for `GET /info`
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub duration_seconds: Option<u64>,
    pub thumbnail: Option<String>,
    pub thumbnails: Option<ThumbnailSet>,
    pub video_url: String,
    pub embed_url: Option<String>,
    pub format_count: usize,
    pub formats: Vec<FormatDescriptor>,
}

impl InfoResponse {
    pub fn from_video(info: &VideoInfo) -> Self {
        let formats = descriptors(&info.formats);
        // Ids from other platforms can collide with the YouTube id shape,
        // so tier URLs are only derived for actual YouTube pages.
        let youtube_id = if youtube::is_youtube_url(info.page_url()) {
            youtube::extract_video_id(info.page_url())
                .or_else(|| youtube::extract_video_id(&info.id))
        } else {
            None
        };

        Self {
            id: info.id.clone(),
            title: info.title.clone(),
            author: info.uploader.clone(),
            duration_seconds: info.duration.map(|d| d.round() as u64),
            thumbnail: info
                .thumbnail
                .clone()
                .or_else(|| youtube_id.map(|id| youtube::thumbnail_url(id, "hqdefault"))),
            thumbnails: youtube_id.map(ThumbnailSet::for_video),
            video_url: info.page_url().to_string(),
            embed_url: youtube_id.map(youtube::embed_url),
            format_count: formats.len(),
            formats,
        }
    }
}

/// Response body for `GET /formats`
#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub id: String,
    pub count: usize,
    pub formats: Vec<FormatDescriptor>,
}

impl FormatsResponse {
    pub fn from_video(info: &VideoInfo) -> Self {
        let formats = descriptors(&info.formats);
        Self {
            id: info.id.clone(),
            count: formats.len(),
            formats,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn current() -> Self {
        Self {
            status: "ok",
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
