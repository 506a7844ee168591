//! YouTube reference parsing and URL construction
//!
//! Accepts the common URL shapes (watch, youtu.be, embed, shorts, /v/) as
//! well as bare 11-character video ids, and builds the canonical watch,
//! embed, and thumbnail URLs from an id.

use crate::utils::error::{Result, TubeloaderError};

/// YouTube video ids are exactly 11 characters from this alphabet
const VIDEO_ID_LEN: usize = 11;

/// URL fragments that are followed by a video id
const ID_MARKERS: &[&str] = &[
    "watch?v=",
    "youtu.be/",
    "/embed/",
    "/shorts/",
    "/vi/",
    "/v/",
    "?v=",
    "&v=",
    "vi=",
];

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Extract the 11-character video id from a URL or bare id.
///
/// Returns `None` when the reference carries no recognizable id; callers
/// decide whether to reject the reference or forward it to the extractor
/// untouched.
pub fn extract_video_id(reference: &str) -> Option<&str> {
    let trimmed = reference.trim();

    if trimmed.len() == VIDEO_ID_LEN && trimmed.chars().all(is_id_char) {
        return Some(trimmed);
    }

    for marker in ID_MARKERS {
        if let Some(pos) = trimmed.find(marker) {
            let tail = &trimmed[pos + marker.len()..];
            // Byte slicing is safe here only if the id region is ASCII
            if tail.len() >= VIDEO_ID_LEN
                && tail.is_char_boundary(VIDEO_ID_LEN)
                && tail[..VIDEO_ID_LEN].chars().all(is_id_char)
            {
                return Some(&tail[..VIDEO_ID_LEN]);
            }
        }
    }

    None
}

/// Whether a URL points at YouTube at all
pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Canonical watch page URL for a video id
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Embeddable player URL for a video id
pub fn embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}

/// Thumbnail URL for a video id at a named tier
/// (`default`, `mqdefault`, `hqdefault`, `sddefault`, `maxresdefault`)
pub fn thumbnail_url(id: &str, tier: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/{tier}.jpg")
}

/// Turn a raw reference into something an extractor can fetch.
///
/// Bare ids and recognizable YouTube URLs canonicalize to the watch page;
/// other absolute URLs pass through untouched so the extractor can decide
/// support. Anything else is rejected before it reaches a subprocess
/// argument list.
pub fn normalize_reference(reference: &str) -> Result<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(TubeloaderError::InvalidReference(
            "empty video reference".to_string(),
        ));
    }

    if let Some(id) = extract_video_id(trimmed) {
        return Ok(watch_url(id));
    }

    // A YouTube URL that carries no extractable video id (truncated id,
    // playlist, channel page) names no single video, so it never reaches
    // the extractor.
    if is_youtube_url(trimmed) {
        return Err(TubeloaderError::InvalidReference(trimmed.to_string()));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(trimmed.to_string());
    }

    Err(TubeloaderError::InvalidReference(trimmed.to_string()))
}
