//! Data structures for video information

use serde::{Deserialize, Serialize};

/// Video information structure, mirroring the shape of `yt-dlp --dump-json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    pub uploader: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
    pub extractor: Option<String>,
}

impl VideoInfo {
    /// Canonical page URL for this video, falling back to the id
    pub fn page_url(&self) -> &str {
        self.webpage_url.as_deref().unwrap_or(&self.id)
    }
}

/// Video format information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    pub ext: String,
    pub resolution: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
    #[serde(default)]
    pub url: String,
    pub quality: Option<f32>,
    pub fps: Option<f32>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub format_note: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tbr: Option<f32>, // Total bitrate
    pub vbr: Option<f32>, // Video bitrate
    pub abr: Option<f32>, // Audio bitrate
}

/// Which media tracks a format carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    AudioOnly,
    VideoOnly,
    Combined,
}

impl Format {
    /// Classify this format by track presence.
    ///
    /// yt-dlp reports an absent track as codec `"none"`. Formats carrying
    /// neither track (storyboard images) yield `None`. Formats where the
    /// extractor reports no codec fields at all are treated as full media.
    pub fn kind(&self) -> Option<FormatKind> {
        match (self.vcodec.as_deref(), self.acodec.as_deref()) {
            (None, None) => Some(FormatKind::Combined),
            (v, a) => {
                let video = v.is_some_and(|c| c != "none");
                let audio = a.is_some_and(|c| c != "none");
                match (video, audio) {
                    (true, true) => Some(FormatKind::Combined),
                    (true, false) => Some(FormatKind::VideoOnly),
                    (false, true) => Some(FormatKind::AudioOnly),
                    (false, false) => None,
                }
            }
        }
    }

    /// Approximate size in bytes, if the extractor reported one
    pub fn approx_size(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }

    fn video_rank(&self) -> (u32, u32) {
        (
            self.height.unwrap_or(0),
            self.tbr.unwrap_or(0.0).round() as u32,
        )
    }

    fn audio_rank(&self) -> u32 {
        self.abr.or(self.tbr).unwrap_or(0.0).round() as u32
    }
}

/// How a download request names the format it wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSelector {
    /// An exact format id from the extractor's list
    Id(String),
    /// Highest-resolution combined format
    Best,
    /// Combined format at or below 720p
    Medium,
    /// Lowest-resolution combined format
    Worst,
    /// Highest-bitrate audio-only format
    Audio,
}

impl FormatSelector {
    /// Parse a selector string. An empty selector means "best".
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "best" | "high" => Self::Best,
            "medium" => Self::Medium,
            "low" | "worst" => Self::Worst,
            "audio" | "bestaudio" => Self::Audio,
            _ => Self::Id(raw.trim().to_string()),
        }
    }

    /// Resolve this selector against an extractor's format list.
    ///
    /// Quality tiers consider combined formats only, matching what a
    /// progressive-stream client can play without merging tracks. Exact ids
    /// must name a format with at least one playable track, so storyboard
    /// entries stay unreachable. Returns `None` when nothing in the list
    /// satisfies the selector.
    pub fn resolve<'a>(&self, formats: &'a [Format]) -> Option<&'a Format> {
        match self {
            Self::Id(id) => formats
                .iter()
                .find(|f| f.format_id == *id && f.kind().is_some()),
            Self::Best => combined(formats).max_by_key(|f| f.video_rank()),
            Self::Worst => combined(formats).min_by_key(|f| f.video_rank()),
            Self::Medium => combined(formats)
                .filter(|f| f.height.unwrap_or(0) <= 720)
                .max_by_key(|f| f.video_rank())
                .or_else(|| combined(formats).min_by_key(|f| f.video_rank())),
            Self::Audio => formats
                .iter()
                .filter(|f| f.kind() == Some(FormatKind::AudioOnly))
                .max_by_key(|f| f.audio_rank()),
        }
    }
}

fn combined<'a>(formats: &'a [Format]) -> impl Iterator<Item = &'a Format> {
    formats
        .iter()
        .filter(|f| f.kind() == Some(FormatKind::Combined))
}
