//! oEmbed metadata fallback
//!
//! YouTube's oEmbed endpoint serves title, author, and thumbnail for any
//! public video without an API key. It cannot enumerate formats or resolve
//! media URLs, so this extractor only backs up metadata lookups when the
//! primary extractor is unavailable or failing.

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::extractor::youtube;
use crate::utils::error::{Result, TubeloaderError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Metadata-only extractor backed by the YouTube oEmbed API
pub struct OEmbedExtractor {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: String,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl OEmbedExtractor {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self::with_endpoint(client, OEMBED_ENDPOINT.to_string(), timeout)
    }

    /// Point the extractor at a different oEmbed endpoint.
    pub fn with_endpoint(client: reqwest::Client, endpoint: String, timeout: Duration) -> Self {
        Self {
            client,
            endpoint,
            timeout,
        }
    }
}

#[async_trait]
impl Extractor for OEmbedExtractor {
    fn id(&self) -> &'static str {
        "oembed"
    }

    fn supports(&self, url: &str) -> bool {
        youtube::is_youtube_url(url)
    }

    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        let Some(id) = youtube::extract_video_id(url) else {
            return Err(TubeloaderError::Upstream(
                "oEmbed lookup needs a recognizable video id".to_string(),
            ));
        };
        let watch = youtube::watch_url(id);

        debug!("Fetching oEmbed metadata for {}", id);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", watch.as_str()), ("format", "json")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TubeloaderError::UpstreamTimeout(self.timeout.as_secs())
                } else {
                    TubeloaderError::Network(e)
                }
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                return Err(TubeloaderError::VideoNotFound(url.to_string()));
            }
            status => {
                return Err(TubeloaderError::Upstream(format!(
                    "oEmbed endpoint returned {status}"
                )));
            }
        }

        let body: OEmbedResponse = response.json().await?;

        Ok(VideoInfo {
            id: id.to_string(),
            title: body.title,
            webpage_url: Some(watch),
            duration: None,
            thumbnail: body
                .thumbnail_url
                .or_else(|| Some(youtube::thumbnail_url(id, "hqdefault"))),
            uploader: body.author_name,
            formats: Vec::new(),
            extractor: Some("oembed".to_string()),
        })
    }

    async fn get_direct_url(&self, _url: &str, _format_id: &str) -> Result<String> {
        Err(TubeloaderError::Upstream(
            "oEmbed provides metadata only; it cannot resolve media URLs".to_string(),
        ))
    }
}
