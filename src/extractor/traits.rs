use crate::extractor::models::{Format, VideoInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Core trait for all video extractors
///
/// This trait isolates the HTTP layer from the specific extraction method
/// (yt-dlp subprocess, oEmbed lookup, etc.).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp", "oembed")
    fn id(&self) -> &'static str;

    /// Checks if this extractor can handle the given URL
    ///
    /// This is used to route requests to the most capable extractor first.
    fn supports(&self, url: &str) -> bool;

    /// Extracts video information
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;

    /// Gets available formats (usually calls extract_info internally)
    async fn get_formats(&self, url: &str) -> Result<Vec<Format>> {
        let info = self.extract_info(url).await?;
        Ok(info.formats)
    }

    /// Resolves the direct download URL for a specific format
    async fn get_direct_url(&self, url: &str, format_id: &str) -> Result<String>;
}
