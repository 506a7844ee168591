//! Shared request-handler state

use crate::extractor::{HybridExtractor, OEmbedExtractor, YtDlpExtractor};
use crate::utils::config::Settings;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::warn;

/// User agent presented to the video host; some media CDNs reject
/// non-browser clients outright.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Everything a request handler needs, shared immutably across requests.
///
/// No field is mutated after construction, so concurrent requests never
/// coordinate: the extractor registry is read-only and the reqwest client
/// manages its own connection pool internally.
pub struct AppState {
    pub extractor: Arc<HybridExtractor>,
    pub http: reqwest::Client,
    pub settings: Settings,
}

impl AppState {
    /// Build the default extractor registry: yt-dlp primary, oEmbed
    /// metadata fallback.
    pub fn new(settings: Settings) -> Result<Self> {
        let http = build_client(&settings)?;

        let ytdlp = YtDlpExtractor::new(&settings);
        if !ytdlp.available() {
            warn!("yt-dlp not found; format listing and downloads will fail until it is installed");
            warn!("Install it with: pip install yt-dlp  (or: brew install yt-dlp)");
        }

        let oembed = OEmbedExtractor::new(http.clone(), settings.oembed_timeout());
        let extractor = Arc::new(HybridExtractor::new(
            vec![Arc::new(ytdlp)],
            Arc::new(oembed),
        ));

        Ok(Self {
            extractor,
            http,
            settings,
        })
    }

    /// State with a caller-supplied extractor registry
    pub fn with_extractor(extractor: Arc<HybridExtractor>, settings: Settings) -> Result<Self> {
        let http = build_client(&settings)?;
        Ok(Self {
            extractor,
            http,
            settings,
        })
    }
}

fn build_client(settings: &Settings) -> Result<reqwest::Client> {
    // Connect and idle-read phases are bounded; a total request timeout
    // would cut off long media relays mid-stream.
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(settings.upstream_timeout())
        .read_timeout(settings.upstream_timeout())
        .build()?;
    Ok(client)
}
