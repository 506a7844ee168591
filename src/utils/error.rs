//! Error handling for Tubeloader

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, TubeloaderError>;

/// Main error type for Tubeloader
#[derive(Debug, Error)]
pub enum TubeloaderError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Invalid video reference: {0}")]
    InvalidReference(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Format not available: {0}")]
    FormatNotAvailable(String),

    #[error("Upstream extraction failed: {0}")]
    Upstream(String),

    #[error("Upstream request timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TubeloaderError {
    /// Whether a metadata fallback extractor may be worth trying.
    ///
    /// Reference-level failures must surface as-is: retrying a video that
    /// does not exist on another extractor would only mask the real outcome.
    pub fn is_upstream(&self) -> bool {
        !matches!(
            self,
            Self::InvalidReference(_) | Self::VideoNotFound(_) | Self::FormatNotAvailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_failures_are_not_upstream() {
        assert!(!TubeloaderError::VideoNotFound("abc".into()).is_upstream());
        assert!(!TubeloaderError::InvalidReference("abc".into()).is_upstream());
        assert!(!TubeloaderError::FormatNotAvailable("137".into()).is_upstream());
    }

    #[test]
    fn operational_failures_are_upstream() {
        assert!(TubeloaderError::Upstream("boom".into()).is_upstream());
        assert!(TubeloaderError::UpstreamTimeout(30).is_upstream());
        assert!(TubeloaderError::YtDlpNotFound.is_upstream());
    }
}
