use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// The Hybrid Extractor Registry
///
/// This struct holds a list of available extractors and routes requests
/// to the most appropriate one based on `supports(url)`. Metadata lookups
/// retry on the fallback extractor, but only for upstream-class failures:
/// a video that positively does not exist must stay not-found.
pub struct HybridExtractor {
    extractors: Vec<Arc<dyn Extractor>>,
    fallback: Arc<dyn Extractor>,
}

impl HybridExtractor {
    /// Create a new HybridExtractor with the given registry and fallback
    pub fn new(extractors: Vec<Arc<dyn Extractor>>, fallback: Arc<dyn Extractor>) -> Self {
        Self {
            extractors,
            fallback,
        }
    }

    /// Find the best extractor for a given URL
    fn find_extractor(&self, url: &str) -> &Arc<dyn Extractor> {
        for extractor in &self.extractors {
            if extractor.supports(url) {
                debug!("Routing to extractor: {}", extractor.id());
                return extractor;
            }
        }
        debug!("Routing to fallback extractor: {}", self.fallback.id());
        &self.fallback
    }

    /// Extract video info using the best matching strategy
    pub async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        let extractor = self.find_extractor(url);
        match extractor.extract_info(url).await {
            Ok(video_info) => Ok(video_info),
            Err(e)
                if e.is_upstream()
                    && extractor.id() != self.fallback.id()
                    && self.fallback.supports(url) =>
            {
                info!(
                    "Primary extractor {} failed: {}. Retrying with fallback {}",
                    extractor.id(),
                    e,
                    self.fallback.id()
                );
                self.fallback.extract_info(url).await
            }
            Err(e) => Err(e),
        }
    }

    /// Extract video info from the routed extractor only, without the
    /// metadata fallback.
    ///
    /// Format listing and download resolution go through here: the fallback
    /// extractor knows no formats, so an upstream failure on those paths
    /// must surface as a failure rather than degrade into an empty list.
    pub async fn extract_info_routed(&self, url: &str) -> Result<VideoInfo> {
        let extractor = self.find_extractor(url);
        extractor.extract_info(url).await
    }

    /// Resolve a format to a direct media URL.
    ///
    /// No fallback here: the fallback extractor serves metadata only, so
    /// URL resolution errors surface from the routed extractor directly.
    pub async fn get_direct_url(&self, url: &str, format_id: &str) -> Result<String> {
        let extractor = self.find_extractor(url);
        extractor.get_direct_url(url, format_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TubeloaderError;
    use async_trait::async_trait;

    #[derive(Clone, Copy)]
    enum FailMode {
        NotFound,
        Upstream,
    }

    struct StubExtractor {
        name: &'static str,
        handles: bool,
        fail: Option<FailMode>,
    }

    fn stub_info(name: &str) -> VideoInfo {
        VideoInfo {
            id: "dQw4w9WgXcQ".to_string(),
            title: format!("video from {name}"),
            webpage_url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            duration: Some(212.0),
            thumbnail: None,
            uploader: None,
            formats: Vec::new(),
            extractor: Some(name.to_string()),
        }
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        fn id(&self) -> &'static str {
            self.name
        }

        fn supports(&self, _url: &str) -> bool {
            self.handles
        }

        async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
            match self.fail {
                None => Ok(stub_info(self.name)),
                Some(FailMode::NotFound) => Err(TubeloaderError::VideoNotFound(url.to_string())),
                Some(FailMode::Upstream) => {
                    Err(TubeloaderError::Upstream("stub failure".to_string()))
                }
            }
        }

        async fn get_direct_url(&self, _url: &str, _format_id: &str) -> Result<String> {
            Ok(format!("https://media.example/{}", self.name))
        }
    }

    fn hybrid(primary: StubExtractor, fallback: StubExtractor) -> HybridExtractor {
        HybridExtractor::new(vec![Arc::new(primary)], Arc::new(fallback))
    }

    #[tokio::test]
    async fn test_routes_to_supporting_extractor() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: None,
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let info = registry.extract_info("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        assert_eq!(info.extractor.as_deref(), Some("primary"));
    }

    #[tokio::test]
    async fn test_unsupported_url_goes_to_fallback() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: false,
                fail: None,
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let info = registry.extract_info("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        assert_eq!(info.extractor.as_deref(), Some("backup"));
    }

    #[tokio::test]
    async fn test_upstream_failure_retries_on_fallback() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: Some(FailMode::Upstream),
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let info = registry.extract_info("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        assert_eq!(info.extractor.as_deref(), Some("backup"));
    }

    #[tokio::test]
    async fn test_not_found_never_retries() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: Some(FailMode::NotFound),
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let err = registry
            .extract_info("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, TubeloaderError::VideoNotFound(_)));
    }

    #[tokio::test]
    async fn test_fallback_must_support_the_url() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: Some(FailMode::Upstream),
            },
            StubExtractor {
                name: "backup",
                handles: false,
                fail: None,
            },
        );

        let err = registry
            .extract_info("https://somewhere.example/clip")
            .await
            .unwrap_err();
        assert!(matches!(err, TubeloaderError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_routed_lookup_never_falls_back() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: Some(FailMode::Upstream),
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let err = registry
            .extract_info_routed("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, TubeloaderError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_direct_url_uses_routed_extractor_only() {
        let registry = hybrid(
            StubExtractor {
                name: "primary",
                handles: true,
                fail: None,
            },
            StubExtractor {
                name: "backup",
                handles: true,
                fail: None,
            },
        );

        let direct = registry
            .get_direct_url("https://youtu.be/dQw4w9WgXcQ", "22")
            .await
            .unwrap();
        assert_eq!(direct, "https://media.example/primary");
    }
}
