//! yt-dlp wrapper for video extraction
//!
//! This module handles video information extraction using yt-dlp.
//! It supports an explicitly configured binary, a binary shipped next to
//! the server executable, and system-installed yt-dlp.

use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::config::Settings;
use crate::utils::error::{Result, TubeloaderError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Main video extractor shelling out to yt-dlp
pub struct YtDlpExtractor {
    ytdlp_path: Option<PathBuf>,
    timeout: Duration,
}

impl YtDlpExtractor {
    /// Initialize the extractor, resolving the yt-dlp binary.
    ///
    /// Search order:
    /// 1. Explicitly configured path
    /// 2. Binary next to the server executable
    /// 3. System PATH
    /// 4. Common installation paths (Homebrew, pip user installs)
    ///
    /// A missing binary is not fatal here: requests that need it fail with
    /// an extractor-unavailable error while the rest of the API stays up.
    pub fn new(settings: &Settings) -> Self {
        let ytdlp_path = match &settings.ytdlp_path {
            Some(path) if path.is_file() => {
                info!("Using configured yt-dlp: {}", path.display());
                Some(path.clone())
            }
            Some(path) => {
                warn!(
                    "Configured yt-dlp path {} does not exist, falling back to discovery",
                    path.display()
                );
                find_ytdlp()
            }
            None => find_ytdlp(),
        };

        Self {
            ytdlp_path,
            timeout: settings.upstream_timeout(),
        }
    }

    /// Whether a usable yt-dlp binary was found
    pub fn available(&self) -> bool {
        self.ytdlp_path.is_some()
    }

    /// Run yt-dlp with the given arguments, bounded by the upstream timeout
    async fn run(&self, args: &[&str]) -> Result<Output> {
        let Some(path) = self.ytdlp_path.as_ref() else {
            return Err(TubeloaderError::YtDlpNotFound);
        };

        // kill_on_drop reaps the child when the timeout abandons it
        let mut command = Command::new(path);
        command.args(args).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TubeloaderError::YtDlpNotFound)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => {
                warn!("yt-dlp timed out after {}s: {:?}", self.timeout.as_secs(), args);
                Err(TubeloaderError::UpstreamTimeout(self.timeout.as_secs()))
            }
        }
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    fn supports(&self, url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Extract video information without downloading
    /// Uses: yt-dlp --dump-json --no-download
    async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = self
            .run(&[
                "--dump-json",
                "--no-download",
                "--no-playlist",
                "--no-warnings",
                url,
            ])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", stderr.trim());
            return Err(classify_failure(url, &stderr));
        }

        let video_info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        Ok(video_info)
    }

    /// Resolve the direct media URL for a specific format
    /// Uses: yt-dlp -f <format_id> -g
    async fn get_direct_url(&self, url: &str, format_id: &str) -> Result<String> {
        debug!("Getting direct URL for format {} from {}", format_id, url);

        let output = self
            .run(&["-f", format_id, "-g", "--no-playlist", "--no-warnings", url])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Failed to get direct URL: {}", stderr.trim());
            return Err(classify_failure(url, &stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().find(|line| !line.trim().is_empty()) {
            Some(direct) => Ok(direct.trim().to_string()),
            None => Err(TubeloaderError::Upstream(
                "yt-dlp resolved no media URL".to_string(),
            )),
        }
    }
}

/// Map a failed yt-dlp invocation onto a domain error.
///
/// yt-dlp reports everything through stderr text and a nonzero exit, so the
/// distinction between "this video does not exist" and "the extraction
/// broke" has to come from the message itself.
fn classify_failure(reference: &str, stderr: &str) -> TubeloaderError {
    let lower = stderr.to_ascii_lowercase();

    if lower.contains("requested format is not available") {
        return TubeloaderError::FormatNotAvailable(reference.to_string());
    }

    const NOT_FOUND_MARKERS: &[&str] = &[
        "video unavailable",
        "this video is not available",
        "content isn't available",
        "private video",
        "has been removed",
        "does not exist",
        "http error 404",
        "unsupported url",
    ];
    if NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m)) {
        return TubeloaderError::VideoNotFound(reference.to_string());
    }

    if lower.contains("is not a valid url") {
        return TubeloaderError::InvalidReference(reference.to_string());
    }

    TubeloaderError::Upstream(error_line(stderr))
}

/// First diagnostic line of a yt-dlp stderr dump
fn error_line(stderr: &str) -> String {
    stderr
        .lines()
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| stderr.lines().find(|line| !line.trim().is_empty()))
        .unwrap_or("yt-dlp failed without diagnostics")
        .trim()
        .to_string()
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find the yt-dlp binary with priority:
/// 1. Next to the server executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(adjacent) = find_adjacent_ytdlp() {
        info!("Using bundled yt-dlp: {}", adjacent.display());
        return Some(adjacent);
    }

    if let Ok(system) = which::which("yt-dlp") {
        info!("Using system yt-dlp: {}", system.display());
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("Using yt-dlp from common path: {}", common.display());
        return Some(common);
    }

    warn!("yt-dlp not found anywhere");
    None
}

/// Check for a yt-dlp binary shipped alongside the server executable
fn find_adjacent_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let binary_name = if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    };

    let adjacent = exe_dir.join(binary_name);
    if adjacent.is_file() && is_executable(&adjacent) {
        return Some(adjacent);
    }

    None
}

/// Check common installation paths outside PATH
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel) / manual installs
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // pip user install
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
            dirs::home_dir()?.join(rest)
        } else {
            PathBuf::from(path_str)
        };

        if expanded.is_file() && is_executable(&expanded) {
            return Some(expanded);
        }
    }

    None
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Ok(metadata) = std::fs::metadata(path) {
            return metadata.permissions().mode() & 0o111 != 0;
        }
        false
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

// ============================================================
// Tests
// ============================================================
