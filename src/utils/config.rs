//! Server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Address to bind the listener to
    pub bind: String,

    /// Port to listen on
    pub port: u16,

    /// Timeout for outbound extraction and media requests (seconds)
    pub upstream_timeout_secs: u64,

    /// Timeout for oEmbed metadata lookups (seconds)
    pub oembed_timeout_secs: u64,

    /// Explicit yt-dlp binary path, overriding discovery
    pub ytdlp_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            upstream_timeout_secs: 30,
            oembed_timeout_secs: 10,
            ytdlp_path: None,
        }
    }
}

impl Settings {
    /// Build settings from the environment, starting from defaults.
    ///
    /// Recognized variables: `BIND_ADDR`, `PORT`, `UPSTREAM_TIMEOUT_SECS`,
    /// `YTDLP_PATH`. Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(bind) = std::env::var("BIND_ADDR") {
            if !bind.is_empty() {
                settings.bind = bind;
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            settings.port = port;
        }
        if let Some(secs) = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            settings.upstream_timeout_secs = secs;
        }
        if let Ok(path) = std::env::var("YTDLP_PATH") {
            if !path.is_empty() {
                settings.ytdlp_path = Some(PathBuf::from(path));
            }
        }

        settings
    }

    /// The socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }

    /// Timeout applied to yt-dlp invocations and media host connects
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs.max(1))
    }

    /// Timeout applied to oEmbed lookups
    pub fn oembed_timeout(&self) -> Duration {
        Duration::from_secs(self.oembed_timeout_secs.max(1))
    }
}
