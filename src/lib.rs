//! Tubeloader library

pub mod api;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use api::{build_router, ApiError, AppState, FormatDescriptor, InfoResponse};
pub use extractor::{Format, FormatKind, FormatSelector, HybridExtractor, VideoInfo, YtDlpExtractor};
pub use utils::{Result, Settings, TubeloaderError};
