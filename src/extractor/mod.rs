pub mod hybrid;
pub mod models;
pub mod oembed;
pub mod traits;
pub mod youtube;
pub mod ytdlp;

pub use hybrid::HybridExtractor;
pub use models::{Format, FormatKind, FormatSelector, VideoInfo};
pub use oembed::OEmbedExtractor;
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
