// Download module.
// Strip download orchestration and the downloaders that carry it out.

pub mod http;
pub mod orchestrator;
pub mod request;

pub use http::HttpDownloader;
pub use orchestrator::{DownloadOrchestrator, DownloadOutcome};
pub use request::{DownloadId, DownloadRequest, Downloader};
