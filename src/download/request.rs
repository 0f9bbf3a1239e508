// Download requests and the downloader seam.

use std::fmt;
use std::path::PathBuf;

use reqwest::Url;

use crate::error::Result;

/// Identifier handed back by a downloader for an enqueued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DownloadId(pub u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One image to fetch from `source` into `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source: Url,
    pub destination: PathBuf,
    /// Show the transfer in the platform's download list.
    pub visible_in_downloads_ui: bool,
    /// Announce the transfer once it completes.
    pub notify_on_completion: bool,
}

impl DownloadRequest {
    /// A request that is neither listed nor announced.
    pub fn new(source: Url, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
            visible_in_downloads_ui: false,
            notify_on_completion: false,
        }
    }

    /// A request shown in the download list and announced on completion.
    pub fn visible(source: Url, destination: PathBuf) -> Self {
        Self {
            visible_in_downloads_ui: true,
            notify_on_completion: true,
            ..Self::new(source, destination)
        }
    }
}

/// Accepts download requests and performs them asynchronously.
///
/// `enqueue` must not wait for the transfer. It fails with
/// `PrefsError::PermissionDenied` when the destination is not writable and
/// with any other error when the request cannot be accepted at all.
pub trait Downloader: Send + Sync {
    fn enqueue(&self, request: DownloadRequest) -> Result<DownloadId>;
}
