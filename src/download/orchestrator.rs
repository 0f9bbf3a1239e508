// Strip download orchestration.
// Tries the user's folder first and falls back to a staging folder plus a
// recorded move when the folder is refused.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Url;

use crate::date::DateKey;
use crate::error::{PrefsError, Result};
use crate::quality::to_high_quality;
use crate::store::{PreferenceStore, paths};

use super::request::{DownloadId, DownloadRequest, Downloader};

/// Where an accepted download is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Downloading straight into the configured folder.
    Direct {
        id: DownloadId,
        destination: PathBuf,
    },
    /// Downloading into the staging folder; an external mover relocates it.
    Staged {
        id: DownloadId,
        staged: PathBuf,
        destination: PathBuf,
        move_recorded: bool,
    },
}

impl DownloadOutcome {
    pub fn id(&self) -> DownloadId {
        match self {
            DownloadOutcome::Direct { id, .. } | DownloadOutcome::Staged { id, .. } => *id,
        }
    }
}

/// Builds download requests for strips and hands them to a [`Downloader`].
pub struct DownloadOrchestrator {
    store: Arc<PreferenceStore>,
    downloader: Arc<dyn Downloader>,
    staging_dir: PathBuf,
}

impl DownloadOrchestrator {
    /// Orchestrator staging into the user's download directory.
    pub fn new(store: Arc<PreferenceStore>, downloader: Arc<dyn Downloader>) -> Self {
        Self::with_staging_dir(store, downloader, paths::default_download_dir())
    }

    pub fn with_staging_dir(
        store: Arc<PreferenceStore>,
        downloader: Arc<dyn Downloader>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            downloader,
            staging_dir: staging_dir.into(),
        }
    }

    /// Download the strip for `date` from `url` into the configured folder.
    ///
    /// The URL is always rewritten to high quality, independent of the
    /// display setting. A refused folder falls back once to the staging
    /// folder; any other failure is returned as
    /// [`PrefsError::UnexpectedDownloadFailure`].
    pub fn download(&self, url: &str, date: DateKey) -> Result<DownloadOutcome> {
        let source = source_url(url)?;
        let destination = paths::strip_path(&self.store.download_target(), date);

        let request = DownloadRequest::visible(source.clone(), destination.clone());
        match self.downloader.enqueue(request) {
            Ok(id) => {
                tracing::debug!(%date, %id, destination = %destination.display(), "download enqueued");
                Ok(DownloadOutcome::Direct { id, destination })
            }
            Err(e) if e.is_permission_denied() => {
                tracing::info!(%date, error = %e, "download folder refused, staging instead");
                self.download_staged(source, date, destination)
            }
            Err(e) => {
                tracing::error!(%date, error = %e, "download could not be started");
                Err(fatal(e))
            }
        }
    }

    fn download_staged(
        &self,
        source: Url,
        date: DateKey,
        destination: PathBuf,
    ) -> Result<DownloadOutcome> {
        let staged = paths::strip_path(&self.staging_dir, date);

        let id = self
            .downloader
            .enqueue(DownloadRequest::visible(source, staged.clone()))
            .map_err(|e| {
                tracing::error!(%date, error = %e, "cannot download to selected folder");
                fatal(e)
            })?;

        let move_recorded = self.store.schedule_move(date, &destination);
        if !move_recorded {
            tracing::warn!(%date, "pending move for staged download not persisted");
        }

        Ok(DownloadOutcome::Staged {
            id,
            staged,
            destination,
            move_recorded,
        })
    }
}

fn source_url(url: &str) -> Result<Url> {
    let url = to_high_quality(url);
    Url::parse(&url).map_err(|e| PrefsError::UnexpectedDownloadFailure(format!("{url}: {e}")))
}

fn fatal(error: PrefsError) -> PrefsError {
    match error {
        PrefsError::UnexpectedDownloadFailure(message) => {
            PrefsError::UnexpectedDownloadFailure(message)
        }
        other => PrefsError::UnexpectedDownloadFailure(other.to_string()),
    }
}
