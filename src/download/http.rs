// HTTP downloader.
// Checks the destination synchronously, then fetches on the tokio runtime.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{PrefsError, Result, is_refusal};

use super::request::{DownloadId, DownloadRequest, Downloader};

const USER_AGENT: &str = concat!("dilbert-prefs/", env!("CARGO_PKG_VERSION"));

/// Downloads strips over HTTP in background tasks.
///
/// Must be used from inside a tokio runtime; `enqueue` spawns onto the
/// current one and returns immediately.
pub struct HttpDownloader {
    client: Client,
    next_id: AtomicU64,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Wait for every transfer enqueued so far.
    pub async fn wait_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "download task panicked");
            }
        }
    }
}

impl Downloader for HttpDownloader {
    fn enqueue(&self, request: DownloadRequest) -> Result<DownloadId> {
        let runtime = Handle::try_current()
            .map_err(|e| PrefsError::UnexpectedDownloadFailure(e.to_string()))?;
        let part = prepare_destination(&request.destination)?;
        let id = DownloadId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let client = self.client.clone();
        let task = runtime.spawn(async move {
            match fetch(&client, &request, &part).await {
                Ok(size) if request.notify_on_completion => tracing::info!(
                    %id,
                    size,
                    destination = %request.destination.display(),
                    "download completed"
                ),
                Ok(size) => tracing::debug!(%id, size, "download completed"),
                Err(e) => {
                    tracing::error!(%id, source = %request.source, error = %e, "download failed");
                    let _ = tokio::fs::remove_file(&part).await;
                }
            }
        });
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(task);

        Ok(id)
    }
}

/// Create the destination folder and claim a `.part` file next to the
/// destination. Refusals surface as `PermissionDenied`.
fn prepare_destination(destination: &Path) -> Result<PathBuf> {
    let refused = |e: io::Error| refusal(destination, e);

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(refused)?;
        }
    }

    let part = part_path(destination);
    fs::File::create(&part).map_err(refused)?;
    Ok(part)
}

/// `PermissionDenied` for unwritable or read-only destinations, `Io` otherwise.
fn refusal(destination: &Path, error: io::Error) -> PrefsError {
    if is_refusal(error.kind()) {
        PrefsError::PermissionDenied(destination.to_path_buf())
    } else {
        PrefsError::Io(error)
    }
}

fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn fetch(client: &Client, request: &DownloadRequest, part: &Path) -> Result<usize> {
    let response = client
        .get(request.source.clone())
        .send()
        .await?
        .error_for_status()?;
    let bytes = response.bytes().await?;

    tokio::fs::write(part, &bytes).await?;
    tokio::fs::rename(part, &request.destination).await?;

    Ok(bytes.len())
}
