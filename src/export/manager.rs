use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::draw::CanvasSurface;
use crate::export::{
    dependencies::ExportDependencies,
    file::FileSaveConfig,
    pipeline::{ExportRequest, perform_export},
    types::{ExportError, ExportStatus},
};

/// Runs canvas exports on a background worker, one at a time, in request order.
///
/// The canvas is snapshotted when the export is requested, so the caller can
/// keep drawing while earlier pictures are still being written.
pub struct ExportManager {
    /// Channel for sending export requests.
    request_tx: mpsc::UnboundedSender<ExportRequest>,
    /// Shared status of the current export operation.
    status: Arc<Mutex<ExportStatus>>,
    /// Requests queued or running.
    pending: Arc<AtomicUsize>,
    max_pending: usize,
    worker: JoinHandle<()>,
}

impl ExportManager {
    /// Create a new export manager.
    ///
    /// This spawns the worker task on `runtime_handle`. At most `max_pending`
    /// exports may be queued or running; further requests are refused.
    pub fn new(runtime_handle: &tokio::runtime::Handle, max_pending: usize) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default(), max_pending)
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
        max_pending: usize,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ExportRequest>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let pending = Arc::new(AtomicUsize::new(0));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();
        let pending_clone = pending.clone();

        let worker = runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                log::debug!("Processing export request: {:?}", request);
                *status_clone.lock().await = ExportStatus::InProgress;

                let ExportRequest {
                    snapshot,
                    width,
                    height,
                    save_config,
                    reply,
                } = request;
                let result =
                    perform_export(snapshot, width, height, save_config, dependencies.clone())
                        .await;
                pending_clone.fetch_sub(1, Ordering::SeqCst);

                match &result {
                    Ok(path) => {
                        log::info!("Export successful: {}", path.display());
                        *status_clone.lock().await = ExportStatus::Success(path.clone());
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Export failed: {}", error_message);
                        *status_clone.lock().await = ExportStatus::Failed(error_message);
                    }
                }

                if reply.send(result).is_err() {
                    log::debug!("Export requester went away before the result arrived");
                }
            }
            log::debug!("Export worker stopped");
        });

        Self {
            request_tx,
            status,
            pending,
            max_pending: max_pending.max(1),
            worker,
        }
    }

    /// Request an export of `surface` as it looks right now.
    ///
    /// This is non-blocking and returns immediately with a ticket for the result.
    /// The picture is rendered at `width` x `height` pixels.
    pub fn request_export(
        &self,
        surface: &CanvasSurface,
        width: u32,
        height: u32,
        save_config: FileSaveConfig,
    ) -> Result<ExportTicket, ExportError> {
        let max_pending = self.max_pending;
        if let Err(queued) = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < max_pending).then_some(n + 1)
            })
        {
            log::warn!("Export refused, {} already pending", queued);
            return Err(ExportError::QueueFull(queued));
        }

        let (reply, receiver) = oneshot::channel();
        let request = ExportRequest {
            snapshot: surface.snapshot(),
            width,
            height,
            save_config,
            reply,
        };

        if self.request_tx.send(request).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(ExportError::ManagerClosed);
        }

        Ok(ExportTicket { receiver })
    }

    /// Number of exports queued or running.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Get the current export status.
    pub async fn status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    /// Try to read the status without waiting (non-blocking).
    pub fn try_status(&self) -> Option<ExportStatus> {
        self.status.try_lock().ok().map(|s| s.clone())
    }

    /// Stop accepting requests and wait for queued exports to finish.
    pub async fn shutdown(self) {
        drop(self.request_tx);
        if let Err(e) = self.worker.await {
            log::error!("Export worker panicked: {}", e);
        }
    }
}

/// Handle for the result of one requested export.
#[derive(Debug)]
pub struct ExportTicket {
    receiver: oneshot::Receiver<Result<PathBuf, ExportError>>,
}

impl ExportTicket {
    /// Wait for the export to finish.
    ///
    /// # Returns
    /// The absolute path of the written picture
    pub async fn wait(self) -> Result<PathBuf, ExportError> {
        self.receiver
            .await
            .map_err(|_| ExportError::ManagerClosed)?
    }

    /// Poll for the result without waiting. Returns `None` while the export is still running.
    pub fn try_result(&mut self) -> Option<Result<PathBuf, ExportError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ExportError::ManagerClosed)),
        }
    }
}
