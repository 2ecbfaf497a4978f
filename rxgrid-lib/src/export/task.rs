//! Cancellable background export.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{ExportArtifact, ExportError};

/// A running export on a blocking worker.
///
/// Document generation for large row counts is CPU-bound; running it off
/// the event loop keeps the grid responsive, and the token lets a host
/// abandon the export when the user navigates away. Cancellation simply
/// discards the in-progress buffer; no partial artifact is ever produced.
///
/// # Example
///
/// ```ignore
/// let task = controller.spawn_pdf_export(PdfOptions::new("Vendors"), false);
/// // ... user closes the page ...
/// task.cancel();
/// assert!(matches!(task.join().await, Err(ExportError::Cancelled)));
/// ```
pub struct ExportTask {
    handle: JoinHandle<Result<ExportArtifact, ExportError>>,
    cancel: CancellationToken,
}

impl ExportTask {
    /// Spawn an export closure on the blocking pool.
    ///
    /// The closure receives the task's cancellation token and is expected
    /// to check it between rows.
    pub fn spawn<F>(build: F) -> Self
    where
        F: FnOnce(&CancellationToken) -> Result<ExportArtifact, ExportError> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::task::spawn_blocking(move || build(&token));
        Self { handle, cancel }
    }

    /// Request cancellation. The worker stops at its next check.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the worker has finished (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the export to finish and return its artifact.
    pub async fn join(self) -> Result<ExportArtifact, ExportError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ExportError::Cancelled),
            Err(e) => Err(ExportError::Serialization(format!(
                "export worker failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    #[tokio::test]
    async fn join_returns_the_artifact() {
        let task = ExportTask::spawn(|_| {
            Ok(ExportArtifact {
                bytes: b"a,b\n".to_vec(),
                file_name: "x.csv".into(),
                mime_type: ExportFormat::Csv.mime_type(),
                row_count: 1,
            })
        });
        let artifact = task.join().await.unwrap();
        assert_eq!(artifact.row_count, 1);
    }

    #[tokio::test]
    async fn cancel_reaches_the_worker() {
        let task = ExportTask::spawn(|cancel| {
            // Simulate a long export that checks between rows.
            loop {
                if cancel.is_cancelled() {
                    return Err(ExportError::Cancelled);
                }
                std::thread::sleep(std::time::Duration::from_millis(5));
            }
        });
        task.cancel();
        assert!(matches!(task.join().await, Err(ExportError::Cancelled)));
    }
}
