//! Executor module for copy requests against the object store

pub mod s3;
pub mod session;

pub use s3::{S3Session, S3Settings};
pub use session::StorageSession;

use crate::types::{DeployError, ResolvedUpload};

/// Progress statistics for a deploy run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployStats {
    /// Number of copy requests issued (including a failed one).
    pub attempted: usize,
    /// Number of copy requests the store accepted.
    pub completed: usize,
}

/// Events emitted while executing the upload queue.
#[derive(Debug)]
pub enum DeployEvent {
    /// Copy request about to be issued.
    UploadStart {
        index: usize,
        destination_key: String,
    },
    /// Copy request accepted by the store.
    UploadSuccess {
        index: usize,
        destination_key: String,
    },
    /// Copy request rejected; the queue stops here.
    UploadError {
        index: usize,
        destination_key: String,
        message: String,
    },
    /// Every upload in the queue succeeded.
    Complete { stats: DeployStats },
}

/// Optional callback used to receive deploy events.
pub type DeployCallback = dyn Fn(&DeployEvent) + Send + Sync;

/// Execute the upload queue
///
/// Issues one copy request per upload, in order, and stops at the first
/// failure: later uploads are never attempted and earlier ones are not
/// rolled back.
pub fn deploy<I, S>(
    uploads: I,
    session: &S,
    on_event: Option<&DeployCallback>,
) -> Result<DeployStats, DeployError>
where
    I: IntoIterator<Item = ResolvedUpload>,
    S: StorageSession + ?Sized,
{
    let mut stats = DeployStats::default();

    for (idx, upload) in uploads.into_iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            DeployEvent::UploadStart {
                index,
                destination_key: upload.destination_key.clone(),
            },
        );

        stats.attempted += 1;
        match session.copy_object(&upload) {
            Ok(()) => {
                stats.completed += 1;
                tracing::info!(
                    from = %upload.source_key,
                    to = %upload.destination_key,
                    content_type = %upload.content_type,
                    max_age = upload.cache_max_age_seconds,
                    "copied"
                );
                emit_event(
                    on_event,
                    DeployEvent::UploadSuccess {
                        index,
                        destination_key: upload.destination_key.clone(),
                    },
                );
            }
            Err(error) => {
                tracing::error!(
                    to = %upload.destination_key,
                    error = %error,
                    "copy failed, aborting remaining uploads"
                );
                emit_event(
                    on_event,
                    DeployEvent::UploadError {
                        index,
                        destination_key: upload.destination_key.clone(),
                        message: error.to_string(),
                    },
                );
                return Err(error);
            }
        }
    }

    emit_event(
        on_event,
        DeployEvent::Complete {
            stats: stats.clone(),
        },
    );

    Ok(stats)
}

fn emit_event(on_event: Option<&DeployCallback>, event: DeployEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
