use std::sync::Arc;
use chrono::Utc;
use futures_util::StreamExt;
use tracing::{info, debug, error, warn};
use uuid::Uuid;
use crate::application::{
    listing::list_objects,
    summary::{compose_message, NOTIFICATION_SUBJECT},
};
use crate::domain::{
    error::MoverError,
    models::{MoveOutcome, MoveRequest, NotificationStatus, ObjectSummary, RunSummary},
    ports::{Notifier, ObjectStore},
};

pub struct MoveService {
    object_store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
    max_concurrency: usize,
}

impl MoveService {
    pub fn new(object_store: Arc<dyn ObjectStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            object_store,
            notifier,
            max_concurrency: 1,
        }
    }

    /// Number of objects moved at the same time. `1` keeps the pass strictly sequential.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Moves every object under the source prefix and publishes one summary.
    ///
    /// Per-object failures end up as [`MoveOutcome::Failed`] and never abort the pass.
    /// A listing failure on the first page is returned as [`MoverError::Listing`]. A later one
    /// publishes whatever had already been processed and returns
    /// [`MoverError::PartialListing`] carrying that summary. A failed publish is reported
    /// through [`RunSummary::notification`].
    pub async fn run(&self, request: &MoveRequest) -> Result<RunSummary, MoverError> {
        request.validate()?;
        if self.max_concurrency == 0 {
            return Err(MoverError::Config("max concurrency must be at least 1".to_string()));
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Starting move run {}: s3://{}/{} -> s3://{}/{} (policy: {}, concurrency: {})",
            run_id, request.source_bucket, request.source_prefix,
            request.dest_bucket, request.dest_prefix,
            request.dest_key_policy, self.max_concurrency);

        // Step 1 + 2: list lazily and move each object as it arrives
        let mut outcomes = Vec::new();
        let mut listing_error = None;
        {
            let moves = list_objects(self.object_store.as_ref(), &request.source_bucket, &request.source_prefix)
                .map(|listed| async move {
                    match listed {
                        Ok(object) => Ok(self.move_object(request, &object).await),
                        Err(e) => Err(e),
                    }
                })
                .buffered(self.max_concurrency);
            futures_util::pin_mut!(moves);

            while let Some(result) = moves.next().await {
                match result {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        error!("Listing s3://{}/{} failed after {} objects: {}",
                            request.source_bucket, request.source_prefix, outcomes.len(), e);
                        listing_error = Some(e);
                        break;
                    }
                }
            }
        }

        let moved_count = outcomes.iter().filter(|o| o.is_moved()).count();
        info!("Processed {} objects in run {}: {} moved, {} failed",
            outcomes.len(), run_id, moved_count, outcomes.len() - moved_count);

        if let Some(e) = listing_error {
            if outcomes.is_empty() {
                return Err(e);
            }
            warn!("Publishing partial summary for run {} before reporting listing failure", run_id);
            let notification = self.notify(request, &outcomes).await;
            let summary = RunSummary { run_id, started_at, finished_at: Utc::now(), outcomes, notification };
            return Err(MoverError::PartialListing {
                source: Box::new(e),
                summary: Box::new(summary),
            });
        }

        // Step 3: summarize
        let notification = self.notify(request, &outcomes).await;

        Ok(RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            outcomes,
            notification,
        })
    }

    async fn move_object(&self, request: &MoveRequest, object: &ObjectSummary) -> MoveOutcome {
        let source_key = object.key.as_str();
        let dest_key = request.destination_key(source_key);
        debug!("Moving s3://{}/{} ({} bytes) -> s3://{}/{}",
            request.source_bucket, source_key, object.size, request.dest_bucket, dest_key);

        if dest_key.is_empty() {
            warn!("Destination key for {} is empty, leaving it in place", source_key);
            return MoveOutcome::Failed {
                source_key: source_key.to_string(),
                error: "destination key is empty".to_string(),
            };
        }

        if request.source_bucket == request.dest_bucket && source_key == dest_key {
            warn!("Destination for {} is the source object itself, leaving it in place", source_key);
            return MoveOutcome::Failed {
                source_key: source_key.to_string(),
                error: "destination is the same object as the source".to_string(),
            };
        }

        match self.transfer(request, source_key, &dest_key).await {
            Ok(()) => {
                info!("Moved {} to s3://{}/{}", source_key, request.dest_bucket, dest_key);
                MoveOutcome::Moved { source_key: source_key.to_string(), dest_key }
            },
            Err(e) => {
                error!("Failed to move {}: {}", source_key, e);
                MoveOutcome::Failed { source_key: source_key.to_string(), error: e.to_string() }
            }
        }
    }

    async fn transfer(&self, request: &MoveRequest, source_key: &str, dest_key: &str) -> Result<(), MoverError> {
        self.object_store
            .copy_object(&request.source_bucket, source_key, &request.dest_bucket, dest_key)
            .await?;
        debug!("Copied {}, deleting source", source_key);
        self.object_store
            .delete_object(&request.source_bucket, source_key)
            .await
    }

    async fn notify(&self, request: &MoveRequest, outcomes: &[MoveOutcome]) -> NotificationStatus {
        let message = compose_message(request, outcomes);

        if message.is_empty() {
            warn!("No objects matched s3://{}/{}, nothing moved and no notification sent",
                request.source_bucket, request.source_prefix);
            return NotificationStatus::SkippedEmptyRun;
        }
        if request.notification_target.trim().is_empty() {
            info!("No notification target configured, summary not published");
            debug!("Summary:\n{}", message);
            return NotificationStatus::SkippedNoTarget;
        }

        debug!("Publishing summary to {}", request.notification_target);
        match self.notifier.publish(&request.notification_target, NOTIFICATION_SUBJECT, &message).await {
            Ok(()) => {
                info!("Summary published to {}", request.notification_target);
                NotificationStatus::Sent
            },
            Err(e) => {
                error!("Failed to publish summary to {}: {}", request.notification_target, e);
                error!("Unpublished summary:\n{}", message);
                NotificationStatus::Failed(e.to_string())
            }
        }
    }
}
