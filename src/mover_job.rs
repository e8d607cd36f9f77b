use std::sync::Arc;
use tracing::{info, error, debug};
use crate::{
    application::move_service::MoveService,
    config::MoverConfig,
    domain::{error::MoverError, models::{MoveRequest, NotificationStatus, RunSummary}},
    infrastructure::{s3_adapter::S3Adapter, sns_adapter::SnsAdapter},
};

/// One-shot job: load configuration, wire the AWS clients and run a single move pass.
pub struct MoverJob {
    service: MoveService,
    request: MoveRequest,
}

impl MoverJob {
    pub async fn new() -> Result<Self, MoverError> {
        debug!("Initializing mover job");
        let config = MoverConfig::from_env()?;
        info!("Moving s3://{}/{} -> s3://{}/{}",
            config.request.source_bucket, config.request.source_prefix,
            config.request.dest_bucket, config.request.dest_prefix);

        debug!("Loading AWS configuration");
        let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

        // Configure endpoint for LocalStack if AWS_ENDPOINT_URL is set
        let endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();
        if let Some(endpoint_url) = &endpoint_url {
            info!("Using custom AWS endpoint: {}", endpoint_url);
            aws_config_builder = aws_config_builder.endpoint_url(endpoint_url);
        }

        let aws_config = aws_config_builder.load().await;
        debug!("AWS region: {:?}", aws_config.region());

        let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);

        // Enable path-style addressing for LocalStack
        if endpoint_url.is_some() {
            s3_config = s3_config.force_path_style(true);
        }

        let s3_client = aws_sdk_s3::Client::from_conf(s3_config.build());
        let sns_client = aws_sdk_sns::Client::new(&aws_config);
        debug!("AWS clients initialized");

        let service = MoveService::new(
            Arc::new(S3Adapter::new(s3_client)),
            Arc::new(SnsAdapter::new(sns_client)),
        )
        .with_max_concurrency(config.max_concurrency);

        Ok(Self { service, request: config.request })
    }

    pub async fn run(&self) -> Result<RunSummary, MoverError> {
        let summary = match self.service.run(&self.request).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Move run aborted: {}", e);
                if let Some(partial) = e.partial_summary() {
                    log_summary(partial);
                    if let NotificationStatus::Failed(reason) = &partial.notification {
                        error!("Partial summary of run {} was not published: {}", partial.run_id, reason);
                    }
                }
                return Err(e);
            }
        };

        log_summary(&summary);
        if summary.is_empty() {
            info!("Run {} finished without matching objects", summary.run_id);
        }

        if let NotificationStatus::Failed(reason) = &summary.notification {
            return Err(MoverError::Notification(reason.clone()));
        }
        Ok(summary)
    }
}

fn log_summary(summary: &RunSummary) {
    match serde_json::to_string(summary) {
        Ok(json) => info!("Run summary: {}", json),
        Err(e) => error!("Failed to serialize run summary: {}", e),
    }
}
