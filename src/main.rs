use s3_file_mover::mover_job::MoverJob;
use tracing::{info, debug};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("s3_file_mover=debug".parse()?)
            .add_directive("aws_sdk=warn".parse()?)
            .add_directive("aws_config=warn".parse()?))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting S3 file mover");
    debug!("Environment variables: MOVER_CONFIG_FILE={}, AWS_ENDPOINT_URL={}",
        std::env::var("MOVER_CONFIG_FILE").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "not set".to_string())
    );

    let job = MoverJob::new().await?;
    let summary = job.run().await?;

    info!("Mover finished: {} moved, {} failed",
        summary.moved().count(), summary.failed().count());
    Ok(())
}
