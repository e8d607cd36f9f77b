use async_trait::async_trait;
use aws_sdk_sns::Client;
use tracing::debug;
use crate::domain::{error::MoverError, ports::Notifier};
use super::describe_sdk_error;

pub struct SnsAdapter {
    client: Client,
}

impl SnsAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SnsAdapter {
    async fn publish(&self, target: &str, subject: &str, body: &str) -> Result<(), MoverError> {
        let output = self.client
            .publish()
            .topic_arn(target)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| MoverError::Notification(describe_sdk_error(&e)))?;

        debug!("SNS message id: {}", output.message_id().unwrap_or("<none>"));
        Ok(())
    }
}
