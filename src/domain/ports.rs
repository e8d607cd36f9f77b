use async_trait::async_trait;
use crate::domain::{error::MoverError, models::ObjectPage};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches one page of objects under `prefix`. A `None` continuation token on the
    /// returned page means the listing is exhausted.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, MoverError>;

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), MoverError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), MoverError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, target: &str, subject: &str, body: &str) -> Result<(), MoverError>;
}
