use async_trait::async_trait;
use aws_sdk_s3::Client;
use tracing::{debug, error};
use crate::domain::{
    error::MoverError,
    models::{ObjectPage, ObjectSummary},
    ports::ObjectStore,
};
use super::describe_sdk_error;

pub struct S3Adapter {
    client: Client,
}

impl S3Adapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn copy_source(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, urlencoding::encode(key))
}

#[async_trait]
impl ObjectStore for S3Adapter {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, MoverError> {
        let mut request = self.client.list_objects_v2().bucket(bucket);
        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }

        let response = request
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| {
                let reason = describe_sdk_error(&e);
                error!("ListObjectsV2 on s3://{}/{} failed: {}", bucket, prefix, reason);
                MoverError::Listing(reason)
            })?;

        let objects = response
            .contents()
            .iter()
            .filter_map(|obj| {
                Some(ObjectSummary {
                    key: obj.key()?.to_string(),
                    size: obj.size().unwrap_or(0),
                })
            })
            .collect();

        let next_continuation_token = if response.is_truncated() == Some(true) {
            response.next_continuation_token().map(String::from)
        } else {
            None
        };

        Ok(ObjectPage { objects, next_continuation_token })
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), MoverError> {
        debug!("CopyObject s3://{}/{} -> s3://{}/{}", source_bucket, source_key, dest_bucket, dest_key);
        self.client
            .copy_object()
            .copy_source(copy_source(source_bucket, source_key))
            .bucket(dest_bucket)
            .key(dest_key)
            .send()
            .await
            .map_err(|e| MoverError::Copy(describe_sdk_error(&e)))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), MoverError> {
        debug!("DeleteObject s3://{}/{}", bucket, key);
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MoverError::Delete(describe_sdk_error(&e)))?;
        Ok(())
    }
}
