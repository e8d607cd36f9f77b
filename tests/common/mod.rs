#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use s3_file_mover::domain::{
    error::MoverError,
    models::{ObjectPage, ObjectSummary},
    ports::{Notifier, ObjectStore},
};

/// Bucket/key store paged like ListObjectsV2, with injectable failures.
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    page_size: usize,
    copy_failures: HashMap<String, String>,
    delete_failures: HashMap<String, String>,
    fail_listing_on_page: Option<usize>,
    copy_delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub copy_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(page_size: usize) -> Self {
        Self { page_size, ..Default::default() }
    }

    pub fn with_object(self, bucket: &str, key: &str) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), key.as_bytes().to_vec());
        self
    }

    pub fn failing_copy(mut self, key: &str, error: &str) -> Self {
        self.copy_failures.insert(key.to_string(), error.to_string());
        self
    }

    pub fn failing_delete(mut self, key: &str, error: &str) -> Self {
        self.delete_failures.insert(key.to_string(), error.to_string());
        self
    }

    pub fn failing_listing_on_page(mut self, page: usize) -> Self {
        self.fail_listing_on_page = Some(page);
        self
    }

    pub fn with_copy_delay(mut self, delay: Duration) -> Self {
        self.copy_delay = Some(delay);
        self
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage, MoverError> {
        let page_no = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing_on_page == Some(page_no) {
            return Err(MoverError::Listing("AccessDenied: listing not allowed".to_string()));
        }

        // Tokens are the last key of the previous page, so deletes between pages never shift the window.
        let objects: Vec<ObjectSummary> = self
            .keys(bucket)
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .filter(|k| continuation_token.as_ref().map_or(true, |after| k > after))
            .take(self.page_size + 1)
            .map(|key| ObjectSummary { size: key.len() as i64, key })
            .collect();
        let truncated = objects.len() > self.page_size;
        let objects: Vec<ObjectSummary> = objects.into_iter().take(self.page_size).collect();
        let next_continuation_token = if truncated {
            objects.last().map(|o| o.key.clone())
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
        self.copy_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.copy_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(error) = self.copy_failures.get(source_key) {
            return Err(MoverError::Copy(error.clone()));
        }
        let mut objects = self.objects.lock().unwrap();
        let body = objects
            .get(&(source_bucket.to_string(), source_key.to_string()))
            .cloned()
            .ok_or_else(|| MoverError::Copy("NoSuchKey".to_string()))?;
        objects.insert((dest_bucket.to_string(), dest_key.to_string()), body);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), MoverError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.delete_failures.get(key) {
            return Err(MoverError::Delete(error.clone()));
        }
        self.objects
            .lock()
            .unwrap()
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub target: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub published: Mutex<Vec<Published>>,
    fail_with: Option<String>,
}

impl RecordingNotifier {
    pub fn failing(error: &str) -> Self {
        Self { fail_with: Some(error.to_string()), ..Default::default() }
    }

    pub fn messages(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, target: &str, subject: &str, body: &str) -> Result<(), MoverError> {
        if let Some(error) = &self.fail_with {
            return Err(MoverError::Notification(error.clone()));
        }
        self.published.lock().unwrap().push(Published {
            target: target.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
