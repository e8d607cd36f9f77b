use std::{fmt, str::FromStr};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::error::MoverError;

/// How the destination key is derived from a listed source key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKeyPolicy {
    /// Strip the source prefix, then keep only the final path segment.
    #[default]
    FileName,
    /// Strip the source prefix and keep whatever sub-path remains.
    RelativeKey,
    /// Append the complete source key to the destination prefix.
    FullKey,
}

impl DestinationKeyPolicy {
    pub fn destination_key(&self, source_prefix: &str, dest_prefix: &str, source_key: &str) -> String {
        let relative = source_key.strip_prefix(source_prefix).unwrap_or(source_key);
        let name = match self {
            Self::FileName => relative.rsplit_once('/').map_or(relative, |(_, name)| name),
            Self::RelativeKey => relative,
            Self::FullKey => source_key,
        };
        format!("{}{}", dest_prefix, name)
    }
}

impl FromStr for DestinationKeyPolicy {
    type Err = MoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file_name" | "filename" => Ok(Self::FileName),
            "relative_key" => Ok(Self::RelativeKey),
            "full_key" => Ok(Self::FullKey),
            other => Err(MoverError::Config(format!("unknown destination key policy '{}'", other))),
        }
    }
}

impl fmt::Display for DestinationKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileName => "file_name",
            Self::RelativeKey => "relative_key",
            Self::FullKey => "full_key",
        };
        f.write_str(name)
    }
}

/// Input for one move-and-notify pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub source_bucket: String,
    #[serde(default)]
    pub source_prefix: String,
    #[serde(default)]
    pub dest_bucket: String,
    #[serde(default)]
    pub dest_prefix: String,
    /// Topic the summary is published to. Empty suppresses the notification.
    #[serde(default)]
    pub notification_target: String,
    #[serde(default)]
    pub dest_key_policy: DestinationKeyPolicy,
}

impl MoveRequest {
    pub fn validate(&self) -> Result<(), MoverError> {
        if self.source_bucket.trim().is_empty() {
            return Err(MoverError::Config("source bucket must not be empty".to_string()));
        }
        if self.dest_bucket.trim().is_empty() {
            return Err(MoverError::Config("destination bucket must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn destination_key(&self, source_key: &str) -> String {
        self.dest_key_policy
            .destination_key(&self.source_prefix, &self.dest_prefix, source_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub objects: Vec<ObjectSummary>,
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    Moved { source_key: String, dest_key: String },
    Failed { source_key: String, error: String },
}

impl MoveOutcome {
    pub fn source_key(&self) -> &str {
        match self {
            Self::Moved { source_key, .. } | Self::Failed { source_key, .. } => source_key,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    SkippedEmptyRun,
    SkippedNoTarget,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<MoveOutcome>,
    pub notification: NotificationStatus,
}

impl RunSummary {
    pub fn moved(&self) -> impl Iterator<Item = &MoveOutcome> {
        self.outcomes.iter().filter(|o| o.is_moved())
    }

    pub fn failed(&self) -> impl Iterator<Item = &MoveOutcome> {
        self.outcomes.iter().filter(|o| !o.is_moved())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
