use thiserror::Error;
use crate::domain::models::RunSummary;

#[derive(Debug, Error)]
pub enum MoverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to list objects: {0}")]
    Listing(String),

    /// Listing broke off after some objects had already been moved or attempted.
    #[error("{source} (after {} objects were processed)", .summary.outcomes.len())]
    PartialListing {
        source: Box<MoverError>,
        summary: Box<RunSummary>,
    },

    #[error("Copy failed: {0}")]
    Copy(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MoverError {
    /// Outcomes recorded before the run was cut short, if any.
    pub fn partial_summary(&self) -> Option<&RunSummary> {
        match self {
            Self::PartialListing { summary, .. } => Some(&**summary),
            _ => None,
        }
    }
}
