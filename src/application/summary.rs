use crate::domain::models::{MoveOutcome, MoveRequest};

pub const NOTIFICATION_SUBJECT: &str = "S3 File Move Notification";

/// Builds the notification body for a finished pass. Empty when nothing was processed.
pub fn compose_message(request: &MoveRequest, outcomes: &[MoveOutcome]) -> String {
    let moved: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.is_moved())
        .map(|o| o.source_key())
        .collect();
    let errors: Vec<String> = outcomes
        .iter()
        .filter_map(|o| match o {
            MoveOutcome::Failed { source_key, error } => Some(error_line(source_key, error)),
            MoveOutcome::Moved { .. } => None,
        })
        .collect();

    compose_from_parts(&request.dest_bucket, &request.dest_prefix, &moved, &errors)
}

fn error_line(source_key: &str, error: &str) -> String {
    format!("Error moving file {}: {}", source_key, error)
}

fn compose_from_parts(dest_bucket: &str, dest_prefix: &str, moved: &[&str], errors: &[String]) -> String {
    let mut message = String::new();
    if !moved.is_empty() {
        message.push_str(&format!(
            "Successfully moved the following files to {}/{}:\n",
            dest_bucket, dest_prefix
        ));
        message.push_str(&moved.join("\n"));
        message.push('\n');
    }
    if !errors.is_empty() {
        message.push_str("Errors encountered:\n");
        message.push_str(&errors.join("\n"));
    }
    message
}
