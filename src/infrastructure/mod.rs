pub mod s3_adapter;
pub mod sns_adapter;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};

/// Renders an SDK error as `code: message` when the service sent error metadata,
/// falling back to the whole source chain for transport and dispatch failures.
pub(crate) fn describe_sdk_error<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}
