use std::path::Path;
use serde::Deserialize;
use tracing::{debug, info};
use crate::domain::{error::MoverError, models::MoveRequest};

pub const CONFIG_FILE_VAR: &str = "MOVER_CONFIG_FILE";

fn default_concurrency() -> usize {
    1
}

/// Everything one job run needs. Loaded from an optional YAML file, then overridden
/// field by field from `MOVER_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoverConfig {
    #[serde(flatten)]
    pub request: MoveRequest,
    #[serde(default = "default_concurrency")]
    pub max_concurrency: usize,
}

impl MoverConfig {
    pub fn from_env() -> Result<Self, MoverError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MoverError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(&path)?,
            None => Self { max_concurrency: default_concurrency(), ..Default::default() },
        };

        let request = &mut config.request;
        if let Some(v) = lookup("MOVER_SOURCE_BUCKET") { request.source_bucket = v; }
        if let Some(v) = lookup("MOVER_SOURCE_PREFIX") { request.source_prefix = v; }
        if let Some(v) = lookup("MOVER_DEST_BUCKET") { request.dest_bucket = v; }
        if let Some(v) = lookup("MOVER_DEST_PREFIX") { request.dest_prefix = v; }
        if let Some(v) = lookup("MOVER_NOTIFICATION_TARGET") { request.notification_target = v; }
        if let Some(v) = lookup("MOVER_DEST_KEY_POLICY") {
            request.dest_key_policy = v.parse()?;
        }
        if let Some(v) = lookup("MOVER_MAX_CONCURRENCY") {
            config.max_concurrency = v.trim().parse().map_err(|e| {
                MoverError::Config(format!("invalid MOVER_MAX_CONCURRENCY '{}': {}", v, e))
            })?;
        }

        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MoverError> {
        let path = path.as_ref();
        info!("Reading configuration file: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents)
            .map_err(|e| MoverError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<(), MoverError> {
        self.request.validate()?;
        if self.max_concurrency == 0 {
            return Err(MoverError::Config("max concurrency must be at least 1".to_string()));
        }
        Ok(())
    }
}
