//! Error types for s3deploy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for deploy operations
///
/// Every variant is fatal for the run: nothing is retried and no partially
/// completed uploads are rolled back.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file exists but is not a valid layered document
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Config file was named explicitly but does not exist
    #[error("Config file not found: {path}")]
    ConfigFileMissing { path: PathBuf },

    /// Requested environment section is absent from the config file
    #[error("Config for env '{env}' not found")]
    EnvironmentNotFound { env: String },

    /// Region is not a known identifier
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlobPattern { pattern: String, reason: String },

    /// Root directory missing or unreadable
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Object store rejected a copy request
    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

impl DeployError {
    /// Check if this error came from loading or merging configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DeployError::Config(_)
                | DeployError::ConfigParse { .. }
                | DeployError::ConfigFileMissing { .. }
                | DeployError::EnvironmentNotFound { .. }
                | DeployError::UnknownRegion(_)
        )
    }

    /// Check if this error was raised while building the upload plan
    pub fn is_plan_error(&self) -> bool {
        matches!(
            self,
            DeployError::InvalidGlobPattern { .. } | DeployError::Filesystem { .. }
        )
    }

    /// Check if this error was returned by the object store
    pub fn is_upload_error(&self) -> bool {
        matches!(self, DeployError::Upload { .. })
    }
}
