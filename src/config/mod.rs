//! Configuration management
//!
//! A [`Config`] starts out holding only what was passed on the command line.
//! [`load_and_merge`] then fills its unset fields from the layered config
//! file, and [`Config::apply_defaults`] fills whatever is still unset with the
//! built-in defaults. An empty string is the "unset" value for every field.

mod cli;
mod file;

pub use cli::{Cli, Command, DeployArgs};
pub use file::{load_and_merge, load_and_merge_in, ConfigFile, ConfigLayer, DEFAULT_CONFIG_FILE};

use crate::types::{DeployError, Region};
use std::path::PathBuf;

pub const DEFAULT_FILES: &str = "*";
pub const DEFAULT_ROOT: &str = "./";
pub const DEFAULT_DEST: &str = "./";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Effective configuration for one deploy run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Comma-separated glob patterns of files to deploy (relative to root)
    pub files: String,

    /// Comma-separated glob patterns of files cached for the long-lived tier
    pub forever: String,

    /// Local directory to deploy from
    pub root: String,

    /// Destination key prefix inside the bucket
    pub dest: String,

    pub bucket: String,

    /// Access key
    pub key: String,

    /// Secret key
    pub secret: String,

    pub region: String,

    /// Custom endpoint URL for S3-compatible stores
    pub endpoint: String,

    /// Explicit config file path (never merged)
    pub config_file: Option<PathBuf>,

    /// Config file section to overlay (never merged)
    pub env: Option<String>,

    /// Print the plan without contacting the store (never merged)
    pub dry_run: bool,
}

impl Config {
    /// Fill every unset field from `layer`, leaving set fields untouched.
    ///
    /// Transient fields (`config_file`, `env`, `dry_run`) are not part of a
    /// layer and are never touched. Empty layer values count as absent.
    pub fn fill_unset_from(&mut self, layer: &ConfigLayer) {
        fill(&mut self.files, &layer.files);
        fill(&mut self.forever, &layer.forever);
        fill(&mut self.root, &layer.root);
        fill(&mut self.dest, &layer.dest);
        fill(&mut self.bucket, &layer.bucket);
        fill(&mut self.key, &layer.key);
        fill(&mut self.secret, &layer.secret);
        fill(&mut self.region, &layer.region);
        fill(&mut self.endpoint, &layer.endpoint);
    }

    /// Fill fields still unset after merging with the built-in defaults
    pub fn apply_defaults(&mut self) {
        fill_str(&mut self.files, DEFAULT_FILES);
        fill_str(&mut self.root, DEFAULT_ROOT);
        fill_str(&mut self.dest, DEFAULT_DEST);
        fill_str(&mut self.region, DEFAULT_REGION);
    }

    /// Check the settings required before any upload is attempted
    pub fn validate_for_upload(&self) -> Result<Region, DeployError> {
        for (name, value) in [
            ("bucket", &self.bucket),
            ("key", &self.key),
            ("secret", &self.secret),
            ("region", &self.region),
        ] {
            if value.is_empty() {
                return Err(DeployError::Config(format!(
                    "'{}' must be set on the command line or in the config file",
                    name
                )));
            }
        }

        Region::parse(&self.region)
    }
}

fn fill(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        fill_str(field, value);
    }
}

fn fill_str(field: &mut String, value: &str) {
    if field.is_empty() && !value.is_empty() {
        *field = value.to_string();
    }
}
