//! Layered YAML config file
//!
//! ```yaml
//! default:
//!   files: "*.html,*.css"
//!   root: "./build"
//!   bucket: "my-bucket"
//! staging:
//!   bucket: "my-staging-bucket"
//! ```
//!
//! The `default` section applies to every run, the section named by `--env`
//! is overlaid on top of it. Values passed on the command line always win.

use super::Config;
use crate::types::DeployError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

/// Section applied to every run
const DEFAULT_SECTION: &str = "default";

/// One section of the config file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
    pub files: Option<String>,
    pub forever: Option<String>,
    pub root: Option<String>,
    pub dest: Option<String>,
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl ConfigLayer {
    /// Overlay `self` on `base`: values present here win, gaps come from `base`.
    pub fn over(&self, base: &ConfigLayer) -> ConfigLayer {
        fn pick(top: &Option<String>, base: &Option<String>) -> Option<String> {
            match top {
                Some(value) if !value.is_empty() => Some(value.clone()),
                _ => base.clone(),
            }
        }

        ConfigLayer {
            files: pick(&self.files, &base.files),
            forever: pick(&self.forever, &base.forever),
            root: pick(&self.root, &base.root),
            dest: pick(&self.dest, &base.dest),
            bucket: pick(&self.bucket, &base.bucket),
            key: pick(&self.key, &base.key),
            secret: pick(&self.secret, &base.secret),
            region: pick(&self.region, &base.region),
            endpoint: pick(&self.endpoint, &base.endpoint),
        }
    }
}

/// Parsed config file: section name to layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    sections: BTreeMap<String, ConfigLayer>,
}

impl ConfigFile {
    /// Parse a YAML document. An empty document has no sections.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, DeployError> {
        let sections: Option<BTreeMap<String, Option<ConfigLayer>>> =
            serde_yaml_ng::from_str(contents).map_err(|source| DeployError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let sections = sections
            .unwrap_or_default()
            .into_iter()
            .map(|(name, layer)| (name, layer.unwrap_or_default()))
            .collect();

        Ok(Self { sections })
    }

    pub fn section(&self, name: &str) -> Option<&ConfigLayer> {
        self.sections.get(name)
    }

    /// Combined layer for a run: the env section over the `default` section.
    ///
    /// A requested env that has no section is always an error, even when a
    /// `default` section exists.
    pub fn layer_for(&self, env: Option<&str>) -> Result<ConfigLayer, DeployError> {
        let env_layer = match env {
            Some(env) => self
                .section(env)
                .cloned()
                .ok_or_else(|| DeployError::EnvironmentNotFound {
                    env: env.to_string(),
                })?,
            None => ConfigLayer::default(),
        };
        let default_layer = self.section(DEFAULT_SECTION).cloned().unwrap_or_default();

        Ok(env_layer.over(&default_layer))
    }
}

/// Merge the config file found relative to the working directory into `config`.
pub fn load_and_merge(config: &mut Config) -> Result<(), DeployError> {
    load_and_merge_in(config, Path::new("."))
}

/// Merge the config file into `config`, resolving the default file name in `dir`.
///
/// An explicit `config.config_file` is used as given. When it is not set,
/// `dir/deploy.yaml` is read and a missing file there is not an error.
pub fn load_and_merge_in(config: &mut Config, dir: &Path) -> Result<(), DeployError> {
    let (path, is_default) = match &config.config_file {
        Some(path) => (path.clone(), false),
        None => (dir.join(DEFAULT_CONFIG_FILE), true),
    };

    let Some(file) = read_config_file(&path, is_default)? else {
        debug!(path = %path.display(), "no config file at default path");
        // A requested env section cannot exist without a file, so this fails
        // where a plain missing default file would be a no-op
        if let Some(env) = &config.env {
            return Err(DeployError::EnvironmentNotFound { env: env.clone() });
        }
        return Ok(());
    };

    let layer = file.layer_for(config.env.as_deref())?;
    info!(
        path = %path.display(),
        env = config.env.as_deref().unwrap_or(DEFAULT_SECTION),
        "merging config file"
    );
    config.fill_unset_from(&layer);

    Ok(())
}

fn read_config_file(path: &Path, is_default: bool) -> Result<Option<ConfigFile>, DeployError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if is_default {
                return Ok(None);
            }
            return Err(DeployError::ConfigFileMissing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(DeployError::Io(e)),
    };

    ConfigFile::parse(path, &contents).map(Some)
}
