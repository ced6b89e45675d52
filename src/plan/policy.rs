//! Cache tier classification and content types

use crate::scanner::{compile_patterns, matches_any};
use crate::types::{CacheTier, DeployError};
use glob::Pattern;
use std::path::Path;

/// Decides which cache tier a matched file belongs to.
///
/// The long-lived tier is selected by a second pattern group (`forever` in
/// the config file, `--forever` on the command line): a file whose path
/// relative to the root matches any of those patterns is cached for
/// [`FOREVER`](crate::types::FOREVER) seconds, everything else for
/// [`LIMITED`](crate::types::LIMITED). Patterns are compiled and matched by
/// the same code as `files`.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    forever: Vec<Pattern>,
}

impl CachePolicy {
    /// Build a policy from comma-separated long-lived patterns
    pub fn new(forever_patterns: &str) -> Result<Self, DeployError> {
        Ok(Self {
            forever: compile_patterns(forever_patterns)?,
        })
    }

    pub fn tier_for(&self, relative: &Path) -> CacheTier {
        if matches_any(&self.forever, relative) {
            CacheTier::Forever
        } else {
            CacheTier::Limited
        }
    }
}

/// MIME type from the file extension, `application/octet-stream` when unknown
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
