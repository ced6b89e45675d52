//! Glob expansion under the deploy root

use crate::types::DeployError;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `*` and `?` stay within one path segment; dotfiles are not special.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Split a comma-separated pattern list. Empty segments are skipped.
pub fn split_patterns(patterns: &str) -> impl Iterator<Item = &str> {
    patterns.split(',').filter(|pattern| !pattern.is_empty())
}

/// Compile every pattern of a comma-separated list, failing on the first bad one.
pub fn compile_patterns(patterns: &str) -> Result<Vec<Pattern>, DeployError> {
    split_patterns(patterns)
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| DeployError::InvalidGlobPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Whether `relative` matches any of the compiled patterns
pub fn matches_any(patterns: &[Pattern], relative: &Path) -> bool {
    patterns
        .iter()
        .any(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
}

/// Expand glob patterns against the files under `root`
///
/// Every pattern is compiled before the filesystem is touched, so an invalid
/// pattern never yields a partial result. Matching is done on the path
/// relative to `root`, which means `*.css` only matches files directly in
/// `root` while `**/*.css` matches at any depth.
///
/// # Returns
/// * `Ok(BTreeSet<PathBuf>)` - Matched files relative to `root`, de-duplicated
///   across patterns and ordered by path
/// * `Err(DeployError)` - Invalid pattern, or `root` missing/unreadable
///
/// # Errors
/// * Unreadable entries below `root` are logged and skipped
///
/// Symbolic links are followed, so files under a linked directory are matched
/// through the link's path. Broken links and link cycles are logged and skipped.
pub fn expand_patterns(root: &Path, patterns: &str) -> Result<BTreeSet<PathBuf>, DeployError> {
    let compiled = compile_patterns(patterns)?;
    check_root(root)?;

    let mut matched = BTreeSet::new();
    if compiled.is_empty() {
        return Ok(matched);
    }

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry under deploy root");
                continue;
            }
        };

        // File types are those of the link targets
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if matches_any(&compiled, relative) {
            debug!(path = %relative.display(), "matched");
            matched.insert(relative.to_path_buf());
        }
    }

    Ok(matched)
}

fn check_root(root: &Path) -> Result<(), DeployError> {
    let metadata = fs::metadata(root).map_err(|source| DeployError::Filesystem {
        path: root.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(DeployError::Filesystem {
            path: root.to_path_buf(),
            source: std::io::Error::other("deploy root is not a directory"),
        });
    }

    fs::read_dir(root).map_err(|source| DeployError::Filesystem {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(())
}
