//! Upload planning: matched files to resolved uploads

mod keys;
mod policy;

pub use keys::join_key;
pub use policy::{content_type_for, CachePolicy};

use crate::scanner::expand_patterns;
use crate::types::{DeployError, ResolvedUpload, CONTENT_ENCODING};
use crate::Config;
use std::path::{Path, PathBuf};

/// Files selected for a deploy run, resolved on demand
///
/// The set of files is fixed when the plan is built; [`UploadPlan::iter`]
/// computes each [`ResolvedUpload`] lazily and can be called any number of
/// times, always yielding the same sequence ordered by relative path.
#[derive(Debug, Clone)]
pub struct UploadPlan {
    root: PathBuf,
    source_prefix: String,
    dest: String,
    files: Vec<PathBuf>,
    policy: CachePolicy,
}

impl UploadPlan {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Matched files relative to the root
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = ResolvedUpload> + '_ {
        self.files.iter().map(move |relative| self.resolve_one(relative))
    }

    fn resolve_one(&self, relative: &Path) -> ResolvedUpload {
        let cache_tier = self.policy.tier_for(relative);
        ResolvedUpload {
            source_path: self.root.join(relative),
            source_key: join_key(&self.source_prefix, relative),
            destination_key: join_key(&self.dest, relative),
            content_type: content_type_for(relative),
            cache_tier,
            cache_max_age_seconds: cache_tier.max_age_seconds(),
            content_encoding: CONTENT_ENCODING,
        }
    }
}

/// Build the upload plan for an effective configuration
///
/// Both pattern groups are compiled before anything else, so an invalid
/// pattern fails the run without producing a partial plan.
///
/// # Example
/// ```no_run
/// use s3deploy::plan::resolve;
/// use s3deploy::Config;
///
/// let config = Config {
///     files: "*.html,*.abc123.js".to_string(),
///     forever: "*.abc123.js".to_string(),
///     root: "./site".to_string(),
///     dest: "./".to_string(),
///     ..Config::default()
/// };
/// for upload in resolve(&config)?.iter() {
///     println!("{} {}", upload.destination_key, upload.cache_control());
/// }
/// # Ok::<(), s3deploy::types::DeployError>(())
/// ```
pub fn resolve(config: &Config) -> Result<UploadPlan, DeployError> {
    let policy = CachePolicy::new(&config.forever)?;
    let root = PathBuf::from(&config.root);
    let files = expand_patterns(&root, &config.files)?;

    tracing::info!(
        root = %root.display(),
        matched = files.len(),
        "resolved upload plan"
    );

    Ok(UploadPlan {
        source_prefix: root.to_string_lossy().into_owned(),
        root,
        dest: config.dest.clone(),
        files: files.into_iter().collect(),
        policy,
    })
}

impl<'a> IntoIterator for &'a UploadPlan {
    type Item = ResolvedUpload;
    type IntoIter = Box<dyn Iterator<Item = ResolvedUpload> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
