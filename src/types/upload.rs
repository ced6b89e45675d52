//! ResolvedUpload - One planned copy request with its caching headers

use std::path::PathBuf;

/// `max-age` for short-lived assets
pub const LIMITED: u64 = 60;

/// `max-age` for long-lived assets (seconds in a Julian year)
pub const FOREVER: u64 = 31_556_926;

/// Encoding advertised for every deployed object; assets are gzipped on disk.
pub const CONTENT_ENCODING: &str = "gzip";

/// Caching tier of a resolved upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheTier {
    /// Cached for [`LIMITED`] seconds
    #[default]
    Limited,

    /// Cached for [`FOREVER`] seconds
    Forever,
}

impl CacheTier {
    /// `max-age` value for this tier
    pub fn max_age_seconds(self) -> u64 {
        match self {
            CacheTier::Limited => LIMITED,
            CacheTier::Forever => FOREVER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CacheTier::Limited => "limited",
            CacheTier::Forever => "forever",
        }
    }
}

/// A matched file together with its destination key and caching headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpload {
    /// Local path of the matched file (root joined with the relative path)
    pub source_path: PathBuf,

    /// Key the copy reads from inside the bucket
    pub source_key: String,

    /// Key the object is written to
    pub destination_key: String,

    pub content_type: String,

    pub cache_tier: CacheTier,

    pub cache_max_age_seconds: u64,

    pub content_encoding: &'static str,
}

impl ResolvedUpload {
    /// `Cache-Control` header value
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_seconds)
    }
}
