//! # s3deploy - Static asset deploys to S3
//!
//! Copies the files matched by glob patterns inside a bucket, replacing their
//! metadata with a content type, a `Cache-Control: max-age` chosen from two
//! cache tiers, and a gzip content encoding.

// Module declarations
pub mod config;
pub mod scanner;
pub mod plan;
pub mod executor;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{CacheTier, DeployError, ResolvedUpload};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
