//! Core type definitions for s3deploy

mod error;
mod region;
mod upload;

pub use error::DeployError;
pub use region::Region;
pub use upload::{CacheTier, ResolvedUpload, CONTENT_ENCODING, FOREVER, LIMITED};
