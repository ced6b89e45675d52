//! File matching under the deploy root

mod walker;

pub use walker::{compile_patterns, expand_patterns, matches_any, split_patterns};
