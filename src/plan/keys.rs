//! Object key construction

use std::path::{Component, Path};

/// Join a relative file path onto a key prefix and normalize the result.
///
/// `.` segments and empty segments are dropped, `..` removes the previous
/// segment (and is dropped at the top), the result never starts with `/`.
/// Segments are joined with `/` whatever the host separator is.
pub fn join_key(prefix: &str, relative: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();

    let prefix_segments = prefix.split(['/', '\\']).map(str::to_string);
    let relative_segments = relative.components().filter_map(|component| match component {
        Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
        Component::ParentDir => Some("..".to_string()),
        _ => None,
    });

    for segment in prefix_segments.chain(relative_segments) {
        match segment.as_str() {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}
