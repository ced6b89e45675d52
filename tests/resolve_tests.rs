//! Upload plan resolution against a real directory tree.

use s3deploy::plan::resolve;
use s3deploy::types::{CONTENT_ENCODING, FOREVER, LIMITED};
use s3deploy::{CacheTier, Config, DeployError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_for(root: &Path, files: &str, forever: &str) -> Config {
    Config {
        files: files.to_string(),
        forever: forever.to_string(),
        root: root.to_string_lossy().into_owned(),
        dest: "./".to_string(),
        ..Config::default()
    }
}

#[test]
fn test_star_pattern_is_not_recursive() {
    let root = TempDir::new().expect("create temp dir");
    fs::create_dir(root.path().join("sub")).expect("create sub dir");
    fs::write(root.path().join("a.css"), "a").expect("write a.css");
    fs::write(root.path().join("b.js"), "b").expect("write b.js");
    fs::write(root.path().join("sub/c.css"), "c").expect("write sub/c.css");

    let plan = resolve(&config_for(root.path(), "*.css", "")).expect("resolve");
    let keys: Vec<_> = plan.iter().map(|u| u.destination_key).collect();

    assert_eq!(keys, vec!["a.css"]);
}

#[test]
fn test_site_example_end_to_end() {
    let root = TempDir::new().expect("create temp dir");
    fs::write(root.path().join("index.html"), "<html>").expect("write index.html");
    fs::write(root.path().join("app.abc123.js"), "js").expect("write app.abc123.js");

    let plan = resolve(&config_for(root.path(), "*.html,*.abc123.js", "*.abc123.js"))
        .expect("resolve");
    let uploads: Vec<_> = plan.iter().collect();

    assert_eq!(uploads.len(), 2);
    let by_key = |key: &str| {
        uploads
            .iter()
            .find(|u| u.destination_key == key)
            .unwrap_or_else(|| panic!("missing upload for {key}"))
    };
    assert_eq!(by_key("index.html").cache_max_age_seconds, 60);
    assert_eq!(by_key("app.abc123.js").cache_max_age_seconds, 31_556_926);
    assert!(uploads.iter().all(|u| u.content_encoding == CONTENT_ENCODING));
}

#[test]
fn test_every_upload_is_in_one_of_two_tiers() {
    let root = TempDir::new().expect("create temp dir");
    fs::create_dir(root.path().join("static")).expect("create static dir");
    for name in ["index.html", "about.html", "static/app.1a2b.js", "static/site.9f8e.css"] {
        fs::write(root.path().join(name), name).expect("write file");
    }

    let plan = resolve(&config_for(root.path(), "*.html,static/*", "static/*")).expect("resolve");
    assert_eq!(plan.len(), 4);
    for upload in &plan {
        match upload.cache_tier {
            CacheTier::Forever => {
                assert!(upload.destination_key.starts_with("static/"));
                assert_eq!(upload.cache_max_age_seconds, FOREVER);
            }
            CacheTier::Limited => {
                assert!(upload.destination_key.ends_with(".html"));
                assert_eq!(upload.cache_max_age_seconds, LIMITED);
            }
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let root = TempDir::new().expect("create temp dir");
    for name in ["z.html", "m.css", "a.js", "k.png"] {
        fs::write(root.path().join(name), name).expect("write file");
    }
    let config = config_for(root.path(), "*.js,*", "*.css");

    let first: Vec<_> = resolve(&config).expect("first resolve").iter().collect();
    let second: Vec<_> = resolve(&config).expect("second resolve").iter().collect();

    assert_eq!(first, second);
    let keys: Vec<_> = first.iter().map(|u| u.destination_key.as_str()).collect();
    assert_eq!(keys, vec!["a.js", "k.png", "m.css", "z.html"]);
}

#[test]
fn test_content_types_follow_extensions() {
    let root = TempDir::new().expect("create temp dir");
    for name in ["index.html", "site.css", "logo.png", "data.bin7"] {
        fs::write(root.path().join(name), name).expect("write file");
    }

    let plan = resolve(&config_for(root.path(), "*", "")).expect("resolve");
    let content_type = |key: &str| {
        plan.iter()
            .find(|u| u.destination_key == key)
            .map(|u| u.content_type)
            .unwrap_or_default()
    };

    assert_eq!(content_type("index.html"), "text/html");
    assert_eq!(content_type("site.css"), "text/css");
    assert_eq!(content_type("logo.png"), "image/png");
    assert_eq!(content_type("data.bin7"), "application/octet-stream");
}

#[test]
fn test_zero_matches_is_an_empty_plan() {
    let root = TempDir::new().expect("create temp dir");
    let plan = resolve(&config_for(root.path(), "*.html", "")).expect("resolve");
    assert!(plan.is_empty());
    assert_eq!(plan.iter().count(), 0);
}

#[test]
fn test_invalid_pattern_fails_whole_plan() {
    let root = TempDir::new().expect("create temp dir");
    fs::write(root.path().join("index.html"), "<html>").expect("write index.html");

    let err = resolve(&config_for(root.path(), "*.html,[z-", "")).unwrap_err();
    assert!(matches!(err, DeployError::InvalidGlobPattern { .. }));
}

#[test]
fn test_missing_root_is_a_filesystem_error() {
    let root = TempDir::new().expect("create temp dir");
    let err = resolve(&config_for(&root.path().join("dist"), "*", "")).unwrap_err();
    assert!(matches!(err, DeployError::Filesystem { .. }));
}

#[test]
fn test_files_and_forever_groups_agree_on_every_pattern() {
    let root = TempDir::new().expect("create temp dir");
    fs::create_dir(root.path().join("static")).expect("create static dir");
    let mut names = vec!["{a.js", "a.js", "ab.js", "static/x.js", "static/y.css"];
    if cfg!(unix) {
        names.push("a\\b.js");
    }
    for name in &names {
        fs::write(root.path().join(name), "x").expect("write fixture");
    }

    for pattern in ["{a.js", "static/**.js", "a\\b.js", "[ab].js", "static/*", "**/*.js"] {
        let as_files = resolve(&config_for(root.path(), pattern, ""));
        let as_forever = resolve(&config_for(root.path(), "*,static/*", pattern));

        match (as_files, as_forever) {
            (Ok(files_plan), Ok(forever_plan)) => {
                let selected: Vec<_> = files_plan.iter().map(|u| u.destination_key).collect();
                let long_lived: Vec<_> = forever_plan
                    .iter()
                    .filter(|u| u.cache_tier == CacheTier::Forever)
                    .map(|u| u.destination_key)
                    .collect();
                assert_eq!(selected, long_lived, "pattern {pattern:?} differs between groups");
            }
            (Err(files_err), Err(forever_err)) => {
                assert!(matches!(files_err, DeployError::InvalidGlobPattern { .. }));
                assert!(matches!(forever_err, DeployError::InvalidGlobPattern { .. }));
            }
            (files, forever) => panic!(
                "pattern {pattern:?} accepted by one group only: files={:?} forever={:?}",
                files.map(|p| p.len()),
                forever.map(|p| p.len())
            ),
        }
    }
}
