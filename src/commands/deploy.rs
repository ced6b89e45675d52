//! Main deploy command

use crate::config::load_and_merge;
use crate::executor::{deploy, DeployEvent, DeployStats, S3Session, S3Settings, StorageSession};
use crate::plan::{resolve, UploadPlan};
use crate::types::{CacheTier, DeployError};
use crate::ui::ProgressReporter;
use crate::Config;
use console::style;
use std::sync::Arc;

/// Run the deploy operation
///
/// Merges the config file into the command-line configuration, applies the
/// built-in defaults, resolves the upload plan and copies every planned file.
/// With `dry_run` set the plan is printed and no session is opened.
pub fn run(mut config: Config) -> Result<DeployStats, DeployError> {
    load_and_merge(&mut config)?;
    config.apply_defaults();

    if config.dry_run {
        let plan = resolve(&config)?;
        println!("{}", format_plan(&plan));
        println!("Dry-run mode: nothing was copied.");
        return Ok(DeployStats::default());
    }

    let region = config.validate_for_upload()?;
    let plan = resolve(&config)?;
    if plan.is_empty() {
        println!("No files matched '{}' under {}.", config.files, config.root);
        return Ok(DeployStats::default());
    }

    let session = S3Session::open(S3Settings {
        bucket: config.bucket.clone(),
        access_key: config.key.clone(),
        secret_key: config.secret.clone(),
        region,
        endpoint: Some(config.endpoint.clone()).filter(|endpoint| !endpoint.is_empty()),
    })?;

    let stats = execute(&plan, &session)?;
    println!(
        "Deployed {} file(s) to {}",
        stats.completed,
        style(&config.bucket).bold()
    );
    Ok(stats)
}

/// Copy every upload of `plan` through `session`, drawing progress on stderr.
pub fn execute<S>(plan: &UploadPlan, session: &S) -> Result<DeployStats, DeployError>
where
    S: StorageSession + ?Sized,
{
    let mut reporter = if console::Term::stderr().is_term() {
        ProgressReporter::new()
    } else {
        ProgressReporter::hidden()
    };
    reporter.start(plan.len() as u64);

    let reporter = Arc::new(reporter);
    let progress_cb = move |event: &DeployEvent| match event {
        DeployEvent::UploadStart {
            destination_key, ..
        } => reporter.set_current(destination_key),
        DeployEvent::UploadSuccess { .. } => reporter.complete_upload(),
        DeployEvent::UploadError {
            destination_key,
            message,
            ..
        } => reporter.upload_error(destination_key, message),
        DeployEvent::Complete { stats } => reporter.finish(stats.completed),
    };

    deploy(plan, session, Some(&progress_cb))
}

fn format_plan(plan: &UploadPlan) -> String {
    if plan.is_empty() {
        return "Upload plan:\n  (no matching files)".to_string();
    }

    let mut lines = Vec::with_capacity(plan.len() + 1);
    lines.push(format!("Upload plan ({} file(s)):", plan.len()));
    for upload in plan {
        let tier = match upload.cache_tier {
            CacheTier::Forever => style(upload.cache_tier.label()).green(),
            CacheTier::Limited => style(upload.cache_tier.label()).yellow(),
        };
        lines.push(format!(
            "  {:<8} {:<24} {} -> {}",
            tier,
            upload.content_type,
            upload.source_key,
            upload.destination_key
        ));
    }

    lines.join("\n")
}
