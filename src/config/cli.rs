//! Command-line surface

use super::Config;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Deploy static site assets to an S3 bucket with per-file caching headers
#[derive(Debug, Parser)]
#[command(name = "s3deploy", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy matched files in the bucket, replacing their caching metadata
    Deploy(DeployArgs),
}

/// Flags of the `deploy` subcommand.
///
/// Value flags carry no clap defaults: anything not passed stays unset so the
/// config file layers can fill it, and built-in defaults are applied last.
#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    /// Comma-separated glob patterns of files to deploy (within root) [default: *]
    #[arg(long)]
    pub files: Option<String>,

    /// Comma-separated glob patterns of files cached for a year instead of a minute
    #[arg(long)]
    pub forever: Option<String>,

    /// The local directory to deploy [default: ./]
    #[arg(long)]
    pub root: Option<String>,

    /// The destination directory to write files to in the bucket [default: ./]
    #[arg(long)]
    pub dest: Option<String>,

    /// A yaml file to read configuration from [default: ./deploy.yaml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The env to read from the config file
    #[arg(long)]
    pub env: Option<String>,

    /// The bucket to deploy to
    #[arg(long)]
    pub bucket: Option<String>,

    /// The access key to use
    #[arg(long)]
    pub key: Option<String>,

    /// The secret of the provided key
    #[arg(long)]
    pub secret: Option<String>,

    /// The region the bucket is in [default: us-east-1]
    #[arg(long)]
    pub region: Option<String>,

    /// Custom endpoint URL for S3-compatible stores
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the upload plan without contacting the store
    #[arg(long)]
    pub dry_run: bool,
}

impl From<DeployArgs> for Config {
    fn from(args: DeployArgs) -> Self {
        Config {
            files: explicit("files", args.files),
            forever: explicit("forever", args.forever),
            root: explicit("root", args.root),
            dest: explicit("dest", args.dest),
            bucket: explicit("bucket", args.bucket),
            key: explicit("key", args.key),
            secret: explicit("secret", args.secret),
            region: explicit("region", args.region),
            endpoint: explicit("endpoint", args.endpoint),
            config_file: args.config.filter(|path| !path.as_os_str().is_empty()),
            env: args.env.filter(|env| !env.is_empty()),
            dry_run: args.dry_run,
        }
    }
}

// An explicit empty value cannot be told apart from "not provided" once it is
// in the model, so it is treated as unset. Warn so the fallback is visible.
fn explicit(flag: &str, value: Option<String>) -> String {
    match value {
        Some(value) if value.is_empty() => {
            tracing::warn!(
                flag,
                "--{} was passed an empty value; treating it as unset",
                flag
            );
            value
        }
        Some(value) => value,
        None => String::new(),
    }
}
