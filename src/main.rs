use clap::Parser;
use s3deploy::config::{Cli, Command};
use s3deploy::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Deploy(args) => {
            s3deploy::commands::deploy::run(Config::from(args))?;
        }
    }

    Ok(())
}
