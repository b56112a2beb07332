use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use comm_daemon::cli::Opts;
use comm_daemon::runtime;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    opts.validate()?;
    runtime::run(&opts)
}
