//! Command line options

use std::path::PathBuf;

use clap::Parser;

/// Command line options of the communicator daemon
#[derive(Parser, Debug)]
#[command(author, version, about = "Message-queue communicator daemon")]
pub struct Opts {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: PathBuf,
}

impl Opts {
    /// Reject option values that cannot work before any state is touched
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.config.is_file() {
            anyhow::bail!("config file not found: {}", self.config.display());
        }
        Ok(())
    }
}
