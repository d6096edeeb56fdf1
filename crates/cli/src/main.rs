//! jdkup - native OpenJDK provisioning for RPM-based hosts.

mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Ensure a native OpenJDK package is installed and selected via alternatives
#[derive(Parser)]
#[command(name = "jdkup")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the supported OpenJDK packages
  List {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Ensure an OpenJDK package on this host and switch the java alternative
  Ensure {
    /// OpenJDK version: major number (17), logical name (openJDK17), or
    /// package name (java-17-openjdk)
    version: String,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::List { format } => cmd::cmd_list(format),
    Commands::Ensure { version } => cmd::cmd_ensure(&version),
  }
}
