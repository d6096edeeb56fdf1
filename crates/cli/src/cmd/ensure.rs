//! Implementation of the `jdkup ensure` command.
//!
//! Runs the provisioning workflow against the local host: platform probe,
//! rpm queries, yum installs for whatever is missing, then the alternatives
//! switch. The transcript goes to stdout as it happens; failed installs or
//! switches appear there as marker lines, and the command still exits zero.
//! Only an unknown version or a non-RPM host exits non-zero.

use anyhow::{Context, Result};
use tracing::info;

use jdkup_core::{JdkPackage, LocalTarget, Provisioner, Transcript};

use crate::output;

/// Execute the ensure command.
pub fn cmd_ensure(version: &str) -> Result<()> {
  let package: JdkPackage = version.parse()?;

  info!(package = %package, "ensuring OpenJDK package");
  output::print_info(&format!("Ensuring {} ({})", package, package.package()));

  let target = LocalTarget::new();
  let provisioner = Provisioner::new(package);
  let mut transcript = Transcript::new(std::io::stdout());

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let bin_dir = rt.block_on(provisioner.ensure(&target, &mut transcript))?;

  output::print_success(&format!(
    "{} ensured, java available in {}",
    package.package(),
    bin_dir.display()
  ));

  Ok(())
}
