//! Implementation of the `jdkup list` command.

use anyhow::Result;
use serde::Serialize;

use jdkup_core::JdkPackage;

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct PackageRow {
  name: &'static str,
  package: &'static str,
  devel_package: String,
  jre_package: String,
}

/// Execute the list command.
///
/// Prints the supported OpenJDK packages, newest first: the logical name an
/// operator selects and the RPM names it resolves to.
pub fn cmd_list(format: OutputFormat) -> Result<()> {
  let rows: Vec<PackageRow> = JdkPackage::ALL
    .iter()
    .map(|p| PackageRow {
      name: p.name(),
      package: p.package(),
      devel_package: p.devel_package(),
      jre_package: p.jre_package(),
    })
    .collect();

  if format.is_json() {
    return output::print_json(&rows);
  }

  for row in &rows {
    println!("{:<10} {}", row.name, row.package);
  }

  Ok(())
}
