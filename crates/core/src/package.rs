//! The supported native OpenJDK package streams.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownPackage;

/// A native OpenJDK package stream, as shipped by RPM-based distributions.
///
/// Each entry is static configuration: a logical label shown to operators
/// and the base RPM name. The -devel and jre identifiers are derived from
/// the base name and never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JdkPackage {
  #[serde(rename = "openJDK21")]
  OpenJdk21,
  #[serde(rename = "openJDK17")]
  OpenJdk17,
  #[serde(rename = "openJDK13")]
  OpenJdk13,
  #[serde(rename = "openJDK11")]
  OpenJdk11,
  #[serde(rename = "openJDK8")]
  OpenJdk8,
  #[serde(rename = "openJDK7")]
  OpenJdk7,
  #[serde(rename = "openJDK6")]
  OpenJdk6,
}

impl JdkPackage {
  /// All supported streams, newest first.
  pub const ALL: [JdkPackage; 7] = [
    JdkPackage::OpenJdk21,
    JdkPackage::OpenJdk17,
    JdkPackage::OpenJdk13,
    JdkPackage::OpenJdk11,
    JdkPackage::OpenJdk8,
    JdkPackage::OpenJdk7,
    JdkPackage::OpenJdk6,
  ];

  /// Logical label shown to operators.
  pub const fn name(&self) -> &'static str {
    match self {
      JdkPackage::OpenJdk21 => "openJDK21",
      JdkPackage::OpenJdk17 => "openJDK17",
      JdkPackage::OpenJdk13 => "openJDK13",
      JdkPackage::OpenJdk11 => "openJDK11",
      JdkPackage::OpenJdk8 => "openJDK8",
      JdkPackage::OpenJdk7 => "openJDK7",
      JdkPackage::OpenJdk6 => "openJDK6",
    }
  }

  /// Major Java version of this stream.
  pub const fn major(&self) -> u32 {
    match self {
      JdkPackage::OpenJdk21 => 21,
      JdkPackage::OpenJdk17 => 17,
      JdkPackage::OpenJdk13 => 13,
      JdkPackage::OpenJdk11 => 11,
      JdkPackage::OpenJdk8 => 8,
      JdkPackage::OpenJdk7 => 7,
      JdkPackage::OpenJdk6 => 6,
    }
  }

  /// Base RPM name.
  pub const fn package(&self) -> &'static str {
    match self {
      JdkPackage::OpenJdk21 => "java-21-openjdk",
      JdkPackage::OpenJdk17 => "java-17-openjdk",
      JdkPackage::OpenJdk13 => "java-13-openjdk",
      JdkPackage::OpenJdk11 => "java-11-openjdk",
      JdkPackage::OpenJdk8 => "java-1.8.0-openjdk",
      JdkPackage::OpenJdk7 => "java-1.7.0-openjdk",
      JdkPackage::OpenJdk6 => "java-1.6.0-openjdk",
    }
  }

  /// The -devel variant carrying headers and javac.
  pub fn devel_package(&self) -> String {
    format!("{}-devel", self.package())
  }

  /// Runtime-image name: the base name with its leading `java` component
  /// rewritten to `jre`.
  pub fn jre_package(&self) -> String {
    self.package().replacen("java", "jre", 1)
  }
}

impl fmt::Display for JdkPackage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl FromStr for JdkPackage {
  type Err = UnknownPackage;

  /// Accepts the logical name (`openJDK17`, case-insensitive), the bare
  /// major version (`17`), or the base RPM name (`java-17-openjdk`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let needle = s.trim().to_lowercase();
    JdkPackage::ALL
      .iter()
      .copied()
      .find(|p| {
        needle == p.name().to_lowercase()
          || needle == p.package()
          || needle == p.major().to_string()
      })
      .ok_or_else(|| UnknownPackage(s.to_string()))
  }
}
