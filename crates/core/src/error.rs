//! Error types for jdkup-core.

use thiserror::Error;

/// Errors that abort a provisioning run.
///
/// Failed install or switch commands are deliberately not represented here:
/// they are annotated on the transcript and the workflow continues. Only a
/// target without rpm/yum/alternatives makes the whole run meaningless.
#[derive(Debug, Error)]
pub enum ProvisionError {
  /// The target is not an RPM-based distribution, or could not be confirmed
  /// as one.
  #[error("target does not seem to be running an RPM-based distro (missing {marker})")]
  UnsupportedPlatform { marker: String },
}

/// A version string that does not name a supported OpenJDK package.
#[derive(Debug, Error)]
#[error("unknown OpenJDK version '{0}' (supported: 6, 7, 8, 11, 13, 17, 21)")]
pub struct UnknownPackage(pub String);
