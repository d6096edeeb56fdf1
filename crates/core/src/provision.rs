//! The provisioning workflow.
//!
//! Steps run strictly in order, each command awaited to completion before
//! the next: platform probe, base package query/install, devel package
//! query/install, alternatives switch. Failed installs and switches are
//! annotated on the transcript and the workflow continues (log-and-continue
//! policy); only a missing RPM marker aborts the run.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::ProvisionError;
use crate::package::JdkPackage;
use crate::target::Target;
use crate::transcript::Transcript;

/// Install root for native OpenJDK packages.
pub const JVM_HOME_PREFIX: &str = "/usr/lib/jvm/";

/// Path of the java binary below an install root.
const JAVA_HOME_BIN: &str = "/bin/java";

/// Directory the switched `java` alternative is reachable from.
pub const JAVA_BIN_DIR: &str = "/usr/bin";

/// Marker file identifying an RPM-based distribution.
pub const REDHAT_RELEASE: &str = "/etc/redhat-release";

/// Ensures an OpenJDK package on a target and switches the system `java`
/// alternative to it.
pub struct Provisioner {
  package: JdkPackage,
}

impl Provisioner {
  pub fn new(package: JdkPackage) -> Self {
    Self { package }
  }

  /// Run the full workflow against `target`, writing progress to
  /// `transcript`.
  ///
  /// Returns the directory the switched `java` binary is reachable from.
  /// The path is returned even when an install or switch command failed;
  /// those failures appear as [`crate::ERROR_MARKER`] lines on the
  /// transcript and the caller is expected to inspect them.
  pub async fn ensure<T, W>(
    &self,
    target: &T,
    transcript: &mut Transcript<W>,
  ) -> Result<PathBuf, ProvisionError>
  where
    T: Target + ?Sized,
    W: Write,
  {
    info!(package = %self.package, "ensuring OpenJDK installation");

    if !self.is_rpm_based(target).await {
      return Err(ProvisionError::UnsupportedPlatform {
        marker: REDHAT_RELEASE.to_string(),
      });
    }

    // The successful base query already names the installed
    // name-version-release; the switch step reuses it to avoid a second
    // query.
    let resolved = self.query_installed(target, transcript, false).await;
    if resolved.is_none() {
      self.install_via_yum(target, transcript, false).await;
    }

    if self.query_installed(target, transcript, true).await.is_none() {
      self.install_via_yum(target, transcript, true).await;
    }

    self
      .switch_alternatives(target, transcript, resolved.as_deref())
      .await;

    Ok(PathBuf::from(JAVA_BIN_DIR))
  }

  /// Probe the RPM marker file. A transport failure counts as "cannot
  /// confirm", which aborts the run like a missing marker would.
  async fn is_rpm_based<T: Target + ?Sized>(&self, target: &T) -> bool {
    match target.file_exists(REDHAT_RELEASE).await {
      Ok(exists) => exists,
      Err(e) => {
        warn!(marker = REDHAT_RELEASE, error = %e, "platform probe failed");
        false
      }
    }
  }

  /// Query the package manager for the base or devel package.
  ///
  /// Returns the first line of the query output (the installed
  /// name-version-release) when the package is installed. Transport errors
  /// are logged and indistinguishable from "not installed".
  async fn query_installed<T, W>(
    &self,
    target: &T,
    transcript: &mut Transcript<W>,
    devel: bool,
  ) -> Option<String>
  where
    T: Target + ?Sized,
    W: Write,
  {
    let package = self.package_name(devel);
    transcript.line(&format!("Checking {} installation...", package));

    match target.run(&["rpm", "-q", &package]).await {
      Ok(out) => {
        transcript.command_output(&out.output);
        debug!(package = %package, code = ?out.code, "rpm query finished");
        if out.success() {
          Some(out.output.lines().next().unwrap_or("").trim().to_string())
        } else {
          None
        }
      }
      Err(e) => {
        warn!(package = %package, error = %e, "rpm query failed to run");
        None
      }
    }
  }

  /// Install the base or devel package. A non-zero exit is annotated on the
  /// transcript but does not abort the run.
  async fn install_via_yum<T, W>(&self, target: &T, transcript: &mut Transcript<W>, devel: bool)
  where
    T: Target + ?Sized,
    W: Write,
  {
    let package = self.package_name(devel);
    transcript.line(&format!(
      "{} not installed, trying to install via yum ...",
      package
    ));
    info!(package = %package, "installing via yum");

    match target.run(&["sudo", "yum", "-y", "install", &package]).await {
      Ok(out) => {
        transcript.command_output(&out.output);
        if !out.success() {
          transcript.error(&format!("Installation of {} failed!", package));
        }
      }
      Err(e) => {
        warn!(package = %package, error = %e, "yum install failed to run");
        transcript.error(&format!("Installation of {} failed!", package));
      }
    }
  }

  /// Point the system `java` alternative at the ensured installation.
  ///
  /// `resolved` is the name-version-release captured by the base query, if
  /// it succeeded; after a fresh install the package manager is queried
  /// again. Failures are annotated on the transcript, never returned.
  async fn switch_alternatives<T, W>(
    &self,
    target: &T,
    transcript: &mut Transcript<W>,
    resolved: Option<&str>,
  ) where
    T: Target + ?Sized,
    W: Write,
  {
    let package = self.package.package();
    transcript.line(&format!("Switching to {} using alternatives ...", package));

    let nvr = match resolved {
      Some(nvr) if !nvr.is_empty() => Some(nvr.to_string()),
      _ => self.resolve_nvr(target).await,
    };

    let Some(nvr) = nvr else {
      transcript.error(&format!(
        "Switching OpenJDK via alternatives to {} failed! {} does not appear to be installed",
        package, package
      ));
      return;
    };

    let java_path = format!("{}{}{}", JVM_HOME_PREFIX, nvr, JAVA_HOME_BIN);
    info!(path = %java_path, "switching java alternative");

    match target
      .run(&["sudo", "alternatives", "--set", "java", &java_path])
      .await
    {
      Ok(out) => {
        transcript.command_output(&out.output);
        if !out.success() {
          transcript.error(&self.switch_failed_message());
        }
      }
      Err(e) => {
        warn!(package = %package, error = %e, "alternatives switch failed to run");
        transcript.error(&self.switch_failed_message());
      }
    }
  }

  /// Resolve the installed name-version-release of the base package.
  async fn resolve_nvr<T: Target + ?Sized>(&self, target: &T) -> Option<String> {
    match target.run(&["rpm", "-q", self.package.package()]).await {
      Ok(out) if out.success() => {
        let nvr = out.output.lines().next().unwrap_or("").trim().to_string();
        if nvr.is_empty() { None } else { Some(nvr) }
      }
      Ok(out) => {
        debug!(package = %self.package.package(), code = ?out.code, "nvr query failed");
        None
      }
      Err(e) => {
        warn!(package = %self.package.package(), error = %e, "nvr query failed to run");
        None
      }
    }
  }

  fn package_name(&self, devel: bool) -> String {
    if devel {
      self.package.devel_package()
    } else {
      self.package.package().to_string()
    }
  }

  fn switch_failed_message(&self) -> String {
    format!(
      "Switching OpenJDK via alternatives to {} failed! {}/java may not exist or point to a different java version!",
      self.package.package(),
      JAVA_BIN_DIR
    )
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::io;
  use std::sync::Mutex;

  use async_trait::async_trait;

  use super::*;
  use crate::target::ExecOutput;
  use crate::transcript::ERROR_MARKER;

  const NVR: &str = "java-17-openjdk-17.0.9.0.9-3.el9.x86_64";

  /// Scripted target: responds to known argv lines, records every command
  /// issued, and answers the RPM marker probe per configuration.
  struct ScriptedTarget {
    rpm_based: bool,
    responses: HashMap<String, ExecOutput>,
    calls: Mutex<Vec<String>>,
  }

  impl ScriptedTarget {
    fn new(rpm_based: bool) -> Self {
      Self {
        rpm_based,
        responses: HashMap::new(),
        calls: Mutex::new(Vec::new()),
      }
    }

    fn respond(mut self, argv: &str, code: i32, output: &str) -> Self {
      self.responses.insert(
        argv.to_string(),
        ExecOutput {
          code: Some(code),
          output: output.to_string(),
        },
      );
      self
    }

    fn calls(&self) -> Vec<String> {
      self.calls.lock().unwrap().clone()
    }
  }

  #[async_trait]
  impl Target for ScriptedTarget {
    async fn run(&self, argv: &[&str]) -> io::Result<ExecOutput> {
      let key = argv.join(" ");
      self.calls.lock().unwrap().push(key.clone());
      Ok(self.responses.get(&key).cloned().unwrap_or(ExecOutput {
        code: Some(0),
        output: String::new(),
      }))
    }

    async fn file_exists(&self, path: &str) -> io::Result<bool> {
      Ok(self.rpm_based && path == REDHAT_RELEASE)
    }
  }

  async fn run_ensure(
    target: &ScriptedTarget,
    package: JdkPackage,
  ) -> (Result<PathBuf, ProvisionError>, String) {
    let mut transcript = Transcript::new(Vec::new());
    let result = Provisioner::new(package).ensure(target, &mut transcript).await;
    let log = String::from_utf8(transcript.into_inner()).unwrap();
    (result, log)
  }

  #[tokio::test]
  async fn unsupported_platform_issues_no_commands() {
    let target = ScriptedTarget::new(false);

    let (result, _) = run_ensure(&target, JdkPackage::OpenJdk17).await;

    assert!(matches!(
      result,
      Err(ProvisionError::UnsupportedPlatform { .. })
    ));
    assert!(target.calls().is_empty(), "no command may be issued");
  }

  #[tokio::test]
  async fn installed_base_is_not_reinstalled() {
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-17-openjdk", 0, NVR)
      .respond(
        "rpm -q java-17-openjdk-devel",
        1,
        "package java-17-openjdk-devel is not installed",
      );

    let (result, _) = run_ensure(&target, JdkPackage::OpenJdk17).await;

    assert!(result.is_ok());
    let calls = target.calls();
    assert!(!calls.contains(&"sudo yum -y install java-17-openjdk".to_string()));
    let installs = calls.iter().filter(|c| c.contains("yum")).count();
    assert_eq!(installs, 1, "exactly one install, for the devel package");
    assert!(calls.contains(&"sudo yum -y install java-17-openjdk-devel".to_string()));
  }

  #[tokio::test]
  async fn end_to_end_command_sequence() {
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-17-openjdk", 0, NVR)
      .respond(
        "rpm -q java-17-openjdk-devel",
        1,
        "package java-17-openjdk-devel is not installed",
      );

    let (result, log) = run_ensure(&target, JdkPackage::OpenJdk17).await;

    assert_eq!(result.unwrap(), PathBuf::from("/usr/bin"));
    assert_eq!(
      target.calls(),
      vec![
        "rpm -q java-17-openjdk".to_string(),
        "rpm -q java-17-openjdk-devel".to_string(),
        "sudo yum -y install java-17-openjdk-devel".to_string(),
        format!("sudo alternatives --set java /usr/lib/jvm/{}/bin/java", NVR),
      ]
    );
    assert!(!log.contains(ERROR_MARKER));
  }

  #[tokio::test]
  async fn failed_install_continues_and_returns_path() {
    // Nothing installed, both installs fail: the run still reaches the
    // switch step and still reports the binary directory.
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-13-openjdk", 1, "package java-13-openjdk is not installed")
      .respond("sudo yum -y install java-13-openjdk", 1, "No package available")
      .respond(
        "rpm -q java-13-openjdk-devel",
        1,
        "package java-13-openjdk-devel is not installed",
      )
      .respond("sudo yum -y install java-13-openjdk-devel", 1, "No package available");

    let (result, log) = run_ensure(&target, JdkPackage::OpenJdk13).await;

    assert_eq!(result.unwrap(), PathBuf::from("/usr/bin"));
    assert!(log.contains(ERROR_MARKER));
    assert!(log.contains("Installation of java-13-openjdk failed!"));
    assert!(log.contains("Installation of java-13-openjdk-devel failed!"));
    // The unresolved package means the alternatives command is never issued.
    assert!(!target.calls().iter().any(|c| c.contains("alternatives")));
  }

  #[tokio::test]
  async fn failed_switch_logs_marker() {
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-17-openjdk", 0, NVR)
      .respond("rpm -q java-17-openjdk-devel", 0, "java-17-openjdk-devel-17.0.9.0.9-3.el9.x86_64")
      .respond(
        &format!("sudo alternatives --set java /usr/lib/jvm/{}/bin/java", NVR),
        2,
        "failed to read link /usr/bin/java",
      );

    let (result, log) = run_ensure(&target, JdkPackage::OpenJdk17).await;

    assert_eq!(result.unwrap(), PathBuf::from("/usr/bin"));
    assert!(log.contains(ERROR_MARKER));
    assert!(log.contains("Switching OpenJDK via alternatives"));
  }

  #[tokio::test]
  async fn resolved_name_from_base_query_is_reused() {
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-21-openjdk", 0, "java-21-openjdk-21.0.1.0.12-2.el9.x86_64")
      .respond("rpm -q java-21-openjdk-devel", 0, "java-21-openjdk-devel-21.0.1.0.12-2.el9.x86_64");

    let (result, _) = run_ensure(&target, JdkPackage::OpenJdk21).await;

    assert!(result.is_ok());
    let queries = target
      .calls()
      .iter()
      .filter(|c| *c == "rpm -q java-21-openjdk")
      .count();
    assert_eq!(queries, 1, "resolved name from the base query is reused");
  }

  #[tokio::test]
  async fn transcript_interleaves_checks_and_output() {
    let target = ScriptedTarget::new(true)
      .respond("rpm -q java-17-openjdk", 0, NVR)
      .respond(
        "rpm -q java-17-openjdk-devel",
        1,
        "package java-17-openjdk-devel is not installed",
      );

    let (_, log) = run_ensure(&target, JdkPackage::OpenJdk17).await;

    let checking = log.find("Checking java-17-openjdk installation...").unwrap();
    let nvr_echo = log.find(NVR).unwrap();
    let installing = log
      .find("java-17-openjdk-devel not installed, trying to install via yum ...")
      .unwrap();
    let switching = log.find("Switching to java-17-openjdk").unwrap();
    assert!(checking < nvr_echo && nvr_echo < installing && installing < switching);
  }
}
