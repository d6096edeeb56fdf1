//! The command execution seam between the provisioner and a machine.

use std::io;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
  /// Exit code, or `None` when the process was terminated by a signal.
  pub code: Option<i32>,
  /// Combined stdout and stderr text.
  pub output: String,
}

impl ExecOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// A machine commands can be issued against.
///
/// The provisioner borrows a target for the duration of one call.
/// Implementations may run commands on the local host, over a remote
/// transport, or record them for tests.
#[async_trait]
pub trait Target: Send + Sync {
  /// Run `argv` to completion and capture its output. `argv[0]` is the
  /// program; no shell is involved.
  async fn run(&self, argv: &[&str]) -> io::Result<ExecOutput>;

  /// Whether `path` exists on the target.
  async fn file_exists(&self, path: &str) -> io::Result<bool>;
}

/// Runs commands directly on the current host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTarget;

impl LocalTarget {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl Target for LocalTarget {
  async fn run(&self, argv: &[&str]) -> io::Result<ExecOutput> {
    let (program, args) = argv
      .split_first()
      .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty argv"))?;

    debug!(cmd = %argv.join(" "), "spawning process");

    let out = Command::new(program).args(args).output().await?;

    let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
    if !out.stderr.is_empty() {
      output.push_str(&String::from_utf8_lossy(&out.stderr));
    }

    Ok(ExecOutput {
      code: out.status.code(),
      output,
    })
  }

  async fn file_exists(&self, path: &str) -> io::Result<bool> {
    tokio::fs::try_exists(path).await
  }
}
