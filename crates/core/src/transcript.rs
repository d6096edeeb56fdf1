//! The ordered, user-visible provisioning transcript.

use std::io::Write;

/// Marker prefixed to every error annotation, kept grep-compatible with the
/// console tooling that scans provisioning logs.
pub const ERROR_MARKER: &str = "[OpenJDK ERROR]";

/// The single log stream shared with the invoking workflow.
///
/// Checks, relayed command output and error annotations appear interleaved
/// in execution order. Write failures are swallowed: the transcript must
/// never abort provisioning.
pub struct Transcript<W: Write> {
  out: W,
}

impl<W: Write> Transcript<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  /// Write one plain line.
  pub fn line(&mut self, msg: &str) {
    let _ = writeln!(self.out, "{}", msg);
  }

  /// Relay captured command output verbatim, terminating the final line.
  pub fn command_output(&mut self, output: &str) {
    if output.is_empty() {
      return;
    }
    let _ = self.out.write_all(output.as_bytes());
    if !output.ends_with('\n') {
      let _ = self.out.write_all(b"\n");
    }
  }

  /// Write an error annotation, prefixed with [`ERROR_MARKER`].
  pub fn error(&mut self, msg: &str) {
    let _ = writeln!(self.out, "{} {}", ERROR_MARKER, msg);
  }

  /// Consume the transcript and return the underlying writer.
  pub fn into_inner(self) -> W {
    self.out
  }
}
