//! jdkup-core: native OpenJDK provisioning for RPM-based hosts.
//!
//! Ensures a chosen OpenJDK package and its -devel variant are installed on
//! a target machine via yum, then points the system-wide `java` alternative
//! at the new installation. Commands are issued through the [`Target`]
//! capability trait, so real hosts and test doubles are interchangeable.
//!
//! yum and alternatives are run via sudo, so the executing account needs
//! passwordless elevated rights for exactly those commands on the target
//! (including switching off the tty requirement). Example sudoers setup:
//!
//! ```text
//! #Defaults    requiretty
//! User_Alias PROVISION = builder
//! Cmnd_Alias OPENJDK = /usr/sbin/alternatives, /usr/bin/yum
//! PROVISION ALL = NOPASSWD: OPENJDK
//! ```

mod error;
mod package;
mod provision;
mod target;
mod transcript;

pub use error::{ProvisionError, UnknownPackage};
pub use package::JdkPackage;
pub use provision::{JAVA_BIN_DIR, JVM_HOME_PREFIX, Provisioner, REDHAT_RELEASE};
pub use target::{ExecOutput, LocalTarget, Target};
pub use transcript::{ERROR_MARKER, Transcript};

/// Result type for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;
