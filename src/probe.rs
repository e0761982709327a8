//! Read-only system state probes.
//!
//! Every probe is side-effect free and never errors: a failed underlying
//! command or a missing file is a normal negative answer. Probes are not
//! cached — each call re-queries the system so a mutation made by one rule
//! is visible to every later rule in the same run.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Read-only queries of machine state.
///
/// Implemented by [`HostProbe`] for real systems and by stubs in tests.
pub trait SystemProbe {
    /// Exact-name query against the package database.
    fn is_installed(&self, name: &str) -> bool;

    /// Does the file exist on disk?
    fn file_exists(&self, path: &Path) -> bool;

    /// Does the kernel ring buffer contain this literal substring?
    /// Used for hardware identification (device family markers).
    fn kernel_log_contains(&self, marker: &str) -> bool;

    /// Raw `uname -r` release string; empty if it cannot be read.
    fn running_kernel_version(&self) -> String;

    /// Does the installed version string of `name` contain `needle`?
    fn installed_version_contains(&self, name: &str, needle: &str) -> bool;

    /// One line per installed package: name, epoch:version, source repo.
    /// Feeds the epoch-mismatch and channel-origin rules.
    fn installed_listing(&self) -> Vec<String>;
}

/// Hex SHA-256 digest of a byte slice.
pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Content checksum probe: hex SHA-256 digest of a file, `None` if
/// unreadable. For change detection only, not integrity verification.
pub fn sha256_file(path: &Path) -> Option<String> {
    fs::read(path).ok().map(|bytes| sha256_hex(&bytes))
}

/// Probe implementation backed by the host's rpm/dnf tooling.
pub struct HostProbe;

impl HostProbe {
    /// Run a command and report whether it exited successfully.
    fn command_success(program: &str, args: &[&str]) -> bool {
        Command::new(program)
            .args(args)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Run a command and capture stdout; `None` on spawn failure or
    /// nonzero exit.
    fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program).args(args).output().ok()?;
        if !output.status.success() {
            debug!("probe command {program} {args:?} exited nonzero");
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl SystemProbe for HostProbe {
    fn is_installed(&self, name: &str) -> bool {
        Self::command_success("rpm", &["-q", name])
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn kernel_log_contains(&self, marker: &str) -> bool {
        Self::command_stdout("dmesg", &[])
            .map(|log| log.contains(marker))
            .unwrap_or(false)
    }

    fn running_kernel_version(&self) -> String {
        Self::command_stdout("uname", &["-r"])
            .map(|out| out.trim().to_string())
            .unwrap_or_default()
    }

    fn installed_version_contains(&self, name: &str, needle: &str) -> bool {
        Self::command_stdout("rpm", &["-q", name])
            .map(|out| out.contains(needle))
            .unwrap_or(false)
    }

    fn installed_listing(&self) -> Vec<String> {
        Self::command_stdout("dnf4", &["list", "installed"])
            .map(|out| out.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
