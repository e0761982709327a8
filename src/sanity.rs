//! Pre-flight sanity checks for the runtime environment.
//!
//! Verifies root privileges and the external tooling the rules shell out to
//! before any rule runs. A failed check produces a clear message on stderr
//! instead of a mid-run mutation error.

use std::process::Command;
use tracing::debug;

/// Result of environment verification
#[derive(Debug)]
pub struct SanityCheckResult {
    pub missing_binaries: Vec<String>,
    pub is_root: bool,
}

impl SanityCheckResult {
    /// Returns true if all checks passed
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty() && self.is_root
    }
}

/// Binaries every remediation pass needs
const REQUIRED_BINARIES: &[&str] = &[
    "rpm",   // package database queries and --nodeps removal
    "dnf4",  // pending-update check, installs, removals, refresh
    "uname", // running kernel release
    "dmesg", // hardware identification markers
];

/// Binaries only some rules need (warn if missing but don't fail)
const OPTIONAL_BINARIES: &[&str] = &[
    "dracut",                     // initramfs regeneration
    "grub2-mkconfig",             // bootloader config rebuild
    "plymouth-set-default-theme", // splash theme switch
    "systemctl",                  // deprecated unit disablement
];

/// Check if a binary is available in PATH
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Check if running as root (EUID 0)
fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Perform all sanity checks and return the result
pub fn verify_environment() -> SanityCheckResult {
    let mut missing = Vec::new();

    for binary in REQUIRED_BINARIES {
        if !binary_exists(binary) {
            missing.push((*binary).to_string());
        }
    }

    for binary in OPTIONAL_BINARIES {
        if !binary_exists(binary) {
            debug!("optional binary not found: {binary}");
        }
    }

    SanityCheckResult {
        missing_binaries: missing,
        is_root: is_running_as_root(),
    }
}

/// Print a clear error message to stderr. The caller decides the exit.
pub fn print_failure(result: &SanityCheckResult) {
    eprintln!();
    eprintln!("nobara-quirks: pre-flight check failed");
    eprintln!();

    if !result.is_root {
        eprintln!("  Root privileges required.");
        eprintln!("  Remediation removes and installs packages and rewrites boot configuration.");
        eprintln!("  Run with sudo or as root.");
        eprintln!();
    }

    if !result.missing_binaries.is_empty() {
        eprintln!("  Missing required binaries:");
        for binary in &result.missing_binaries {
            eprintln!("    - {binary}");
        }
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_exists_for_shell() {
        // `sh` exists on any system these tests run on.
        assert!(binary_exists("sh"));
        assert!(!binary_exists("definitely-not-a-real-binary-xyz"));
    }

    #[test]
    fn test_result_requires_both_checks() {
        let result = SanityCheckResult {
            missing_binaries: vec![],
            is_root: false,
        };
        assert!(!result.is_ok());

        let result = SanityCheckResult {
            missing_binaries: vec!["dnf4".to_string()],
            is_root: true,
        };
        assert!(!result.is_ok());

        let result = SanityCheckResult {
            missing_binaries: vec![],
            is_root: true,
        };
        assert!(result.is_ok());
    }
}
