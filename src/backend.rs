//! Package-manager backend interface.
//!
//! The engine only needs a query of pending updates and a handful of
//! synchronous mutations. Every mutation is completion-blocking: the engine
//! never evaluates the next rule while one is in flight. An unexpected
//! nonzero exit from a mutation is fatal and aborts the whole run; there is
//! no rollback and no retry.

use crate::error::QuirkError;
use anyhow::Result;
use std::fmt;
use std::process::Command;
use tracing::{debug, info};

/// The three ordinary package mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    Install,
    Remove,
    Upgrade,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Remove => write!(f, "remove"),
            Self::Upgrade => write!(f, "upgrade"),
        }
    }
}

/// Synchronous package query and mutation collaborator.
pub trait PackageBackend {
    /// Package names with an available update. Invoked once per run.
    fn pending_updates(&self) -> Result<Vec<String>>;

    /// Install, remove, or upgrade the named set. Blocks until done.
    fn mutate(&self, names: &[String], action: PackageAction) -> Result<()>;

    /// Remove with dependency checks disabled (`rpm -e --nodeps`).
    /// Callers pass only names they have probed as installed.
    fn remove_without_deps(&self, names: &[String]) -> Result<()>;

    /// Install with forced metadata refresh. Used when the packages being
    /// replaced came from metadata that is itself suspect, so the
    /// replacements must not resolve against the cached copy.
    fn install_refreshed(&self, names: &[String]) -> Result<()>;

    /// Update the named set immediately with forced metadata refresh,
    /// bypassing the normal update flow. Terminal rules use this so stale
    /// repository metadata or signing keys are never trusted by later rules.
    fn refresh(&self, names: &[String]) -> Result<()>;
}

/// Backend shelling out to dnf/rpm.
pub struct DnfBackend {
    pub dry_run: bool,
}

impl DnfBackend {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Run a mutation command, treating any nonzero exit as fatal.
    fn run_checked(&self, program: &str, args: &[String], what: &str, names: &[String]) -> Result<()> {
        let rendered = format!("{} {}", program, args.join(" "));
        if self.dry_run {
            info!("dry-run: would execute `{rendered}`");
            return Ok(());
        }

        debug!("executing `{rendered}`");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| QuirkError::command(rendered.clone(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(QuirkError::mutation(
                what,
                names,
                format!("{} ({})", stderr.trim(), output.status),
            )
            .into());
        }

        Ok(())
    }
}

/// Suffixes `dnf check-update` appends to package names.
const ARCH_SUFFIXES: &[&str] = &[".x86_64", ".i686", ".noarch", ".aarch64", ".src"];

/// Parse `dnf check-update` output into bare package names.
pub(crate) fn parse_check_update(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let first = line.split_whitespace().next()?;
            // Heading lines and obsolescence notes have no arch suffix.
            let (name, _) = ARCH_SUFFIXES
                .iter()
                .find_map(|s| first.strip_suffix(s).map(|n| (n, s)))?;
            Some(name.to_string())
        })
        .collect()
}

impl PackageBackend for DnfBackend {
    fn pending_updates(&self) -> Result<Vec<String>> {
        let output = Command::new("dnf4")
            .args(["check-update", "-q"])
            .output()
            .map_err(|e| QuirkError::command("dnf4 check-update -q", e.to_string()))?;

        // dnf exits 100 when updates are available, 0 when none are.
        let code = output.status.code().unwrap_or(-1);
        if code != 0 && code != 100 {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(
                QuirkError::command("dnf4 check-update -q", stderr.trim().to_string()).into(),
            );
        }

        let pending = parse_check_update(&String::from_utf8_lossy(&output.stdout));
        info!("{} packages have pending updates", pending.len());
        Ok(pending)
    }

    fn mutate(&self, names: &[String], action: PackageAction) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        info!("package {action}: {}", names.join(", "));

        let mut args: Vec<String> = vec![action.to_string(), "-y".to_string()];
        args.extend(names.iter().cloned());
        self.run_checked("dnf4", &args, &action.to_string(), names)
    }

    fn remove_without_deps(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        info!("package remove (nodeps): {}", names.join(", "));

        let mut args: Vec<String> = vec!["-e".to_string(), "--nodeps".to_string()];
        args.extend(names.iter().cloned());
        self.run_checked("rpm", &args, "remove --nodeps", names)
    }

    fn install_refreshed(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        info!("package install (refresh): {}", names.join(", "));

        let mut args: Vec<String> = vec![
            "install".to_string(),
            "-y".to_string(),
            "--refresh".to_string(),
        ];
        args.extend(names.iter().cloned());
        self.run_checked("dnf4", &args, "install --refresh", names)
    }

    fn refresh(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        info!("refreshing: {}", names.join(", "));

        let mut args: Vec<String> = vec![
            "update".to_string(),
            "-y".to_string(),
            "--refresh".to_string(),
        ];
        args.extend(names.iter().cloned());
        args.push("--nogpgcheck".to_string());
        self.run_checked("dnf4", &args, "refresh", names)
    }
}
