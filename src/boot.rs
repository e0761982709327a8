//! Boot-stack collaborator: splash theme, initramfs, bootloader config.
//!
//! Reading the active theme is a probe (failure is a negative answer).
//! Everything else here is a mutation: theme switch and the two
//! regeneration commands are strict, a nonzero exit aborts the run.
//! Unit disablement is best-effort, matching the tooling it fronts.

use crate::config::EngineConfig;
use crate::error::QuirkError;
use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info, warn};

/// Boot splash and bootloader regeneration commands.
pub trait BootTools {
    /// Active default splash theme name, `None` if it cannot be read.
    fn splash_theme(&self) -> Option<String>;

    /// Switch the default splash theme.
    fn set_splash_theme(&self, theme: &str) -> Result<()>;

    /// Rebuild the initial RAM environment for all installed kernels.
    /// Expensive, and strict: failure aborts the run.
    fn regenerate_initramfs(&self) -> Result<()>;

    /// Rebuild the bootloader configuration from its sources. Expensive;
    /// callers gate this behind config-file change detection.
    fn regenerate_bootloader(&self) -> Result<()>;

    /// Disable (and stop) a systemd unit. Best-effort.
    fn disable_unit(&self, unit: &str) -> Result<()>;
}

/// Implementation shelling out to plymouth, dracut, and grub2-mkconfig.
pub struct HostBootTools {
    pub dry_run: bool,
    bootloader_config: PathBuf,
}

impl HostBootTools {
    pub fn new(config: &EngineConfig, dry_run: bool) -> Self {
        Self {
            dry_run,
            bootloader_config: config.bootloader_config.clone(),
        }
    }

    fn run_strict(&self, program: &str, args: &[&str]) -> Result<()> {
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
            return Err(QuirkError::command(
                rendered,
                format!("{} ({})", stderr.trim(), output.status),
            )
            .into());
        }

        Ok(())
    }
}

impl BootTools for HostBootTools {
    fn splash_theme(&self) -> Option<String> {
        let output = Command::new("plymouth-set-default-theme").output().ok()?;
        if !output.status.success() {
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn set_splash_theme(&self, theme: &str) -> Result<()> {
        info!("setting splash theme to {theme}");
        self.run_strict("plymouth-set-default-theme", &[theme])
    }

    fn regenerate_initramfs(&self) -> Result<()> {
        info!("regenerating initramfs for all installed kernels");
        self.run_strict("dracut", &["-f", "--regenerate-all"])
    }

    fn regenerate_bootloader(&self) -> Result<()> {
        let target = self.bootloader_config.display().to_string();
        info!("regenerating bootloader configuration at {target}");
        self.run_strict("/usr/sbin/grub2-mkconfig", &["-o", &target])
    }

    fn disable_unit(&self, unit: &str) -> Result<()> {
        if self.dry_run {
            info!("dry-run: would disable unit {unit}");
            return Ok(());
        }

        // The unit may already be gone along with its package.
        let result = Command::new("systemctl")
            .args(["disable", "--now", unit])
            .output();
        match result {
            Ok(output) if output.status.success() => info!("disabled unit {unit}"),
            Ok(output) => warn!(
                "could not disable unit {unit}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) => warn!("could not run systemctl for {unit}: {e}"),
        }
        Ok(())
    }
}
