//! Engine configuration: every filesystem location the rules touch.
//!
//! Defaults point at the real system locations. Overriding them from a JSON
//! file exists for two reasons: image builds that relocate `/etc/nobara`, and
//! tests, which point the whole engine at a temp directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths and session facts the engine reads at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding kernel images (`vmlinuz-<release>`)
    pub boot_dir: PathBuf,
    /// Installed kernel-module trees, one directory per release
    pub modules_dir: PathBuf,
    /// Shell-sourced `KEY='value'` bootloader defaults file
    pub grub_defaults: PathBuf,
    /// Generated bootloader configuration (grub2-mkconfig output target)
    pub bootloader_config: PathBuf,
    /// Repository definition directory (`*.repo` marker files)
    pub repo_dir: PathBuf,
    /// Handheld-input opt-out marker; content `disabled` skips that rule
    pub handheld_optout: PathBuf,
    /// Fresh-install marker, deleted at the end of every run
    pub fresh_install_marker: PathBuf,
    /// passwd-format file used to enumerate real user accounts
    pub passwd_file: PathBuf,
    /// DKMS state directory (stale driver trees are wiped from here)
    pub dkms_dir: PathBuf,
    /// Value of `XDG_CURRENT_DESKTOP` for the active session
    pub current_desktop: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boot_dir: PathBuf::from("/boot"),
            modules_dir: PathBuf::from("/lib/modules"),
            grub_defaults: PathBuf::from("/etc/default/grub"),
            bootloader_config: PathBuf::from("/boot/grub2/grub.cfg"),
            repo_dir: PathBuf::from("/etc/yum.repos.d"),
            handheld_optout: PathBuf::from("/etc/nobara/handheld_packages/autoupdate.conf"),
            fresh_install_marker: PathBuf::from("/etc/nobara/newinstall"),
            passwd_file: PathBuf::from("/etc/passwd"),
            dkms_dir: PathBuf::from("/var/lib/dkms"),
            current_desktop: env::var("XDG_CURRENT_DESKTOP").unwrap_or_default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration overrides from a JSON file.
    ///
    /// Missing keys fall back to the defaults, so a partial override file
    /// is valid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("boot_dir", &self.boot_dir),
            ("modules_dir", &self.modules_dir),
            ("grub_defaults", &self.grub_defaults),
            ("bootloader_config", &self.bootloader_config),
            ("repo_dir", &self.repo_dir),
            ("handheld_optout", &self.handheld_optout),
            ("fresh_install_marker", &self.fresh_install_marker),
            ("passwd_file", &self.passwd_file),
            ("dkms_dir", &self.dkms_dir),
        ] {
            if path.as_os_str().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
            if !path.is_absolute() {
                anyhow::bail!("{} must be an absolute path, got {:?}", name, path);
            }
        }

        Ok(())
    }

    /// True when the active session is a gamescope (embedded display) session.
    pub fn in_gamescope_session(&self) -> bool {
        self.current_desktop.to_lowercase().contains("gamescope")
    }
}
