//! Boot presentation transitions between the two desktop session modes.
//!
//! The two modes differ only in parameters (splash theme, GRUB timeout,
//! hidden-boot lines), so a single apply routine handles both directions.

use super::QuirkEngine;
use crate::backend::PackageAction;
use crate::config_edit::{self, LineEdits};
use anyhow::Result;
use tracing::info;

/// Installed for the regular desktop session.
pub(super) const HTPC_MARKER_PACKAGE: &str = "gamescope-htpc-common";
/// Installed for the embedded gamescope session.
pub(super) const SESSION_MARKER_PACKAGE: &str = "gamescope-session-common";

/// Script-driven splash themes need the plymouth script plugin.
const PLYMOUTH_SCRIPT_PLUGIN: &str = "plymouth-plugin-script";

const HIDDEN_BOOT_LINES: &[&str] = &[
    "GRUB_TIMEOUT_STYLE='hidden'",
    "GRUB_HIDDEN_TIMEOUT='0'",
    "GRUB_HIDDEN_TIMEOUT_QUIET='true'",
];

/// Whether a mode wants the hidden-boot lines present or absent.
#[derive(Clone, Copy)]
pub(super) enum HiddenLines {
    Add,
    Remove,
}

/// Everything that differs between the two boot modes.
pub(super) struct BootModeParams {
    pub(super) name: &'static str,
    pub(super) splash_theme: &'static str,
    pub(super) timeout_from: &'static str,
    pub(super) timeout_to: &'static str,
    pub(super) hidden_lines: HiddenLines,
}

/// Visible boot menu, firmware splash.
pub(super) const HTPC_MODE: BootModeParams = BootModeParams {
    name: "htpc",
    splash_theme: "bgrt",
    timeout_from: "GRUB_TIMEOUT='0'",
    timeout_to: "GRUB_TIMEOUT='5'",
    hidden_lines: HiddenLines::Remove,
};

/// Hidden boot menu, console-style splash.
pub(super) const SESSION_MODE: BootModeParams = BootModeParams {
    name: "session",
    splash_theme: "steamos",
    timeout_from: "GRUB_TIMEOUT='5'",
    timeout_to: "GRUB_TIMEOUT='0'",
    hidden_lines: HiddenLines::Add,
};

/// Drive the boot presentation to `params`. The splash theme gates the
/// whole transition; once it matches, the mode already took effect on a
/// previous pass. The bootloader config only regenerates when the GRUB
/// defaults actually changed.
pub(super) fn apply(engine: &QuirkEngine<'_>, params: &BootModeParams) -> Result<()> {
    let current = engine.boot.splash_theme().unwrap_or_default();
    if current.contains(params.splash_theme) {
        return Ok(());
    }

    info!(
        "switching boot presentation to {} mode (splash theme {})",
        params.name, params.splash_theme
    );

    if !engine.probe.is_installed(PLYMOUTH_SCRIPT_PLUGIN) {
        engine.backend.mutate(
            &[PLYMOUTH_SCRIPT_PLUGIN.to_string()],
            PackageAction::Install,
        )?;
    }

    engine.boot.set_splash_theme(params.splash_theme)?;
    engine.boot.regenerate_initramfs()?;

    let mut edits = LineEdits::new().substitute(params.timeout_from, params.timeout_to);
    for line in HIDDEN_BOOT_LINES {
        edits = match params.hidden_lines {
            HiddenLines::Add => edits.add_line(*line),
            HiddenLines::Remove => edits.remove_line(*line),
        };
    }

    let changed = config_edit::apply_line_edits(&engine.config.grub_defaults, &edits)?;
    if changed {
        engine.boot.regenerate_bootloader()?;
    }

    Ok(())
}
