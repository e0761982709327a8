//! Rule bodies for the quirk catalogue.
//!
//! Conventions shared by every rule:
//! - probes answer false/empty instead of erroring, so a rule body only
//!   returns `Err` from a mutation;
//! - a rule that finds nothing to do returns `RuleOutcome::none()` without
//!   touching the system, which is what makes a rerun after convergence a
//!   pure no-op.

use super::boot_mode::{self, HTPC_MODE, SESSION_MODE};
use super::{QuirkEngine, RuleOutcome, RunState};
use crate::backend::PackageAction;
use crate::flags::ResultFlags;
use crate::users;
use anyhow::{Context, Result};
use std::fs;
use tracing::{info, warn};

/// Repository and signing-key packages that must never be applied through
/// the normal update flow.
const REPO_CRITICAL_PACKAGES: &[&str] = &[
    "fedora-gpg-keys",
    "nobara-gpg-keys",
    "fedora-repos",
    "nobara-repos",
];

/// The package distributing this engine.
const SELF_PACKAGE: &str = "nobara-updater";

/// Extra-repository marker files and the packages that own them.
const EXTRA_REPO_MARKERS: &[(&str, &str)] = &[
    ("rpmfusion-free.repo", "rpmfusion-free-release"),
    ("rpmfusion-free-updates.repo", "rpmfusion-free-release"),
    ("rpmfusion-nonfree.repo", "rpmfusion-nonfree-release"),
    ("rpmfusion-nonfree-updates.repo", "rpmfusion-nonfree-release"),
];

/// Deprecated controller-input handlers, superseded by inputplumber.
/// HandyGCCS is handled separately because its unit must be stopped first.
const DEPRECATED_INPUT_HANDLERS: &[&str] = &["lgcd", "rogue-enemy", "hhd", "hhd-ui", "adjustor"];
const HANDYGCCS_PACKAGE: &str = "HandyGCCS";
const HANDYGCCS_UNIT: &str = "handycon";
const CONTROLLER_PACKAGE: &str = "inputplumber";

/// Kernel-log device family markers.
const ROG_ALLY_MARKER: &str = "ROG Ally";
const STEAMDECK_MARKERS: &[&str] = &["Galileo", "Jupiter"];

/// Firmware now shipped upstream; remove our old package when present.
const ROG_ALLY_FIRMWARE: &str = "rogally-firmware";

/// Steam Deck hardware support stack.
const STEAMDECK_PACKAGES: &[&str] = &[
    "jupiter-hw-support",
    "jupiter-fan-control",
    "steamdeck-dsp",
    "steamdeck-firmware",
];

/// Known-problematic packages, removed whenever found installed.
const BLOCKED_PACKAGES: &[&str] = &[
    "unrar",
    "qt5-qtwebengine-freeworld",
    "qt6-qtwebengine-freeworld",
    "qgnomeplatform-qt6",
    "qgnomeplatform-qt5",
    "musescore",
    "okular5-libs",
    "fedora-workstation-repositories",
    "mesa-demos",
    "libheif-freeworld.x86_64",
    "libheif-freeworld.i686",
];

/// Removed with dependency checks disabled; their reverse dependencies
/// are kept.
const BLOCKED_PACKAGES_NODEPS: &[&str] = &[
    "plasma-workspace-geolocation",
    "plasma-workspace-geolocation-libs",
];

/// Desktop-shell core package whose updates invalidate per-user QML caches.
const SHELL_CORE_PACKAGE: &str = "plasma-workspace";
const QML_CACHE_SUBDIR: &str = ".cache/plasmashell/qmlcache";

/// Package specs removed when the nvidia epoch mismatch is detected.
const NVIDIA_REMOVE_SPECS: &[&str] = &["nvidia*", "kmod-nvidia*", "akmod-nvidia", "dkms-nvidia"];

/// Pinned replacement set matching the upstream packaging source.
const NVIDIA_REPLACEMENT: &[&str] = &[
    "akmod-nvidia",
    "nvidia-driver",
    "libnvidia-ml",
    "libnvidia-ml.i686",
    "libnvidia-fbc",
    "nvidia-driver-cuda",
    "nvidia-driver-cuda-libs",
    "nvidia-driver-cuda-libs.i686",
    "nvidia-driver-libs",
    "nvidia-driver-libs.i686",
    "nvidia-kmod-common",
    "nvidia-libXNVCtrl",
    "nvidia-modprobe",
    "nvidia-persistenced",
    "nvidia-settings",
    "nvidia-xconfig",
    "nvidia-vaapi-driver",
    "nvidia-gpu-firmware",
    "libnvidia-cfg",
];

/// Repository channel marking the superseded ROCm packaging.
const ROCM_LEGACY_CHANNEL: &str = "@nobara-rocm-official";

/// Legacy ROCm set replaced by the upstream meta-package.
const ROCM_LEGACY_PACKAGES: &[&str] = &[
    "comgr.x86_64",
    "hip-devel.x86_64",
    "hip-runtime-amd.x86_64",
    "hipcc.x86_64",
    "hsa-rocr.x86_64",
    "hsa-rocr-devel.x86_64",
    "hsakmt-roct-devel.x86_64",
    "openmp-extras-runtime.x86_64",
    "rocm-core.x86_64",
    "rocm-device-libs.x86_64",
    "rocm-hip-runtime.x86_64",
    "rocm-language-runtime.x86_64",
    "rocm-llvm.x86_64",
    "rocm-opencl.x86_64",
    "rocm-opencl-icd-loader.x86_64",
    "rocm-opencl-runtime.x86_64",
    "rocm-smi-lib.x86_64",
    "rocminfo.x86_64",
    "rocprofiler-register.x86_64",
    "rocm-meta",
];
const ROCM_META_PACKAGE: &str = "rocm-meta";

/// The mesa family that must be uniformly plain or uniformly -freeworld.
const MESA_VARIANT_FAMILY: &[&str] =
    &["mesa-libgallium", "mesa-va-drivers", "mesa-vdpau-drivers"];
const FREEWORLD_SUFFIX: &str = "-freeworld";

const VULKAN_DRIVER_PACKAGE: &str = "mesa-vulkan-drivers";
/// Both arches ship on a multilib install and must move together; the
/// bare name is ambiguous to rpm once both are present.
const VULKAN_DRIVER_PACKAGES: &[&str] =
    &["mesa-vulkan-drivers.x86_64", "mesa-vulkan-drivers.i686"];

/// Kernel build markers and the forced migration target.
const KERNEL_DEPRECATED_MARKER: &str = "fsync";
const KERNEL_CHANNEL_MARKER: &str = "nobara";
const KERNEL_TARGET_RELEASE: &str = "6.12.11-204.nobara.fc41.x86_64";

/// Restricted codec stack: all of these should be present.
const MEDIA_RESTRICTED_PACKAGES: &[&str] = &[
    "x264-libs.x86_64",
    "x264-libs.i686",
    "x265-libs.x86_64",
    "x265-libs.i686",
    "libavcodec-freeworld.x86_64",
    "libavcodec-freeworld.i686",
    "openh264.x86_64",
    "openh264.i686",
    "mesa-va-drivers-freeworld.x86_64",
    "mesa-vdpau-drivers-freeworld.x86_64",
    "gstreamer1-plugins-bad-free-extras.x86_64",
    "gstreamer1-plugins-bad-free-extras.i686",
    "mozilla-openh264.x86_64",
];

/// Free codec stand-ins: all of these should be absent once the restricted
/// stack is in place.
const MEDIA_FREE_PACKAGES: &[&str] = &[
    "ffmpeg-libs.x86_64",
    "ffmpeg-libs.i686",
    "x264.x86_64",
    "x265.x86_64",
    "noopenh264.x86_64",
    "noopenh264.i686",
    "libavcodec-free.x86_64",
    "libavcodec-free.i686",
    "mesa-va-drivers.x86_64",
    "mesa-vdpau-drivers.x86_64",
];

const GAMESCOPE_COMPONENT_MARKER: &str = "gamescope";

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Refresh repository and signing-key packages before anything else trusts
/// repository metadata. Terminal: no later rule runs this cycle.
pub(super) fn repo_refresh(
    engine: &QuirkEngine<'_>,
    state: &mut RunState,
) -> Result<RuleOutcome> {
    let critical: Vec<String> = state
        .pending
        .iter()
        .filter(|name| REPO_CRITICAL_PACKAGES.contains(&name.as_str()))
        .cloned()
        .collect();

    if critical.is_empty() {
        return Ok(RuleOutcome::none());
    }

    info!(
        "updates for repository packages detected: {}, updating these first",
        critical.join(", ")
    );
    engine.backend.refresh(&critical)?;
    state
        .pending
        .retain(|name| !REPO_CRITICAL_PACKAGES.contains(&name.as_str()));

    Ok(RuleOutcome::halt(ResultFlags::refresh()))
}

/// Update the engine's own package before making decisions with logic that
/// is about to be replaced. Terminal.
pub(super) fn self_update(engine: &QuirkEngine<'_>, state: &mut RunState) -> Result<RuleOutcome> {
    if !state.pending.iter().any(|name| name == SELF_PACKAGE) {
        return Ok(RuleOutcome::none());
    }

    info!("an update for the updater itself is available, updating self first");
    engine.backend.refresh(&[SELF_PACKAGE.to_string()])?;
    state.pending.retain(|name| name != SELF_PACKAGE);

    Ok(RuleOutcome::halt(ResultFlags::refresh()))
}

/// Delete module trees for kernel releases with no image left in the boot
/// area. Rescue images don't count as a release.
pub(super) fn stale_kernel_modules(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    let Ok(boot_entries) = fs::read_dir(&engine.config.boot_dir) else {
        return Ok(RuleOutcome::none());
    };

    let releases: Vec<String> = boot_entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.contains("rescue") {
                return None;
            }
            name.strip_prefix("vmlinuz-").map(str::to_string)
        })
        .collect();

    let Ok(module_entries) = fs::read_dir(&engine.config.modules_dir) else {
        return Ok(RuleOutcome::none());
    };

    for entry in module_entries.flatten() {
        let release = entry.file_name().to_string_lossy().to_string();
        if releases.iter().any(|r| *r == release) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            info!("removing stale kernel module tree {}", path.display());
            fs::remove_dir_all(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }

    Ok(RuleOutcome::none())
}

/// Regenerate missing extra-repository definitions by reinstalling (or
/// installing) their enabling packages.
pub(super) fn extra_repos(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    let mut refreshed = false;

    for (marker, package) in EXTRA_REPO_MARKERS {
        let marker_path = engine.config.repo_dir.join(marker);
        if engine.probe.file_exists(&marker_path) {
            continue;
        }

        let package = vec![(*package).to_string()];
        if engine.probe.is_installed(&package[0]) {
            info!("{marker} missing but {} installed, reinstalling", package[0]);
            engine.backend.mutate(&package, PackageAction::Remove)?;
            engine.backend.mutate(&package, PackageAction::Install)?;
        } else {
            info!("{marker} missing, installing {}", package[0]);
            engine.backend.mutate(&package, PackageAction::Install)?;
        }
        refreshed = true;
    }

    if refreshed {
        Ok(RuleOutcome::flags(ResultFlags::refresh()))
    } else {
        Ok(RuleOutcome::none())
    }
}

/// A pending kernel or out-of-tree module update needs a module rebuild
/// and a reboot once applied.
pub(super) fn kernel_update_pending(
    _engine: &QuirkEngine<'_>,
    state: &mut RunState,
) -> Result<RuleOutcome> {
    if state.pending_contains("kernel") || state.pending_contains("akmod") {
        Ok(RuleOutcome::flags(ResultFlags::kernel()))
    } else {
        Ok(RuleOutcome::none())
    }
}

/// Compositor updates want a reboot rather than a live restart.
pub(super) fn desktop_shell_pending(
    _engine: &QuirkEngine<'_>,
    state: &mut RunState,
) -> Result<RuleOutcome> {
    if state.pending_contains("kwin") || state.pending_contains("mutter") {
        Ok(RuleOutcome::flags(ResultFlags::reboot()))
    } else {
        Ok(RuleOutcome::none())
    }
}

/// Converge controller-input handling on inputplumber and reconcile
/// handheld firmware with the detected device family.
pub(super) fn handheld_input(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    if let Ok(content) = fs::read_to_string(&engine.config.handheld_optout) {
        if content.trim() == "disabled" {
            info!("handheld package management disabled by opt-out marker");
            return Ok(RuleOutcome::none());
        }
    }

    let mut remove = Vec::new();
    let mut install = Vec::new();

    if engine.probe.is_installed(HANDYGCCS_PACKAGE) {
        engine.boot.disable_unit(HANDYGCCS_UNIT)?;
        remove.push(HANDYGCCS_PACKAGE.to_string());
    }
    for handler in DEPRECATED_INPUT_HANDLERS {
        if engine.probe.is_installed(handler) {
            remove.push((*handler).to_string());
        }
    }

    if !engine.probe.is_installed(CONTROLLER_PACKAGE) {
        install.push(CONTROLLER_PACKAGE.to_string());
    }

    if engine.probe.kernel_log_contains(ROG_ALLY_MARKER)
        && engine.probe.is_installed(ROG_ALLY_FIRMWARE)
    {
        // Upstreamed; the distro package now conflicts.
        info!("found ROG Ally, removing superseded firmware package");
        remove.push(ROG_ALLY_FIRMWARE.to_string());
    }

    if STEAMDECK_MARKERS
        .iter()
        .any(|marker| engine.probe.kernel_log_contains(marker))
    {
        for package in STEAMDECK_PACKAGES {
            if !engine.probe.is_installed(package) {
                install.push((*package).to_string());
            }
        }
        if !install.is_empty() {
            info!("found Steam Deck hardware, installing support packages");
        }
    }

    if !remove.is_empty() {
        engine.backend.mutate(&remove, PackageAction::Remove)?;
    }
    if !install.is_empty() {
        engine.backend.mutate(&install, PackageAction::Install)?;
    }

    Ok(RuleOutcome::none())
}

/// Reconcile boot presentation with the installed session mode. Only acts
/// when exactly one of the two mode marker packages is installed.
pub(super) fn desktop_mode(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    let htpc = engine.probe.is_installed(boot_mode::HTPC_MARKER_PACKAGE);
    let session = engine.probe.is_installed(boot_mode::SESSION_MARKER_PACKAGE);

    match (htpc, session) {
        (true, false) => boot_mode::apply(engine, &HTPC_MODE)?,
        (false, true) => boot_mode::apply(engine, &SESSION_MODE)?,
        // Both or neither installed: no mode can be inferred.
        _ => {}
    }

    Ok(RuleOutcome::none())
}

/// Remove packages from the fixed block lists.
pub(super) fn block_list(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    let found: Vec<String> = BLOCKED_PACKAGES
        .iter()
        .filter(|package| engine.probe.is_installed(package))
        .map(|package| (*package).to_string())
        .collect();
    if !found.is_empty() {
        info!("found problematic packages, removing: {}", found.join(", "));
        engine.backend.mutate(&found, PackageAction::Remove)?;
    }

    let found_nodeps: Vec<String> = BLOCKED_PACKAGES_NODEPS
        .iter()
        .filter(|package| engine.probe.is_installed(package))
        .map(|package| (*package).to_string())
        .collect();
    if !found_nodeps.is_empty() {
        engine.backend.remove_without_deps(&found_nodeps)?;
    }

    Ok(RuleOutcome::none())
}

/// A pending desktop-shell update invalidates every user's compiled QML
/// cache. Cache removal is housekeeping, not a mutation the run depends
/// on, so failures are logged and skipped.
pub(super) fn shell_cache(engine: &QuirkEngine<'_>, state: &mut RunState) -> Result<RuleOutcome> {
    if !state.pending_contains(SHELL_CORE_PACKAGE) {
        return Ok(RuleOutcome::none());
    }

    for home in users::home_directories(&engine.config.passwd_file) {
        let cache_dir = home.join(QML_CACHE_SUBDIR);
        if !cache_dir.exists() {
            continue;
        }
        match fs::remove_dir_all(&cache_dir) {
            Ok(()) => info!("deleted {}", cache_dir.display()),
            Err(e) => warn!("failed to delete {}: {e}", cache_dir.display()),
        }
    }

    Ok(RuleOutcome::none())
}

/// Replace nvidia packages carrying the wrong epoch with the pinned set
/// matching the upstream packaging source.
pub(super) fn nvidia_epoch(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    let wrong_epoch = engine
        .probe
        .installed_listing()
        .iter()
        .any(|line| line.contains("nvidia") && line.contains("4:"));
    if !wrong_epoch {
        return Ok(RuleOutcome::none());
    }

    info!("nvidia epoch mismatch detected, swapping driver family");

    // chromium is dragged out with the driver removal; put it back after.
    let had_chromium = engine.probe.is_installed("chromium");

    engine
        .backend
        .mutate(&owned(NVIDIA_REMOVE_SPECS), PackageAction::Remove)?;

    if let Ok(entries) = fs::read_dir(&engine.config.dkms_dir) {
        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().starts_with("nvidia") {
                let path = entry.path();
                fs::remove_dir_all(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
            }
        }
    }

    let mut install = owned(NVIDIA_REPLACEMENT);
    if had_chromium {
        install.push("chromium".to_string());
    }
    // The removed packages came from the bad metadata; resolve the
    // replacements against a fresh copy.
    engine.backend.install_refreshed(&install)?;

    Ok(RuleOutcome::flags(ResultFlags::kernel()))
}

/// Swap ROCm packages installed from the superseded channel for the
/// upstream meta-package.
pub(super) fn rocm_channel(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    let legacy = engine
        .probe
        .installed_listing()
        .iter()
        .any(|line| line.contains(ROCM_LEGACY_CHANNEL));
    if !legacy {
        return Ok(RuleOutcome::none());
    }

    info!("ROCm packages from the superseded channel detected, swapping to upstream");
    engine
        .backend
        .mutate(&owned(ROCM_LEGACY_PACKAGES), PackageAction::Remove)?;
    engine
        .backend
        .mutate(&[ROCM_META_PACKAGE.to_string()], PackageAction::Install)?;

    Ok(RuleOutcome::none())
}

/// The mesa driver family must be uniformly plain or uniformly -freeworld.
/// A mixed set converges to the majority variant (tie goes to plain) in
/// one uninstall+reinstall cycle. The only consistency rule that repairs
/// instead of flagging.
pub(super) fn mesa_variants(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    let plain: Vec<String> = MESA_VARIANT_FAMILY
        .iter()
        .filter(|package| engine.probe.is_installed(package))
        .map(|package| (*package).to_string())
        .collect();
    let enhanced: Vec<String> = MESA_VARIANT_FAMILY
        .iter()
        .map(|package| format!("{package}{FREEWORLD_SUFFIX}"))
        .filter(|package| engine.probe.is_installed(package))
        .collect();

    // Pure sets (including all-absent) are already consistent.
    if plain.is_empty() || enhanced.is_empty() {
        return Ok(RuleOutcome::none());
    }

    let to_enhanced = enhanced.len() > plain.len();
    let winners: Vec<String> = MESA_VARIANT_FAMILY
        .iter()
        .map(|package| {
            if to_enhanced {
                format!("{package}{FREEWORLD_SUFFIX}")
            } else {
                (*package).to_string()
            }
        })
        .collect();

    info!(
        "mixed mesa variants detected ({} plain, {} freeworld), converging to {}",
        plain.len(),
        enhanced.len(),
        if to_enhanced { "freeworld" } else { "plain" }
    );

    let mut installed: Vec<String> = plain;
    installed.extend(enhanced);
    engine.backend.remove_without_deps(&installed)?;
    engine.backend.mutate(&winners, PackageAction::Install)?;

    Ok(RuleOutcome::none())
}

/// A snapshot (git) build of the vulkan drivers left behind by an old
/// compose gets swapped for the released build.
pub(super) fn vulkan_rebuild(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    if !engine
        .probe
        .installed_version_contains(VULKAN_DRIVER_PACKAGE, "git")
    {
        return Ok(RuleOutcome::none());
    }

    info!("snapshot build of {VULKAN_DRIVER_PACKAGE} detected, reinstalling released build");
    let installed: Vec<String> = VULKAN_DRIVER_PACKAGES
        .iter()
        .filter(|package| engine.probe.is_installed(package))
        .map(|package| (*package).to_string())
        .collect();
    engine.backend.remove_without_deps(&installed)?;
    engine
        .backend
        .mutate(&owned(VULKAN_DRIVER_PACKAGES), PackageAction::Install)?;

    Ok(RuleOutcome::none())
}

/// Migrate off the deprecated kernel channel and pull the pinned target
/// release forward where needed.
pub(super) fn kernel_channel(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    let running = engine.probe.running_kernel_version();
    let mut flags = ResultFlags::none();

    if running.contains(KERNEL_DEPRECATED_MARKER) {
        info!("running deprecated {KERNEL_DEPRECATED_MARKER} kernel, migrating channel");
        engine
            .backend
            .mutate(&["kernel-uki-virt*".to_string()], PackageAction::Remove)?;
        engine.backend.mutate(
            &["kernel".to_string(), "kernel-devel".to_string()],
            PackageAction::Upgrade,
        )?;
        flags.merge(ResultFlags::kernel());
    }

    if running.contains(KERNEL_CHANNEL_MARKER) {
        // Plain lexical ordering on the release string, matching the
        // behavior this replaces; see DESIGN.md for the caveat.
        if running.as_str() < KERNEL_TARGET_RELEASE {
            let target = format!("kernel-{KERNEL_TARGET_RELEASE}");
            if !engine.probe.is_installed(&target) {
                info!("installing pinned kernel {KERNEL_TARGET_RELEASE}");
                engine.backend.mutate(
                    &[target, format!("kernel-devel-{KERNEL_TARGET_RELEASE}")],
                    PackageAction::Install,
                )?;
                flags.merge(ResultFlags::kernel());
            }
        } else {
            info!("current kernel ({running}) is already up to date");
        }
    }

    Ok(RuleOutcome::flags(flags))
}

/// Flag a partially present codec stack for the caller to resolve with a
/// full refresh. Never mutates, and doesn't apply inside a gamescope
/// session where the codec stack is fixed by the image.
pub(super) fn media_codecs(engine: &QuirkEngine<'_>, _state: &mut RunState) -> Result<RuleOutcome> {
    if engine.config.in_gamescope_session() {
        return Ok(RuleOutcome::none());
    }

    let missing_restricted = MEDIA_RESTRICTED_PACKAGES
        .iter()
        .any(|package| !engine.probe.is_installed(package));
    let lingering_free = MEDIA_FREE_PACKAGES
        .iter()
        .any(|package| engine.probe.is_installed(package));

    if missing_restricted || lingering_free {
        info!("codec stack is inconsistent, flagging for media fixup");
        Ok(RuleOutcome::flags(ResultFlags::media()))
    } else {
        Ok(RuleOutcome::none())
    }
}

/// Inside a gamescope session, an update to the session's own components
/// needs a reboot to take effect.
pub(super) fn gamescope_reboot(
    engine: &QuirkEngine<'_>,
    state: &mut RunState,
) -> Result<RuleOutcome> {
    if engine.config.in_gamescope_session() && state.pending_contains(GAMESCOPE_COMPONENT_MARKER) {
        Ok(RuleOutcome::flags(ResultFlags::reboot()))
    } else {
        Ok(RuleOutcome::none())
    }
}

/// Drop the fresh-install marker once a remediation pass has run over it.
pub(super) fn install_marker(
    engine: &QuirkEngine<'_>,
    _state: &mut RunState,
) -> Result<RuleOutcome> {
    let marker = &engine.config.fresh_install_marker;
    if marker.exists() {
        match fs::remove_file(marker) {
            Ok(()) => info!("removed fresh-install marker {}", marker.display()),
            Err(e) => warn!("failed to remove {}: {e}", marker.display()),
        }
    }
    Ok(RuleOutcome::none())
}
