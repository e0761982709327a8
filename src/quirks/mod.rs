//! The quirk resolution engine.
//!
//! A quirk is one condition→action remediation rule. The catalogue is a
//! fixed, ordered table evaluated by one generic loop: each rule reads
//! probes, optionally mutates, and returns a delta of follow-up flags.
//! Rule order is significant and hand-maintained — later rules assume
//! earlier ones have already run (repository refresh before anything that
//! trusts repository metadata). Terminal rules end the run immediately
//! after acting.
//!
//! Nothing survives a run in the engine's own memory; persistent state
//! lives in the package database and on-disk config files.

mod boot_mode;
mod rules;

use crate::backend::PackageBackend;
use crate::boot::BootTools;
use crate::config::EngineConfig;
use crate::flags::ResultFlags;
use crate::probe::SystemProbe;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// What one rule reported back to the evaluation loop.
#[derive(Debug, Default)]
pub struct RuleOutcome {
    /// Flag delta, merged into the run's accumulated flags
    pub flags: ResultFlags,
    /// True when a terminal rule matched and the run must stop
    pub halt: bool,
}

impl RuleOutcome {
    /// The rule did not apply or finished without follow-up.
    pub fn none() -> Self {
        Self::default()
    }

    /// The rule finished and contributes a flag delta.
    pub fn flags(flags: ResultFlags) -> Self {
        Self { flags, halt: false }
    }

    /// A terminal rule matched: contribute the delta and stop the run.
    pub fn halt(flags: ResultFlags) -> Self {
        Self { flags, halt: true }
    }
}

/// Per-run state threaded through the rules.
pub struct RunState {
    /// Pending-update set, pulled once per run. Read-only except for the
    /// terminal rules, which drop the entries they refresh themselves.
    pub pending: Vec<String>,
}

impl RunState {
    /// True if any pending package name contains the marker substring.
    pub fn pending_contains(&self, marker: &str) -> bool {
        self.pending.iter().any(|name| name.contains(marker))
    }
}

type RuleFn = fn(&QuirkEngine<'_>, &mut RunState) -> Result<RuleOutcome>;

/// One entry of the ordered rule catalogue.
pub struct Quirk {
    pub name: &'static str,
    /// A terminal rule ends the run immediately when it matches
    pub terminal: bool,
    run: RuleFn,
}

/// The fixed rule catalogue. Order is significant; append with care.
const CATALOG: &[Quirk] = &[
    Quirk { name: "repo-refresh", terminal: true, run: rules::repo_refresh },
    Quirk { name: "self-update", terminal: true, run: rules::self_update },
    Quirk { name: "stale-kernel-modules", terminal: false, run: rules::stale_kernel_modules },
    Quirk { name: "extra-repos", terminal: false, run: rules::extra_repos },
    Quirk { name: "kernel-update-pending", terminal: false, run: rules::kernel_update_pending },
    Quirk { name: "desktop-shell-pending", terminal: false, run: rules::desktop_shell_pending },
    Quirk { name: "handheld-input", terminal: false, run: rules::handheld_input },
    Quirk { name: "desktop-mode", terminal: false, run: rules::desktop_mode },
    Quirk { name: "block-list", terminal: false, run: rules::block_list },
    Quirk { name: "shell-cache", terminal: false, run: rules::shell_cache },
    Quirk { name: "nvidia-epoch", terminal: false, run: rules::nvidia_epoch },
    Quirk { name: "rocm-channel", terminal: false, run: rules::rocm_channel },
    Quirk { name: "mesa-variants", terminal: false, run: rules::mesa_variants },
    Quirk { name: "vulkan-rebuild", terminal: false, run: rules::vulkan_rebuild },
    Quirk { name: "kernel-channel", terminal: false, run: rules::kernel_channel },
    Quirk { name: "media-codecs", terminal: false, run: rules::media_codecs },
    Quirk { name: "gamescope-reboot", terminal: false, run: rules::gamescope_reboot },
    Quirk { name: "install-marker", terminal: false, run: rules::install_marker },
];

/// The ordered rule evaluator.
pub struct QuirkEngine<'a> {
    pub(crate) probe: &'a dyn SystemProbe,
    pub(crate) backend: &'a dyn PackageBackend,
    pub(crate) boot: &'a dyn BootTools,
    pub(crate) config: EngineConfig,
}

impl<'a> QuirkEngine<'a> {
    pub fn new(
        probe: &'a dyn SystemProbe,
        backend: &'a dyn PackageBackend,
        boot: &'a dyn BootTools,
        config: EngineConfig,
    ) -> Self {
        Self {
            probe,
            backend,
            boot,
            config,
        }
    }

    /// Run one remediation pass: pull the pending-update set, evaluate the
    /// catalogue in order, and return the accumulated follow-up flags.
    ///
    /// Mutation failures abort the run with the error; everything already
    /// applied stays applied. Rules are idempotent, so rerunning from the
    /// top after a failure is safe.
    pub fn run(&self) -> Result<ResultFlags> {
        let pending = self
            .backend
            .pending_updates()
            .context("failed to query the pending-update set")?;
        debug!("pending updates: {pending:?}");

        let mut state = RunState { pending };
        let mut flags = ResultFlags::default();

        for quirk in CATALOG {
            debug!("evaluating quirk {}", quirk.name);
            let outcome = (quirk.run)(self, &mut state)
                .with_context(|| format!("quirk '{}' failed", quirk.name))?;
            flags.merge(outcome.flags);

            if quirk.terminal && outcome.halt {
                info!("quirk {} matched, ending run early", quirk.name);
                return Ok(flags);
            }
        }

        info!("remediation pass complete: {flags}");
        Ok(flags)
    }
}
