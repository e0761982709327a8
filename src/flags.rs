//! Follow-up action flags accumulated across one remediation pass.
//!
//! Each rule returns a delta of these flags; the engine merges deltas with
//! boolean OR, so a flag set by an earlier rule can never be cleared by a
//! later one. The final value is the engine's only output.

use serde::Serialize;
use std::fmt;

/// The four independent outcomes of a remediation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultFlags {
    /// A kernel or kernel-module change occurred; module rebuild needed
    pub kernel_action: bool,
    /// The user should reboot
    pub reboot_request: bool,
    /// The optional codec stack is in an inconsistent state
    pub media_fixup: bool,
    /// Repository metadata or the engine's own package was refreshed,
    /// short-circuiting the run
    pub refresh_performed: bool,
}

impl ResultFlags {
    /// No follow-up action required.
    pub fn none() -> Self {
        Self::default()
    }

    /// Kernel changed: module rebuild plus reboot.
    pub fn kernel() -> Self {
        Self {
            kernel_action: true,
            reboot_request: true,
            ..Self::default()
        }
    }

    /// Reboot only.
    pub fn reboot() -> Self {
        Self {
            reboot_request: true,
            ..Self::default()
        }
    }

    /// Codec stack inconsistency detected.
    pub fn media() -> Self {
        Self {
            media_fixup: true,
            ..Self::default()
        }
    }

    /// Repository metadata was refreshed.
    pub fn refresh() -> Self {
        Self {
            refresh_performed: true,
            ..Self::default()
        }
    }

    /// Merge a rule's delta in. Booleans only turn true, never false.
    pub fn merge(&mut self, delta: ResultFlags) {
        self.kernel_action |= delta.kernel_action;
        self.reboot_request |= delta.reboot_request;
        self.media_fixup |= delta.media_fixup;
        self.refresh_performed |= delta.refresh_performed;
    }

    /// True if any follow-up action is required.
    pub fn any(&self) -> bool {
        self.kernel_action || self.reboot_request || self.media_fixup || self.refresh_performed
    }
}

impl fmt::Display for ResultFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kernel_action={} reboot_request={} media_fixup={} refresh_performed={}",
            self.kernel_action, self.reboot_request, self.media_fixup, self.refresh_performed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_false() {
        let flags = ResultFlags::default();
        assert!(!flags.any());
    }

    #[test]
    fn test_merge_only_turns_true() {
        let mut flags = ResultFlags::kernel();
        flags.merge(ResultFlags::none());
        assert!(flags.kernel_action);
        assert!(flags.reboot_request);

        flags.merge(ResultFlags::media());
        assert!(flags.media_fixup);
        assert!(flags.kernel_action, "earlier flag must survive later merges");
        assert!(!flags.refresh_performed);
    }

    #[test]
    fn test_display_names_every_flag() {
        let s = ResultFlags::refresh().to_string();
        assert!(s.contains("refresh_performed=true"));
        assert!(s.contains("kernel_action=false"));
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_string(&ResultFlags::reboot()).unwrap();
        assert!(json.contains("\"reboot_request\":true"));
    }
}
