//! Property-based tests for the config-file editor and the result flags.
//!
//! These tests verify:
//! - Line edits converge: a second identical application never changes the
//!   file again
//! - Removed lines are gone and added lines are present exactly once
//! - Flag merging is monotonic (a set flag can never be unset)

use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

use nobara_quirks::flags::ResultFlags;
use nobara_quirks::{apply_line_edits, LineEdits};

/// Strategy for config-file lines; plain identifiers keep the remove
/// matcher (trimmed exact equality) well-defined.
fn line_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,12}"
}

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..12)
}

fn flags_strategy() -> impl Strategy<Value = ResultFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(kernel_action, reboot_request, media_fixup, refresh_performed)| ResultFlags {
            kernel_action,
            reboot_request,
            media_fixup,
            refresh_performed,
        },
    )
}

proptest! {
    /// Applying the same edit batch twice always reports unchanged the
    /// second time, and the file content is stable.
    #[test]
    fn line_edits_converge_on_second_application(
        content in lines_strategy(),
        remove in prop::collection::vec(line_strategy(), 0..4),
        add in prop::collection::vec(line_strategy(), 0..4),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        let mut body = content.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&path, &body).unwrap();

        let mut edits = LineEdits::new();
        for line in &remove {
            edits = edits.remove_line(line.clone());
        }
        for line in &add {
            edits = edits.add_line(line.clone());
        }

        apply_line_edits(&path, &edits).unwrap();
        let settled = fs::read_to_string(&path).unwrap();

        let changed_again = apply_line_edits(&path, &edits).unwrap();
        prop_assert!(!changed_again, "second application must be a no-op");
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), settled);
    }

    /// After one application, every added line is present and every
    /// removed line is gone (unless it was also re-added).
    #[test]
    fn line_edits_reach_the_described_state(
        content in lines_strategy(),
        remove in prop::collection::vec(line_strategy(), 0..4),
        add in prop::collection::vec(line_strategy(), 0..4),
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        let mut body = content.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(&path, &body).unwrap();

        let mut edits = LineEdits::new();
        for line in &remove {
            edits = edits.remove_line(line.clone());
        }
        for line in &add {
            edits = edits.add_line(line.clone());
        }

        apply_line_edits(&path, &edits).unwrap();
        let lines: Vec<String> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();

        for line in &add {
            prop_assert!(lines.contains(line), "added line {:?} must be present", line);
        }
        for line in &remove {
            if !add.contains(line) {
                prop_assert!(
                    !lines.contains(line),
                    "removed line {:?} must be gone",
                    line
                );
            }
        }
    }

    /// Merging is monotonic: no flag set before a merge is ever unset by it.
    #[test]
    fn flag_merge_never_clears(a in flags_strategy(), b in flags_strategy()) {
        let mut merged = a;
        merged.merge(b);

        prop_assert!(merged.kernel_action >= a.kernel_action);
        prop_assert!(merged.reboot_request >= a.reboot_request);
        prop_assert!(merged.media_fixup >= a.media_fixup);
        prop_assert!(merged.refresh_performed >= a.refresh_performed);
        prop_assert!(merged.kernel_action >= b.kernel_action);
        prop_assert_eq!(merged.any(), a.any() || b.any());
    }
}
