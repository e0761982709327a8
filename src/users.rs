//! Enumeration of real (non-system) user accounts.
//!
//! Parses a passwd-format file rather than calling into NSS so the source
//! is configurable and the shell-cache rule is testable against fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// First UID the distribution hands out to human accounts.
const FIRST_USER_UID: u32 = 1000;

/// The `nobody` placeholder account.
const NOBODY_UID: u32 = 65534;

/// Home directories of real user accounts (uid >= 1000, excluding nobody).
///
/// An unreadable or malformed passwd file yields an empty list — the
/// callers treat "no users found" as nothing to clean up.
pub fn home_directories(passwd_file: &Path) -> Vec<PathBuf> {
    let Ok(content) = fs::read_to_string(passwd_file) else {
        debug!("could not read {}", passwd_file.display());
        return Vec::new();
    };

    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            // name:passwd:uid:gid:gecos:home:shell
            if fields.len() < 7 {
                return None;
            }
            let uid: u32 = fields[2].parse().ok()?;
            if uid < FIRST_USER_UID || uid == NOBODY_UID {
                return None;
            }
            let home = fields[5];
            if home.is_empty() || home == "/" {
                return None;
            }
            Some(PathBuf::from(home))
        })
        .collect()
}
