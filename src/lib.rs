//! Nobara Quirks Library
//!
//! Core functionality for the post-update remediation engine: the quirk
//! catalogue, system probes, the package backend, and boot tooling.

pub mod backend;
pub mod boot;
pub mod cli;
pub mod config;
pub mod config_edit;
pub mod error;
pub mod flags;
pub mod probe;
pub mod quirks;
pub mod sanity;
pub mod users;

// Re-export main types for convenience
pub use backend::{DnfBackend, PackageAction, PackageBackend};
pub use boot::{BootTools, HostBootTools};
pub use config::EngineConfig;
pub use config_edit::{apply_line_edits, LineEdits};
pub use error::{QuirkError, Result};
pub use flags::ResultFlags;
pub use probe::{sha256_file, HostProbe, SystemProbe};
pub use quirks::QuirkEngine;
pub use sanity::{verify_environment, SanityCheckResult};
