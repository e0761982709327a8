//! nobara-quirks - Main entry point
//!
//! Thin binary around the library: argument parsing, logging setup, the
//! environment sanity check, and wiring the host implementations into the
//! engine.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use nobara_quirks::cli::{Cli, Commands};
use nobara_quirks::{
    sanity, DnfBackend, EngineConfig, HostBootTools, HostProbe, PackageBackend, QuirkEngine,
};

/// Initialize the tracing subscriber, honoring RUST_LOG overrides.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run_engine(config: Option<&PathBuf>, json: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        info!("dry-run mode: package mutations and boot tooling will be skipped");
    } else {
        let sanity = sanity::verify_environment();
        if !sanity.is_ok() {
            sanity::print_failure(&sanity);
            anyhow::bail!("environment sanity check failed");
        }
    }

    let config = load_config(config)?;
    let probe = HostProbe;
    let backend = DnfBackend::new(dry_run);
    let boot = HostBootTools::new(&config, dry_run);

    let engine = QuirkEngine::new(&probe, &backend, &boot, config);
    let flags = engine.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&flags)?);
    } else {
        println!("{flags}");
        if flags.reboot_request {
            println!("A reboot is recommended to complete the update.");
        }
    }
    Ok(())
}

fn list_pending(dry_run: bool) -> Result<()> {
    let backend = DnfBackend::new(dry_run);
    let pending = backend.pending_updates()?;
    if pending.is_empty() {
        println!("No pending updates.");
    } else {
        for name in pending {
            println!("{name}");
        }
    }
    Ok(())
}

fn validate_config(path: &PathBuf) -> Result<()> {
    let config = EngineConfig::load_from_file(path)?;
    config.validate()?;
    println!("✓ Configuration file is valid: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse_args();
    if cli.dry_run {
        warn!("running in dry-run mode");
    }

    let result = match cli.command {
        Some(Commands::Run { config, json }) => run_engine(config.as_ref(), json, cli.dry_run),
        Some(Commands::Pending) => list_pending(cli.dry_run),
        Some(Commands::Validate { config }) => validate_config(&config),
        None => run_engine(None, false, cli.dry_run),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
