use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Post-update remediation engine for Nobara Linux
#[derive(Parser)]
#[command(name = "nobara-quirks")]
#[command(about = "Applies system quirk fixups after package updates")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: show what would be executed without making changes.
    ///
    /// Package mutations and boot tooling invocations are skipped and
    /// logged. Probes and pending-update queries still execute so the
    /// preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full remediation pass (the default when no command is given)
    Run {
        /// Path to an engine configuration file (defaults are built in)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the result flags as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// List pending package updates and exit
    Pending,
    /// Validate an engine configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to a full run)
        let result = Cli::try_parse_from(["nobara-quirks"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_run_with_config_and_json() {
        let result = Cli::try_parse_from([
            "nobara-quirks",
            "run",
            "--config",
            "/etc/nobara/quirks.json",
            "--json",
        ]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        match cli.command {
            Some(Commands::Run { config, json }) => {
                assert_eq!(
                    config.unwrap().to_str().unwrap(),
                    "/etc/nobara/quirks.json"
                );
                assert!(json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_dry_run_is_global() {
        let result = Cli::try_parse_from(["nobara-quirks", "run", "--dry-run"]);
        assert!(result.is_ok());
        assert!(result.unwrap().dry_run);
    }

    #[test]
    fn test_cli_validate_command() {
        let result =
            Cli::try_parse_from(["nobara-quirks", "validate", "/etc/nobara/quirks.json"]);
        assert!(result.is_ok());
        let cli = result.unwrap();
        match cli.command {
            Some(Commands::Validate { config }) => {
                assert_eq!(config.to_str().unwrap(), "/etc/nobara/quirks.json");
            }
            _ => panic!("Expected Validate command"),
        }
    }
}
