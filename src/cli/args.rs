//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// uidl - UI message DTO generator
///
/// Compiles `.dto` schema files describing the commands, events and queries
/// exchanged between a server-side UI model and its browser renderer into
/// serde-ready Rust types.
#[derive(Parser, Debug)]
#[command(name = "uidl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "UIDL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local uidl.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust DTO modules from a schema directory
    Generate(GenerateArgs),

    /// Parse and validate schema files without generating
    Check(CheckArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Directory containing schema files (searched recursively)
    pub source: PathBuf,

    /// Output directory; replaced on every run
    pub target: PathBuf,

    /// Package of the generated modules, e.g. org.example.dto
    #[arg(short, long)]
    pub package: Option<String>,

    /// Regenerate even if the schema is unchanged
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory containing schema files (searched recursively)
    pub source: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., generator.package)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local uidl.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for the check command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate() {
        let cli = Cli::parse_from(["uidl", "generate", "schema", "out", "-p", "org.example.dto"]);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.source, PathBuf::from("schema"));
                assert_eq!(args.target, PathBuf::from("out"));
                assert_eq!(args.package.as_deref(), Some("org.example.dto"));
                assert!(!args.force);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_generate_force() {
        let cli = Cli::parse_from(["uidl", "generate", "schema", "out", "--force"]);
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.force);
                assert!(args.package.is_none());
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn cli_generate_requires_target() {
        assert!(Cli::try_parse_from(["uidl", "generate", "schema"]).is_err());
    }

    #[test]
    fn cli_parses_check_with_format() {
        let cli = Cli::parse_from(["uidl", "check", "schema", "--format", "json"]);
        match cli.command {
            Commands::Check(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn cli_check_defaults_to_table() {
        let cli = Cli::parse_from(["uidl", "check", "schema"]);
        match cli.command {
            Commands::Check(args) => assert!(matches!(args.format, OutputFormat::Table)),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn cli_parses_config_set_local() {
        let cli = Cli::parse_from(["uidl", "config", "set", "cache.publish", "blind", "--local"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Set { key, value, local }),
            }) => {
                assert_eq!(key, "cache.publish");
                assert_eq!(value, "blind");
                assert!(local);
            }
            _ => panic!("expected Config Set command"),
        }
    }

    #[test]
    fn cli_parses_bare_config() {
        let cli = Cli::parse_from(["uidl", "config"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs { action: None })
        ));
    }

    #[test]
    fn cli_parses_completions() {
        let cli = Cli::parse_from(["uidl", "completions", "bash"]);
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, Shell::Bash),
            _ => panic!("expected Completions command"),
        }
    }

    #[test]
    fn cli_global_flags() {
        let cli = Cli::parse_from(["uidl", "-vv", "--no-local", "check", "schema"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_local);
    }
}
