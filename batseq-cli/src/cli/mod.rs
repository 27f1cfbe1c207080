pub mod commands;
pub mod output;

use batseq_core::{load_config, BatseqError, Config};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "batseq",
    version,
    about = "BLASTN search against the BatGIS isolate database",
    long_about = "BatSEQ runs nucleotide queries through NCBI blastn against the pre-built \
                  BatGIS reference database and reports the hits as a table or JSON. \
                  `batseq serve` exposes the same search over HTTP for the BatGIS web client."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "BATSEQ_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Overrides shared by every subcommand; flags win over the config file
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Database base path, without the .nhr/.nin/.nsq extension
    #[arg(long, global = true, env = "BATSEQ_DATABASE", value_name = "BASE")]
    pub database: Option<PathBuf>,

    /// Path to the blastn executable
    #[arg(long, global = true, env = "BATSEQ_BLASTN", value_name = "PATH")]
    pub blastn: Option<PathBuf>,

    /// Directory for staged query files
    #[arg(long = "scratch-dir", global = true, env = "BATSEQ_SCRATCH_DIR", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Seconds before a running search is killed
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the search API over HTTP
    Serve(commands::serve::ServeArgs),

    /// Search one sequence and print the hits
    Search(commands::search::SearchArgs),

    /// Check the reference database and blastn installation
    Check(commands::check::CheckArgs),
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<Config, BatseqError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        self.common.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

impl CommonArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(database) = &self.database {
            config.blast.database = Some(database.to_string_lossy().into_owned());
        }
        if let Some(blastn) = &self.blastn {
            config.blast.binary = Some(blastn.to_string_lossy().into_owned());
        }
        if let Some(scratch) = &self.scratch_dir {
            config.staging.scratch_dir = Some(scratch.to_string_lossy().into_owned());
        }
        if let Some(timeout) = self.timeout {
            config.blast.timeout_secs = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = Config::default();
        let args = CommonArgs {
            database: Some(PathBuf::from("/data/mybatdb")),
            blastn: Some(PathBuf::from("/opt/blast/blastn")),
            scratch_dir: None,
            timeout: Some(30),
        };
        args.apply(&mut config);

        assert_eq!(config.blast.database.as_deref(), Some("/data/mybatdb"));
        assert_eq!(config.blast.binary.as_deref(), Some("/opt/blast/blastn"));
        assert_eq!(config.staging.scratch_dir, None);
        assert_eq!(config.blast.timeout_secs, 30);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "batseq",
            "search",
            "ACGT",
            "--database",
            "/data/mybatdb",
            "--timeout",
            "5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.common.database, Some(PathBuf::from("/data/mybatdb")));
        assert_eq!(cli.common.timeout, Some(5));
        assert!(matches!(cli.command, Commands::Search(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Cli::try_parse_from(["batseq", "check", "--timeout", "0"]).unwrap();
        let err = cli.resolve_config().unwrap_err();
        assert!(matches!(err, BatseqError::Configuration(_)));
    }
}
