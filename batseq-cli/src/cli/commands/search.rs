use crate::cli::output::*;
use anyhow::{Context, Result};
use batseq_core::{BatseqError, Config};
use batseq_tools::SequenceSearchService;
use clap::{Args, ValueEnum};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

#[derive(Args)]
pub struct SearchArgs {
    /// Nucleotide sequence or FASTA text (omit or use "-" to read stdin)
    #[arg(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    /// Read the query from a FASTA file
    #[arg(short, long, value_name = "FILE", conflicts_with = "sequence")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = SearchFormat::Table)]
    pub format: SearchFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchFormat {
    Table,
    Json,
}

pub async fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let query = read_query(&args)?;
    let service = SequenceSearchService::from_config(config);
    let results = service.search(&query).await?;

    match args.format {
        SearchFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        SearchFormat::Table => {
            section_header(&format!("Hits against {}", service.database().name()));
            if results.is_empty() {
                empty("No hits found");
            } else {
                println!("{}", hits_table(&results));
                success(&format!("{} hit(s)", results.len()));
            }
        }
    }
    Ok(())
}

fn read_query(args: &SearchArgs) -> Result<String> {
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()));
    }

    match args.sequence.as_deref() {
        Some("-") | None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(BatseqError::InvalidInput(
                    "no sequence given; pass SEQUENCE, --file or pipe it on stdin".to_string(),
                )
                .into());
            }
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read sequence from stdin")?;
            Ok(buf)
        }
        Some(sequence) => Ok(sequence.to_string()),
    }
}
