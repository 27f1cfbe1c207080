use crate::cli::output::*;
use anyhow::Result;
use batseq_core::{describe_paths, BatseqError, Config};
use batseq_tools::{SequenceSearchService, ServiceStatus};
use clap::{Args, ValueEnum};

#[derive(Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = CheckFormat::Text)]
    pub format: CheckFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckFormat {
    Text,
    Json,
}

/// Report readiness; fails when either the database or the tool is missing
pub async fn run(args: CheckArgs, config: &Config) -> Result<()> {
    let service = SequenceSearchService::from_config(config);
    let status = service.status().await;

    match args.format {
        CheckFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        CheckFormat::Text => print_status(&service, &status),
    }

    if let Some(artifact) = status.database.missing.first() {
        return Err(BatseqError::DatabaseUnavailable {
            artifact: artifact.clone(),
        }
        .into());
    }
    if !status.tool.available {
        return Err(BatseqError::ExecutionFailed(format!(
            "{} not found at {}",
            status.tool.name,
            config.blast.binary.as_deref().unwrap_or("PATH")
        ))
        .into());
    }
    Ok(())
}

fn print_status(service: &SequenceSearchService, status: &ServiceStatus) {
    section_header("BatSEQ Check");

    let database = &status.database;
    tree_item(
        false,
        "Database",
        Some(&service.database().base().display().to_string()),
    );
    for artifact in service.database().artifacts() {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let state = if database.missing.contains(&name) {
            "missing"
        } else {
            "present"
        };
        println!("   {} {}", name, state);
    }

    let tool = &status.tool;
    let version = tool.version.as_deref().unwrap_or("unknown version");
    tree_item(
        false,
        "Tool",
        Some(&format!(
            "{} ({})",
            tool.name,
            if tool.available { version } else { "not found" }
        )),
    );
    tree_item(
        true,
        "Scratch",
        Some(&service.scratch_dir().display().to_string()),
    );

    println!();
    if status.ready() {
        success("Ready to search");
    } else {
        if !database.available {
            warning(&format!("Database {} is incomplete", database.name));
        }
        if !tool.available {
            warning("blastn is not installed or not executable");
        }
        info("Set --database/--blastn or BATSEQ_DATABASE/BATSEQ_BLASTN to point at them");
        println!("\n{}", describe_paths());
    }
}
