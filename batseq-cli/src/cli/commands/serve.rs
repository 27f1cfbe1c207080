use crate::server;
use anyhow::Result;
use batseq_core::Config;
use batseq_tools::SequenceSearchService;
use clap::Args;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (host:port)
    #[arg(long, env = "BATSEQ_BIND", value_name = "ADDR")]
    pub bind: Option<String>,
}

pub async fn run(args: ServeArgs, config: &Config) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());
    let service = Arc::new(SequenceSearchService::from_config(config));

    let status = service.status().await;
    if !status.database.available {
        tracing::warn!(
            "Database {} is missing {}; searches will fail until it is built",
            status.database.name,
            status.database.missing.join(", ")
        );
    }
    if !status.tool.available {
        tracing::warn!("{} is not available; searches will fail", status.tool.name);
    }

    server::serve(service, &bind).await
}
