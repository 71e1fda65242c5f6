use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::node::config::GatewayConfig;
use crate::node::Gateway;
use crate::utils::init_logging;

/// HTTP/JSON gateway in front of node RPC endpoints.
#[derive(Parser, Debug)]
#[command(name = "oasis-gateway", version)]
pub struct Cli {
    /// Path to the gateway configuration file
    #[arg(long, default_value = "./config/gateway.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run the gateway
    Run {
        /// API bind address (host:port), overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// List the configured nodes
    Nodes,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = GatewayConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.cmd {
        Cmd::Nodes => {
            for node in cfg.directory().entries() {
                println!("{}\t{}", node.name(), node.address());
            }
            Ok(())
        }
        Cmd::Run { bind } => {
            if let Some(b) = bind {
                cfg.api.bind = b;
            }
            init_logging(&cfg.logging.filter);

            let (svc, addr) = Gateway::new(cfg).start().await?;
            tracing::info!("serving on {}, press Ctrl+C to stop", addr);
            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down gateway...");
            svc.shutdown().await?;
            tracing::info!("Gateway stopped");
            Ok(())
        }
    }
}
