//! QnA Gateway Binary
//!
//! # Usage
//! ```bash
//! qna-gateway [--port 18790] [--host 127.0.0.1] [--config gateway.json] [--no-seed] [--lenient] [--sequential-ids] [--verbose]
//! ```

use clap::Parser;
use qna_core::{IdStrategy, Strictness};
use qna_gateway::{Gateway, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// QnA Gateway - questions, answers and a JSON RPC to manage them
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (default: 18790)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with an empty store instead of the seed question
    #[arg(long)]
    no_seed: bool,

    /// Accept questions that do not end with "?"
    #[arg(long)]
    lenient: bool,

    /// Generate ids from a counter instead of UUIDs
    #[arg(long)]
    sequential_ids: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if self.no_seed {
            config = config.with_seed(false);
        }
        if self.lenient {
            config = config.with_strictness(Strictness::Lenient);
        }
        if self.sequential_ids {
            config = config.with_ids(IdStrategy::Sequential);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    let config = args.into_config()?;
    print_banner(&config);

    let gateway = Gateway::new(config);
    let state = gateway.state();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl+C received");
            let _ = state.shutdown_tx.send(());
        }
    });

    gateway.start().await?;

    Ok(())
}

fn print_banner(config: &GatewayConfig) {
    let base = format!("http://{}:{}", config.host, config.port);
    println!();
    println!("QnA Gateway v{}", qna_gateway::VERSION);
    println!();
    println!("UI");
    println!("   ├─ GET  {}/          — Question list", base);
    println!("   └─ GET  {}/q/{{id}}    — Question page", base);
    println!();
    println!("RPC");
    println!("   ├─ POST {}/rpc/{{procedure}}", base);
    println!("   └─ GET  {}/rpc/{{procedure}}?input={{json}}  (queries)", base);
    println!();
    println!("Probes");
    println!("   ├─ GET  {}/health", base);
    println!("   └─ GET  {}/status", base);
    println!();
    println!(
        "Store: {} | rules: {:?} | ids: {:?}",
        if config.seed { "seeded" } else { "empty" },
        config.strictness,
        config.ids
    );
    println!("Press Ctrl+C to stop the gateway");
    println!();
}
