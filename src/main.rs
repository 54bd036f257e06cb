//! Fan-out demo.
//!
//! Starts a slow and a fast demo endpoint, then calls both concurrently
//! through the configured sender chain. When the fast endpoint reports
//! `error`, the slow call is cancelled instead of waiting it out.
//!
//! ```text
//!                     ┌──────────────────────────────┐
//!   root scope ──────▶│          Dispatcher          │
//!   (Ctrl+C)          │   child scope per run_all    │
//!                     └──────┬────────────────┬──────┘
//!                            │                │
//!                     ┌──────▼─────┐   ┌──────▼─────┐
//!                     │ task: slow │   │ task: fast │
//!                     └──────┬─────┘   └──────┬─────┘
//!                            │ headers → retry → timeout → hyper
//!                     ┌──────▼─────┐   ┌──────▼─────┐
//!                     │ slow server│   │ fast server│
//!                     └────────────┘   └────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use resilient_client::config::{load_config, ClientConfig};
use resilient_client::{
    client, demo, lifecycle, observability, CancellationScope, DispatchTask, Dispatcher, Request,
};

#[derive(Parser)]
#[command(name = "resilient-client")]
#[command(about = "Call a slow and a fast endpoint concurrently, cancelling on failure", long_about = None)]
struct Cli {
    /// Forwarded verbatim as the fast endpoint's `error` query parameter ("true" makes it fail)
    simulate_error: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    observability::logging::init_logging(&config.observability.log_level)?;
    tracing::info!("resilient-client v0.1.0 starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let root = CancellationScope::new();
    let _signals = lifecycle::cancel_on_ctrl_c(root.clone());

    let servers = root.child();
    let slow = demo::spawn_slow(
        &config.demo.bind_address,
        Duration::from_millis(config.demo.slow_delay_ms),
        &servers,
    )
    .await?;
    let fast = demo::spawn_fast(&config.demo.bind_address, &servers).await?;

    let sender = client::build_sender(&config)?;
    let dispatcher = Dispatcher::from_config(sender, &config.dispatch);

    let slow_url = slow.url();
    let fast_url = fast.url();
    let error_flag = cli.simulate_error;
    let tasks = vec![
        DispatchTask::get("slow", slow_url),
        DispatchTask::new("fast", move |_| {
            Ok(Request::get(&fast_url)?.with_query("error", &error_flag))
        }),
    ];

    let report = dispatcher.run_all(&root, tasks).await;
    tracing::info!(
        succeeded = report.all_succeeded(),
        cancelled = report.cancelled(),
        "done with both"
    );

    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(response) => println!("{}: {}", outcome.label, response.text()),
            Err(e) => println!("{}: {}", outcome.label, e),
        }
    }

    slow.shutdown().await;
    fast.shutdown().await;
    Ok(())
}
