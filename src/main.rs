// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use roadsign_node::{
    api,
    classifier::UnifiedClassifier,
    config::{ClassifierConfig, ServerConfig},
};

/// Road sign classification API server
#[derive(Parser, Debug)]
#[command(name = "roadsign-node", version)]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = ClassifierConfig::from_env();
    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Classifier mode: {}",
        if config.has_remote() {
            "remote with local fallback"
        } else {
            "fallback only (no API credential)"
        }
    );

    let classifier = Arc::new(UnifiedClassifier::new(&config)?);

    let server_config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    api::start_server(&server_config, classifier).await
}
