//! TON Forge - A terminal workbench for TON smart contract development
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use clap::Parser;
use tonforge_app::config;
use tonforge_app::Network;
use tonforge_core::prelude::*;

/// TON Forge - A terminal workbench for TON smart contract development
#[derive(Parser, Debug)]
#[command(name = "tonforge")]
#[command(about = "A terminal workbench for TON smart contract development", long_about = None)]
struct Args {
    /// Target network (mainnet, testnet, sandbox)
    #[arg(long, value_name = "NETWORK")]
    network: Option<String>,

    /// Chain endpoint URL override
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,
}

fn parse_network(raw: &str) -> Option<Network> {
    match raw {
        "mainnet" => Some(Network::Mainnet),
        "testnet" => Some(Network::Testnet),
        "sandbox" => Some(Network::Sandbox),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = tonforge_core::logging::init() {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    let args = Args::parse();

    let mut settings = config::load_settings(&config::config_path());
    if let Some(raw) = args.network.as_deref() {
        match parse_network(raw) {
            Some(network) => settings.network.environment = network,
            None => {
                eprintln!("unknown network '{raw}' (expected mainnet, testnet, or sandbox)");
                std::process::exit(1);
            }
        }
    }
    if let Some(endpoint) = args.endpoint {
        settings.network.endpoint = Some(endpoint);
    }

    info!(
        "starting TON Forge on {}",
        settings.network.environment
    );

    tonforge_tui::run(settings).await?;
    Ok(())
}
