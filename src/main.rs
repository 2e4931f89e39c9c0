use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ethereum_account::NdWallet;
use ethereum_key_manager::{Config, KeyManager};
use ethereum_types::{NetworkCalendar, PublicKeyBytes};

#[derive(Parser)]
#[command(name = "ethereum-key-manager")]
#[command(about = "Ethereum validator key manager with slashing protection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, defaults to the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Network and configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect and seed slashing protection state
    Slashing {
        #[command(subcommand)]
        command: SlashingCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the estimated current slot
    CurrentSlot {
        /// Network, defaults to the configured network
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Print the estimated current epoch
    CurrentEpoch {
        /// Network, defaults to the configured network
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Network to configure
        #[arg(short, long, default_value = "mainnet")]
        network: String,
    },
}

#[derive(Subcommand)]
enum SlashingCommands {
    /// Show the stored highest attestation and proposal of a key
    Show {
        /// Validator public key (hex)
        #[arg(short, long)]
        pubkey: String,
    },

    /// Seed protection state before a key signs for the first time
    Seed {
        /// Validator public key (hex)
        #[arg(short, long)]
        pubkey: String,

        /// Highest source epoch already attested
        #[arg(long)]
        source: u64,

        /// Highest target epoch already attested
        #[arg(long)]
        target: u64,

        /// Highest slot already proposed, at least 1
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        slot: u64,
    },

    /// List keys with stored protection state
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };

    // Initialize logging
    let level = cli.log_level.clone().unwrap_or_else(|| config.log.level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::CurrentSlot { network } => {
                let network = network_config(&config, network)?;
                println!("{}", network.estimated_current_slot());
            }

            ConfigCommands::CurrentEpoch { network } => {
                let network = network_config(&config, network)?;
                println!("{}", network.estimated_current_epoch());
            }

            ConfigCommands::Init { output, network } => {
                let config = Config::for_network(&network)?;
                config.to_file(&output)?;
                info!("Wrote {} configuration to {}", network, output.display());
            }
        },

        Commands::Slashing { command } => {
            let manager = KeyManager::from_config(&config, Arc::new(NdWallet::new("cli")))?;
            match command {
                SlashingCommands::Show { pubkey } => {
                    let record = manager.protection_record(&parse_pubkey(&pubkey)?)?;
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }

                SlashingCommands::Seed { pubkey, source, target, slot } => {
                    manager.seed_protection(&parse_pubkey(&pubkey)?, source, target, slot)?;
                }

                SlashingCommands::List => {
                    for pubkey in manager.protected_keys()? {
                        println!("{}", pubkey);
                    }
                }
            }
        }
    }

    Ok(())
}

fn network_config(config: &Config, network: Option<String>) -> Result<ethereum_types::NetworkConfig> {
    match network {
        Some(name) => Config::for_network(&name)?.network_config(),
        None => config.network_config(),
    }
}

fn parse_pubkey(hex: &str) -> Result<PublicKeyBytes> {
    hex.parse().with_context(|| format!("Invalid public key `{}`", hex))
}
