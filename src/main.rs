//! Fee Burner - Binary Entry Point
//!
//! Usage:
//!   fee-burner verify --signer <addr> --hash <b256> --signature <hex>
//!   fee-burner sign --key <hex> --hash <b256> [--eip712]
//!   fee-burner prices --quotes <file.json> [--base LRC]

use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::{Address, B256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fee_burner::config::BurnerConfig;
use fee_burner::error::QuoteError;
use fee_burner::multihash::{default_verifier, sign, SignAlgorithm};
use fee_burner::types::price::{decimal_to_fixed, from_fixed};
use fee_burner::types::{fetch_prices_in, PriceQuote, PriceSource};
use k256::ecdsa::SigningKey;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fee-burner")]
#[command(about = "Multihash signature tools and fee burn price conversion")]
#[command(version)]
struct Cli {
    /// Burner configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a multihash signature blob
    Verify {
        /// Expected signer address
        #[arg(long)]
        signer: Address,
        /// 32-byte message hash
        #[arg(long)]
        hash: B256,
        /// Signature blob as hex
        #[arg(long)]
        signature: String,
    },
    /// Sign a hash into a multihash blob
    Sign {
        /// 32-byte secp256k1 private key as hex
        #[arg(long)]
        key: String,
        /// 32-byte message hash
        #[arg(long)]
        hash: B256,
        /// Treat the hash as an EIP-712 digest instead of a personal message
        #[arg(long)]
        eip712: bool,
    },
    /// Convert fiat quotes into target prices for sell orders
    Prices {
        /// JSON array of `{"symbol", "price"}` quotes
        #[arg(long)]
        quotes: PathBuf,
        /// Symbol prices are expressed in (defaults to the config's base symbol)
        #[arg(long)]
        base: Option<String>,
    },
}

/// Quotes read from a JSON file exported from a price relay
struct QuoteFile {
    quotes: Vec<PriceQuote>,
}

impl QuoteFile {
    fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let quotes = serde_json::from_str(&contents)
            .with_context(|| format!("parsing quotes in {}", path.display()))?;
        Ok(Self { quotes })
    }
}

impl PriceSource for QuoteFile {
    fn quote(&self, currency: &str) -> Result<Vec<PriceQuote>, QuoteError> {
        debug!(currency, count = self.quotes.len(), "serving quotes from file");
        Ok(self.quotes.clone())
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).with_context(|| format!("invalid hex: {value}"))
}

fn load_config(path: Option<&Path>) -> Result<BurnerConfig> {
    match path {
        Some(path) => BurnerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(BurnerConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fee_burner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Verify { signer, hash, signature } => {
            let blob = decode_hex(&signature)?;
            let valid = default_verifier().verify_signature(&signer, &hash, &blob)?;
            let algorithm = blob
                .first()
                .and_then(|tag| SignAlgorithm::from_u8(*tag))
                .map_or("unknown", SignAlgorithm::name);
            info!(%signer, %hash, algorithm, valid, "signature checked");
            println!("{valid}");
        }
        Commands::Sign { key, hash, eip712 } => {
            let key = SigningKey::from_slice(&decode_hex(&key)?).context("invalid private key")?;
            let algorithm = if eip712 { SignAlgorithm::Eip712 } else { SignAlgorithm::Ethereum };
            let blob = sign(algorithm, &hash, &key)?;
            info!(signer = %Address::from_private_key(&key), algorithm = algorithm.name(), "hash signed");
            println!("0x{}", hex::encode(blob));
        }
        Commands::Prices { quotes, base } => {
            let source = QuoteFile::load(&quotes)?;
            let base = base.unwrap_or_else(|| config.base_symbol.clone());
            let prices = fetch_prices_in(&source, &config.quote_currency, &base)?;

            info!(base = %base, count = prices.len(), "prices converted");
            for price in prices {
                match decimal_to_fixed(price.price) {
                    Some(fixed) => println!("{}\t{}", price.symbol, from_fixed(fixed)),
                    None => println!("{}\t{} (out of range)", price.symbol, price.price),
                }
            }
        }
    }

    Ok(())
}
