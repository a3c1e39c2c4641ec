//! # Fee Burner
//!
//! Signature verification and fee burn order management for a token-burning
//! fee pipeline.
//!
//! ## Architecture
//!
//! - **Codec**: Big-endian bitstream builder and reader
//! - **Multihash**: Self-describing signature blobs, verified by recovering
//!   the signer
//! - **OrderBook**: Order ledger interface with a slab-backed in-memory ledger
//! - **Burn**: Per-asset sell order refresh and the LRC burn trigger
//!
//! ## Design Principles
//!
//! 1. **No Floating Point**: Prices use fixed-point arithmetic (10^8 scaling)
//! 2. **Synchronous Execution**: No async; ledgers synchronize internally
//! 3. **One Order per Asset**: Refreshes of an asset are serialized, distinct
//!    assets proceed in parallel

// ============================================================================
// Module declarations
// ============================================================================

/// Bitstream encoding and decoding
pub mod codec;

/// Multihash signature verification
pub mod multihash;

/// Core data types: orders, prices, quotes
pub mod types;

/// Order ledger interface and in-memory order book
pub mod orderbook;

/// Burn manager and fee ledger
pub mod burn;

/// TOML configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use burn::{BurnManager, FeeLedger, FeeVault, OrderUpdate};
pub use codec::{BitReader, Bitstream};
pub use config::BurnerConfig;
pub use error::{BitstreamError, BurnError, ConfigError, LedgerError, MultihashError, QuoteError};
pub use multihash::{verify_signature, MultihashVerifier, SignAlgorithm};
pub use orderbook::{OrderBook, OrderLedger};
pub use types::{OrderData, OrderSubmitted, SellOrder};
