//! Error types for the fee burner.
//!
//! Every concern gets its own enum so callers can tell a malformed input
//! (hard error) apart from a legitimate negative result such as a
//! signature that simply does not verify (`Ok(false)`).

use alloy_primitives::{Address, B256};
use thiserror::Error;

/// Errors raised by the bitstream codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitstreamError {
    /// A field was declared with zero width
    #[error("field width must be at least one byte")]
    ZeroWidth,

    /// The value does not fit the declared width
    #[error("value {value} does not fit in {width} bytes")]
    ValueOverflow {
        /// Value that was being written or read
        value: u128,
        /// Declared field width in bytes
        width: usize,
    },

    /// A read extends past the end of the buffer
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        /// Offset of the read
        offset: usize,
        /// Requested length
        len: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Input was not valid hex
    #[error("invalid hex data: {0}")]
    InvalidHex(String),
}

/// Structural failures while decoding or dispatching a multihash blob.
///
/// A blob that parses but fails to verify is not an error; it is `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultihashError {
    /// Blob cannot hold the algorithm tag and length byte
    #[error("invalid multihash format: {len} bytes, need at least 2")]
    TooShort {
        /// Blob length
        len: usize,
    },

    /// Declared payload length disagrees with the bytes present
    #[error("bad multihash size: declared {declared} payload bytes, found {actual}")]
    LengthMismatch {
        /// Length byte from the header
        declared: usize,
        /// Bytes remaining after the header
        actual: usize,
    },

    /// A recognized algorithm received a payload of the wrong size
    #[error("bad {algorithm} multihash size: expected {expected} bytes, got {actual}")]
    BadPayloadLength {
        /// Algorithm name
        algorithm: &'static str,
        /// Payload size the algorithm requires
        expected: usize,
        /// Payload size that was supplied
        actual: usize,
    },

    /// The zero address was supplied as signer
    #[error("invalid signer address")]
    InvalidSigner,

    /// The signing primitive rejected the request
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Framing the blob failed
    #[error(transparent)]
    Bitstream(#[from] BitstreamError),
}

/// Failures reported by an order or fee ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No live order with this hash
    #[error("order not found: {0}")]
    OrderNotFound(B256),

    /// An order with the same hash is already live
    #[error("order already submitted: {0}")]
    DuplicateOrder(B256),

    /// Burn or withdrawal exceeds what the ledger holds
    #[error("insufficient balance of {token}: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Token being moved
        token: Address,
        /// Amount requested
        requested: u128,
        /// Amount available
        available: u128,
    },

    /// Arithmetic on ledger balances would overflow
    #[error("balance overflow for {token}")]
    BalanceOverflow {
        /// Token whose balance overflowed
        token: Address,
    },

    /// The external ledger could not process the call
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the burn manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BurnError {
    /// A ledger call failed; controller state was left unchanged
    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The ledger still reports the old order after cancelling it
    #[error("ledger did not confirm cancellation of order {0}")]
    CancelNotConfirmed(B256),

    /// Target price is zero, negative or out of range
    #[error("invalid target price: {0}")]
    InvalidPrice(String),

    /// Sell orders are never created for the burn token itself
    #[error("refusing to create a sell order for the burn token {0}")]
    BurnTokenOrder(Address),

    /// No fee balance is available to sell
    #[error("no {0} fee balance to sell")]
    NothingToSell(Address),

    /// The computed order would buy nothing
    #[error("order for {asset} rounds to zero at price {price}")]
    DegenerateOrder {
        /// Asset being sold
        asset: Address,
        /// Fixed-point target price
        price: u64,
    },

    /// Sizing the order overflowed
    #[error("order amount overflow for {0}")]
    AmountOverflow(Address),

    /// No burn-token balance is available to burn
    #[error("nothing to burn")]
    NothingToBurn,

    /// Balance and supply deltas disagree after a burn
    #[error(
        "conservation violated: burned {burned}, balance delta {balance_delta}, supply delta {supply_delta}"
    )]
    ConservationViolation {
        /// Amount requested to burn
        burned: u128,
        /// Observed decrease of the burn-target balance
        balance_delta: u128,
        /// Observed decrease of total supply
        supply_delta: u128,
    },
}

/// Errors raised while converting price quotes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// The base token is missing from the quote list
    #[error("no quote for base token {0}")]
    MissingBase(String),

    /// The base token price is zero or negative
    #[error("invalid base price for {0}")]
    InvalidBase(String),

    /// The price source could not be reached
    #[error("price source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::BurnerConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config parsed but a value is unusable
    #[error("invalid config: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },
}

/// Result alias for burn manager operations
pub type BurnResult<T> = Result<T, BurnError>;
