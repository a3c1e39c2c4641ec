//! Order types shared by the order ledger and the burn manager.
//!
//! ## Order Hash
//!
//! Orders are identified by the keccak256 hash of their bitstream encoding:
//!
//! ```text
//! owner(20) ‖ token_s(20) ‖ token_b(20) ‖ amount_s(32) ‖ amount_b(32) ‖ valid_since(32)
//! ```
//!
//! `valid_since` carries the submission block marker, so resubmitting the
//! same amounts in a later block yields a fresh hash.

use alloy_primitives::{keccak256, Address, B256};

use crate::codec::{BitReader, Bitstream};
use crate::error::BitstreamError;

/// Order identifier (order hash)
pub type OrderId = B256;

/// Encoded size of [`OrderData`] in bytes
pub const ORDER_DATA_LEN: usize = 20 * 3 + 32 * 3;

// ============================================================================
// OrderData
// ============================================================================

/// An order as stored by the order ledger.
///
/// Sells `amount_s` of `token_s` for `amount_b` of `token_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderData {
    /// Account that owns the order
    pub owner: Address,
    /// Token sold
    pub token_s: Address,
    /// Token bought
    pub token_b: Address,
    /// Raw amount of `token_s` offered
    pub amount_s: u128,
    /// Raw amount of `token_b` requested
    pub amount_b: u128,
    /// Block marker from which the order is valid
    pub valid_since: u64,
}

impl OrderData {
    /// Bitstream encoding of the order
    pub fn encode(&self) -> Bitstream {
        let mut stream = Bitstream::new();
        stream
            .add_address(&self.owner)
            .add_address(&self.token_s)
            .add_address(&self.token_b)
            .add_word(self.amount_s)
            .add_word(self.amount_b)
            .add_word(u128::from(self.valid_since));
        stream
    }

    /// Decode an order from its bitstream encoding
    ///
    /// # Example
    ///
    /// ```
    /// use alloy_primitives::Address;
    /// use fee_burner::types::OrderData;
    ///
    /// let order = OrderData {
    ///     owner: Address::repeat_byte(1),
    ///     token_s: Address::repeat_byte(2),
    ///     token_b: Address::repeat_byte(3),
    ///     amount_s: 1_000,
    ///     amount_b: 500_000,
    ///     valid_since: 7,
    /// };
    /// let encoded = order.encode();
    /// assert_eq!(OrderData::decode(encoded.as_bytes()).unwrap(), order);
    /// ```
    pub fn decode(data: &[u8]) -> Result<Self, BitstreamError> {
        let reader = BitReader::new(data);
        if reader.len() != ORDER_DATA_LEN {
            return Err(BitstreamError::OutOfBounds {
                offset: 0,
                len: ORDER_DATA_LEN,
                available: reader.len(),
            });
        }
        let valid_since = reader.extract_uint(124, 32)?;
        Ok(Self {
            owner: reader.extract_address(0)?,
            token_s: reader.extract_address(20)?,
            token_b: reader.extract_address(40)?,
            amount_s: reader.extract_uint(60, 32)?,
            amount_b: reader.extract_uint(92, 32)?,
            valid_since: u64::try_from(valid_since).map_err(|_| BitstreamError::ValueOverflow {
                value: valid_since,
                width: 8,
            })?,
        })
    }

    /// Order hash: keccak256 of [`Self::encode`]
    pub fn hash(&self) -> OrderId {
        keccak256(self.encode().as_bytes())
    }
}

// ============================================================================
// OrderSubmitted
// ============================================================================

/// Notification emitted by the ledger when an order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSubmitted {
    /// Hash of the accepted order
    pub order_hash: OrderId,
    /// Order owner
    pub owner: Address,
    /// Token sold
    pub token_s: Address,
    /// Block marker at which the order was accepted
    pub block: u64,
}

// ============================================================================
// SellOrder
// ============================================================================

/// The burn manager's view of its live order for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellOrder {
    /// Asset being sold for the burn token
    pub asset: Address,
    /// Raw amount of `asset` offered
    pub amount_to_sell: u128,
    /// Raw amount of the burn token requested
    pub amount_to_buy: u128,
    /// Target price the order was sized at (fixed-point, 10^8)
    pub price: u64,
    /// Ledger identifier
    pub order_id: OrderId,
    /// Block marker at which the ledger accepted the order
    pub submitted_at_block: u64,
}

impl SellOrder {
    /// Ratio implied by the order amounts (fixed-point, rounded down)
    pub fn implied_price(&self) -> Option<u64> {
        crate::types::price::implied_price(self.amount_to_sell, self.amount_to_buy)
    }
}
