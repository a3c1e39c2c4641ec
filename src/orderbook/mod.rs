//! Order ledger interface and an in-memory reference ledger.
//!
//! ## Architecture
//!
//! The burn manager never owns orders itself; it submits and cancels them
//! through an [`OrderLedger`]. Production deployments back the trait with
//! the on-chain order book. [`OrderBook`] is an in-memory implementation
//! with the same observable behaviour:
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Hash index**: order hash to slab key for O(1) cancel and existence checks
//! - **Event log**: one [`OrderSubmitted`] per accepted order, filterable by block
//! - **Block marker**: advances on every write, like one transaction per block
//!
//! ## Example
//!
//! ```
//! use alloy_primitives::Address;
//! use fee_burner::orderbook::{OrderBook, OrderLedger};
//! use fee_burner::types::OrderData;
//!
//! let book = OrderBook::with_capacity(16);
//! let order = OrderData {
//!     owner: Address::repeat_byte(1),
//!     token_s: Address::repeat_byte(2),
//!     token_b: Address::repeat_byte(3),
//!     amount_s: 1_000,
//!     amount_b: 500_000,
//!     valid_since: 0,
//! };
//!
//! let submitted = book.submit(order).unwrap();
//! assert!(book.exists(&submitted.order_hash));
//!
//! book.cancel(&submitted.order_hash).unwrap();
//! assert!(!book.exists(&submitted.order_hash));
//! ```

pub mod book;

pub use book::OrderBook;

use crate::error::LedgerError;
use crate::types::{OrderData, OrderId, OrderSubmitted};

/// External system of record for outstanding orders.
///
/// Implementations synchronize internally; every method takes `&self`.
pub trait OrderLedger: Send + Sync {
    /// Accept an order, assigning its identifier and emitting [`OrderSubmitted`]
    fn submit(&self, order: OrderData) -> Result<OrderSubmitted, LedgerError>;

    /// Remove a live order
    fn cancel(&self, order_id: &OrderId) -> Result<(), LedgerError>;

    /// Check if an order is live
    fn exists(&self, order_id: &OrderId) -> bool;

    /// Stored data of a live order
    fn order_data(&self, order_id: &OrderId) -> Option<OrderData>;

    /// Submission notifications at or after `from_block`
    fn submitted_since(&self, from_block: u64) -> Vec<OrderSubmitted>;

    /// Current block marker
    fn block_number(&self) -> u64;
}
