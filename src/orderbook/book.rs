//! In-memory order book.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated storage for O(1) order operations
//! - **HashMap**: Order hash to slab key mapping for O(1) cancel
//! - **Event log**: Append-only list of submission notifications
//!
//! ## Memory Model
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - `Slab::with_capacity(n)` pre-allocates n slots
//! - Keys are reused after removal
//! - O(1) insert, remove, and lookup
//!
//! All state sits behind one `parking_lot::RwLock`, so a submit or cancel is
//! atomic with respect to concurrent readers.

use std::collections::HashMap;

use alloy_primitives::Address;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::orderbook::OrderLedger;
use crate::types::{OrderData, OrderId, OrderSubmitted};

#[derive(Debug, Default)]
struct BookState {
    /// Live orders
    /// Key: slab index, Value: order data
    orders: Slab<OrderData>,

    /// Order hash to slab key mapping
    index: HashMap<OrderId, usize>,

    /// Every accepted submission, in block order
    events: Vec<OrderSubmitted>,

    /// Block marker, advanced on every write
    block: u64,

    /// Number of successful cancellations
    cancellations: u64,
}

/// In-memory order ledger.
#[derive(Debug, Default)]
pub struct OrderBook {
    state: RwLock<BookState>,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order book with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use fee_burner::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(1_000);
    /// assert!(book.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            state: RwLock::new(BookState {
                orders: Slab::with_capacity(order_capacity),
                index: HashMap::with_capacity(order_capacity),
                ..BookState::default()
            }),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current capacity (pre-allocated slots)
    pub fn capacity(&self) -> usize {
        self.state.read().orders.capacity()
    }

    /// Get the number of live orders
    pub fn order_count(&self) -> usize {
        self.state.read().orders.len()
    }

    /// Check if the book holds no live orders
    pub fn is_empty(&self) -> bool {
        self.state.read().orders.is_empty()
    }

    /// Total orders ever accepted
    pub fn submission_count(&self) -> usize {
        self.state.read().events.len()
    }

    /// Total successful cancellations
    pub fn cancellation_count(&self) -> u64 {
        self.state.read().cancellations
    }

    /// Live orders selling `token_s`
    pub fn live_orders_selling(&self, token_s: &Address) -> Vec<(OrderId, OrderData)> {
        let state = self.state.read();
        state
            .index
            .iter()
            .filter_map(|(hash, key)| {
                let order = state.orders.get(*key)?;
                (order.token_s == *token_s).then_some((*hash, *order))
            })
            .collect()
    }

    /// SHA-256 digest of all live orders, independent of insertion order
    pub fn state_root(&self) -> [u8; 32] {
        let state = self.state.read();
        let mut hashes: Vec<&OrderId> = state.index.keys().collect();
        hashes.sort_unstable();

        let mut hasher = Sha256::new();
        for hash in hashes {
            hasher.update(hash.as_slice());
        }
        let result = hasher.finalize();

        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }
}

impl OrderLedger for OrderBook {
    fn submit(&self, order: OrderData) -> Result<OrderSubmitted, LedgerError> {
        let order_hash = order.hash();
        let mut state = self.state.write();
        if state.index.contains_key(&order_hash) {
            return Err(LedgerError::DuplicateOrder(order_hash));
        }

        state.block += 1;
        let key = state.orders.insert(order);
        state.index.insert(order_hash, key);

        let event = OrderSubmitted {
            order_hash,
            owner: order.owner,
            token_s: order.token_s,
            block: state.block,
        };
        state.events.push(event);

        info!(%order_hash, token_s = %order.token_s, block = state.block, "order submitted");
        Ok(event)
    }

    fn cancel(&self, order_id: &OrderId) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let key = state
            .index
            .remove(order_id)
            .ok_or(LedgerError::OrderNotFound(*order_id))?;
        state.orders.remove(key);
        state.block += 1;
        state.cancellations += 1;

        debug!(%order_id, block = state.block, "order cancelled");
        Ok(())
    }

    fn exists(&self, order_id: &OrderId) -> bool {
        self.state.read().index.contains_key(order_id)
    }

    fn order_data(&self, order_id: &OrderId) -> Option<OrderData> {
        let state = self.state.read();
        let key = *state.index.get(order_id)?;
        state.orders.get(key).copied()
    }

    fn submitted_since(&self, from_block: u64) -> Vec<OrderSubmitted> {
        let state = self.state.read();
        // Events are appended in block order
        let start = state.events.partition_point(|e| e.block < from_block);
        state.events[start..].to_vec()
    }

    fn block_number(&self) -> u64 {
        self.state.read().block
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
