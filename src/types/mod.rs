//! Core data types for the fee burner
//!
//! ## Types
//!
//! - [`OrderData`]: An order as the ledger stores it
//! - [`OrderSubmitted`]: Ledger notification for an accepted order
//! - [`SellOrder`]: The burn manager's live order for one asset
//! - [`PriceQuote`] / [`TokenPrice`]: Relay quotes and converted prices
//!
//! ## Fixed-Point Arithmetic
//!
//! Target prices are stored as `u64` scaled by 10^8 (see [`price`]).
//! Token amounts are raw `u128` base units.

mod order;
mod quote;
pub mod price;

pub use order::{OrderData, OrderId, OrderSubmitted, SellOrder, ORDER_DATA_LEN};
pub use quote::{fetch_prices_in, prices_in, PriceQuote, PriceSource, TokenPrice};
