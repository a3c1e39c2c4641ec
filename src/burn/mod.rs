//! Fee burning: order refresh controller and the fee ledger it draws on.
//!
//! ## Flow
//!
//! 1. Fees in non-LRC tokens accumulate under the burn address
//! 2. [`BurnManager::update_token_order`] keeps one sell order per token,
//!    selling the whole fee balance for LRC at the target price
//! 3. LRC proceeds accumulate under the burn address
//! 4. [`BurnManager::burn_lrc`] destroys them, reducing total supply

pub mod manager;
pub mod vault;

pub use manager::{BurnManager, OrderUpdate};
pub use vault::{BurnReceipt, FeeLedger, FeeVault};
