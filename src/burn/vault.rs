//! Fee ledger interface and an in-memory fee vault.
//!
//! The vault holds tokens collected as fees and attributes them to owners.
//! Fees attributed to the vault's burn address are what the burn manager
//! sells (non-burn tokens) or burns (the burn token).

use std::collections::HashMap;

use alloy_primitives::Address;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::LedgerError;

/// Balances around one burn, captured atomically with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnReceipt {
    /// Owner's fee balance before the burn
    pub balance_before: u128,
    /// Owner's fee balance after the burn
    pub balance_after: u128,
    /// Total supply before the burn
    pub supply_before: u128,
    /// Total supply after the burn
    pub supply_after: u128,
}

impl BurnReceipt {
    /// Decrease of the fee balance
    pub fn balance_delta(&self) -> u128 {
        self.balance_before.saturating_sub(self.balance_after)
    }

    /// Decrease of total supply
    pub fn supply_delta(&self) -> u128 {
        self.supply_before.saturating_sub(self.supply_after)
    }
}

/// Value-holding ledger the burn manager reads balances from and burns through.
pub trait FeeLedger: Send + Sync {
    /// Fee balance of `token` attributed to `owner`
    fn fee_balance(&self, token: &Address, owner: &Address) -> u128;

    /// Amount of `token` physically held by the ledger
    fn holdings(&self, token: &Address) -> u128;

    /// Circulating supply of `token`
    fn total_supply(&self, token: &Address) -> u128;

    /// Withdraw `amount` of `owner`'s `token` fees and destroy it.
    ///
    /// Fee balance, holdings and total supply all drop by `amount`, or
    /// nothing changes. The receipt is taken in the same atomic step, so
    /// later writes never show up in it.
    fn burn(&self, token: &Address, owner: &Address, amount: u128) -> Result<BurnReceipt, LedgerError>;
}

#[derive(Debug, Default)]
struct VaultState {
    /// (token, owner) -> attributed fee balance
    fee_balances: HashMap<(Address, Address), u128>,

    /// token -> amount held by the vault
    holdings: HashMap<Address, u128>,

    /// token -> circulating supply
    supply: HashMap<Address, u128>,
}

/// In-memory fee vault.
///
/// ## Example
///
/// ```
/// use alloy_primitives::Address;
/// use fee_burner::burn::{FeeLedger, FeeVault};
///
/// let lrc = Address::repeat_byte(0x1c);
/// let burn = Address::repeat_byte(0xfe);
///
/// let vault = FeeVault::new();
/// vault.register_token(lrc, 1_000);
/// vault.deposit_fee(&lrc, &burn, 400).unwrap();
///
/// vault.burn(&lrc, &burn, 400).unwrap();
/// assert_eq!(vault.total_supply(&lrc), 600);
/// assert_eq!(vault.fee_balance(&lrc, &burn), 0);
/// ```
#[derive(Debug, Default)]
pub struct FeeVault {
    state: RwLock<VaultState>,
}

impl FeeVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the circulating supply of a token
    pub fn register_token(&self, token: Address, total_supply: u128) {
        self.state.write().supply.insert(token, total_supply);
    }

    /// Move `amount` of circulating `token` into the vault as `owner`'s fees
    pub fn deposit_fee(&self, token: &Address, owner: &Address, amount: u128) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let supply = state.supply.get(token).copied().unwrap_or(0);
        let held = state.holdings.get(token).copied().unwrap_or(0);

        let new_held = held
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { token: *token })?;
        if new_held > supply {
            return Err(LedgerError::InsufficientBalance {
                token: *token,
                requested: amount,
                available: supply - held,
            });
        }

        let balance = state.fee_balances.entry((*token, *owner)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { token: *token })?;
        state.holdings.insert(*token, new_held);
        Ok(())
    }
}

impl FeeLedger for FeeVault {
    fn fee_balance(&self, token: &Address, owner: &Address) -> u128 {
        self.state
            .read()
            .fee_balances
            .get(&(*token, *owner))
            .copied()
            .unwrap_or(0)
    }

    fn holdings(&self, token: &Address) -> u128 {
        self.state.read().holdings.get(token).copied().unwrap_or(0)
    }

    fn total_supply(&self, token: &Address) -> u128 {
        self.state.read().supply.get(token).copied().unwrap_or(0)
    }

    fn burn(&self, token: &Address, owner: &Address, amount: u128) -> Result<BurnReceipt, LedgerError> {
        let mut state = self.state.write();
        let balance = state.fee_balances.get(&(*token, *owner)).copied().unwrap_or(0);
        let held = state.holdings.get(token).copied().unwrap_or(0);
        let supply = state.supply.get(token).copied().unwrap_or(0);

        // The smallest of the three bounds what can be burned
        let available = balance.min(held).min(supply);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                token: *token,
                requested: amount,
                available,
            });
        }

        state.fee_balances.insert((*token, *owner), balance - amount);
        state.holdings.insert(*token, held - amount);
        state.supply.insert(*token, supply - amount);

        debug!(%token, %owner, amount, "fees burned");
        Ok(BurnReceipt {
            balance_before: balance,
            balance_after: balance - amount,
            supply_before: supply,
            supply_after: supply - amount,
        })
    }
}
