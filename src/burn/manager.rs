//! Burn manager: keeps one sell order per fee asset and burns the proceeds.
//!
//! ## Order refresh
//!
//! Each asset moves between two states, no order and one live order. A
//! refresh at the price the live order already carries is a no-op. Any other
//! refresh sizes a new order from the current fee balance, cancels the old
//! order, confirms the cancel with the ledger and submits the replacement.
//!
//! ## Locking
//!
//! - **Per asset**: a `parking_lot::Mutex` held for the whole refresh, so two
//!   refreshes of one asset never interleave their cancel and submit
//! - **Across assets**: slots live in a `DashMap`, distinct assets refresh
//!   concurrently
//! - **Burn**: `burn_lrc` runs under its own mutex

use std::sync::Arc;

use alloy_primitives::Address;
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::burn::FeeLedger;
use crate::config::BurnerConfig;
use crate::error::{BurnError, BurnResult, ConfigError};
use crate::orderbook::OrderLedger;
use crate::types::price::{decimal_to_fixed, scale_amount};
use crate::types::{OrderData, OrderId, SellOrder};

type OrderSlot = Arc<Mutex<Option<SellOrder>>>;

/// Outcome of [`BurnManager::update_token_order`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderUpdate {
    /// The live order already carries the target price
    Unchanged(SellOrder),
    /// A new order was submitted
    Submitted {
        /// The order now live for the asset
        order: SellOrder,
        /// Order cancelled to make room for it, if one was live
        cancelled: Option<OrderId>,
    },
}

impl OrderUpdate {
    /// The order live for the asset after the update
    pub fn order(&self) -> &SellOrder {
        match self {
            OrderUpdate::Unchanged(order) => order,
            OrderUpdate::Submitted { order, .. } => order,
        }
    }

    /// Check if the update wrote to the ledger
    pub fn is_submitted(&self) -> bool {
        matches!(self, OrderUpdate::Submitted { .. })
    }
}

/// Order refresh controller and burn trigger.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
///
/// use alloy_primitives::Address;
/// use fee_burner::burn::{BurnManager, FeeVault};
/// use fee_burner::config::BurnerConfig;
/// use fee_burner::orderbook::OrderBook;
/// use rust_decimal::Decimal;
///
/// let config = BurnerConfig {
///     burn_address: Address::repeat_byte(0xfe),
///     order_owner: Address::repeat_byte(0xbb),
///     ..BurnerConfig::default()
/// };
/// let weth = Address::repeat_byte(0x02);
///
/// let vault = Arc::new(FeeVault::new());
/// vault.register_token(weth, 1_000_000);
/// vault.deposit_fee(&weth, &config.burn_address, 1_000).unwrap();
///
/// let manager = BurnManager::new(&config, Arc::new(OrderBook::new()), vault).unwrap();
/// let update = manager.update_token_order(&weth, Decimal::from(400)).unwrap();
/// assert_eq!(update.order().amount_to_buy, 400_000);
/// ```
pub struct BurnManager<L, F> {
    lrc_token: Address,
    burn_address: Address,
    order_owner: Address,
    ledger: Arc<L>,
    fees: Arc<F>,
    orders: DashMap<Address, OrderSlot>,
    burn_lock: Mutex<()>,
}

impl<L: OrderLedger, F: FeeLedger> BurnManager<L, F> {
    /// Create a manager over the given ledgers
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError::Invalid)` - If `config` fails validation
    pub fn new(config: &BurnerConfig, ledger: Arc<L>, fees: Arc<F>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lrc_token: config.lrc_token,
            burn_address: config.burn_address,
            order_owner: config.order_owner,
            ledger,
            fees,
            orders: DashMap::new(),
            burn_lock: Mutex::new(()),
        })
    }

    /// Token bought with fees and burned
    pub fn lrc_token(&self) -> Address {
        self.lrc_token
    }

    /// Owner of the fee balances this manager sells and burns
    pub fn burn_address(&self) -> Address {
        self.burn_address
    }

    /// Order ledger orders are placed on
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Fee ledger balances are read from
    pub fn fees(&self) -> &Arc<F> {
        &self.fees
    }

    // ========================================================================
    // Order Refresh
    // ========================================================================

    /// Bring the sell order for `asset` in line with `target_price`.
    ///
    /// `target_price` is the amount of LRC one unit of `asset` should buy.
    ///
    /// # Arguments
    ///
    /// * `asset` - Token to sell, never the LRC token itself
    /// * `target_price` - Strictly positive, at most 8 decimal places are kept
    ///
    /// # Returns
    ///
    /// * `Ok(OrderUpdate::Unchanged)` - The live order already has this price
    /// * `Ok(OrderUpdate::Submitted)` - A replacement order is live
    /// * `Err(BurnError)` - Validation, sizing or ledger failure; the tracked
    ///   order is left as it was
    pub fn update_token_order(&self, asset: &Address, target_price: Decimal) -> BurnResult<OrderUpdate> {
        if *asset == self.lrc_token {
            return Err(BurnError::BurnTokenOrder(*asset));
        }
        let price = decimal_to_fixed(target_price)
            .filter(|p| *p > 0)
            .ok_or_else(|| BurnError::InvalidPrice(target_price.to_string()))?;

        let slot = self.slot(asset);
        let mut current = slot.lock();

        // A tracked order that has left the ledger no longer needs a cancel
        let live = (*current).filter(|old| self.ledger.exists(&old.order_id));
        if let Some(old) = live {
            if old.price == price {
                debug!(%asset, price, order_id = %old.order_id, "order already at target price");
                return Ok(OrderUpdate::Unchanged(old));
            }
        }

        let amount_to_sell = self.fees.fee_balance(asset, &self.burn_address);
        if amount_to_sell == 0 {
            return Err(BurnError::NothingToSell(*asset));
        }
        let amount_to_buy = scale_amount(amount_to_sell, price).ok_or(BurnError::AmountOverflow(*asset))?;
        if amount_to_buy == 0 {
            return Err(BurnError::DegenerateOrder { asset: *asset, price });
        }

        let cancelled = match live {
            Some(old) => {
                self.ledger.cancel(&old.order_id)?;
                if self.ledger.exists(&old.order_id) {
                    return Err(BurnError::CancelNotConfirmed(old.order_id));
                }
                info!(%asset, order_id = %old.order_id, old_price = old.price, "sell order cancelled");
                Some(old.order_id)
            }
            None => None,
        };

        let data = OrderData {
            owner: self.order_owner,
            token_s: *asset,
            token_b: self.lrc_token,
            amount_s: amount_to_sell,
            amount_b: amount_to_buy,
            valid_since: self.ledger.block_number(),
        };
        let submitted = self.ledger.submit(data)?;

        let order = SellOrder {
            asset: *asset,
            amount_to_sell,
            amount_to_buy,
            price,
            order_id: submitted.order_hash,
            submitted_at_block: submitted.block,
        };
        *current = Some(order);

        info!(
            %asset,
            price,
            amount_to_sell,
            amount_to_buy,
            order_id = %order.order_id,
            "sell order submitted"
        );
        Ok(OrderUpdate::Submitted { order, cancelled })
    }

    /// Order last submitted for `asset`, if any
    ///
    /// The order may since have been filled or cancelled on the ledger.
    pub fn current_order(&self, asset: &Address) -> Option<SellOrder> {
        let slot = self.orders.get(asset).map(|entry| Arc::clone(entry.value()))?;
        let order = *slot.lock();
        order
    }

    /// Assets with a tracked order
    pub fn tracked_assets(&self) -> Vec<Address> {
        let slots: Vec<(Address, OrderSlot)> = self
            .orders
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut assets: Vec<Address> = slots
            .into_iter()
            .filter(|(_, slot)| slot.lock().is_some())
            .map(|(asset, _)| asset)
            .collect();
        assets.sort_unstable();
        assets
    }

    fn slot(&self, asset: &Address) -> OrderSlot {
        // Clone out so the map shard is released before the slot is locked
        Arc::clone(self.orders.entry(*asset).or_default().value())
    }

    // ========================================================================
    // Burn
    // ========================================================================

    /// Burn the entire LRC fee balance of the burn address.
    ///
    /// # Returns
    ///
    /// * `Ok(amount)` - Amount burned; balance and supply both fell by it
    /// * `Err(BurnError::NothingToBurn)` - The balance is zero
    /// * `Err(BurnError::ConservationViolation)` - The ledger's burn receipt
    ///   shows balance or supply moving by anything but `amount`
    pub fn burn_lrc(&self) -> BurnResult<u128> {
        let _guard = self.burn_lock.lock();

        let amount = self.fees.fee_balance(&self.lrc_token, &self.burn_address);
        if amount == 0 {
            return Err(BurnError::NothingToBurn);
        }
        let receipt = self.fees.burn(&self.lrc_token, &self.burn_address, amount)?;
        let balance_delta = receipt.balance_delta();
        let supply_delta = receipt.supply_delta();

        if balance_delta != amount || supply_delta != amount {
            error!(
                burned = amount,
                balance_delta,
                supply_delta,
                "burn did not conserve balance and supply"
            );
            return Err(BurnError::ConservationViolation {
                burned: amount,
                balance_delta,
                supply_delta,
            });
        }

        info!(amount, supply = receipt.supply_after, "lrc burned");
        Ok(amount)
    }
}

impl<L, F> std::fmt::Debug for BurnManager<L, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BurnManager")
            .field("lrc_token", &self.lrc_token)
            .field("burn_address", &self.burn_address)
            .field("order_owner", &self.order_owner)
            .field("tracked", &self.orders.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
