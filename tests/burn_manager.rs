//! Integration tests for the burn manager against the in-memory ledgers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use fee_burner::burn::{BurnManager, FeeLedger, FeeVault, OrderUpdate};
use fee_burner::config::BurnerConfig;
use fee_burner::error::{BurnError, LedgerError};
use fee_burner::orderbook::{OrderBook, OrderLedger};
use fee_burner::types::{OrderData, OrderId, OrderSubmitted};
use rust_decimal::Decimal;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

fn lrc() -> Address {
    Address::repeat_byte(0x1c)
}

fn weth() -> Address {
    Address::repeat_byte(0x02)
}

fn burn_address() -> Address {
    Address::repeat_byte(0xfe)
}

fn config() -> BurnerConfig {
    BurnerConfig {
        lrc_token: lrc(),
        burn_address: burn_address(),
        order_owner: Address::repeat_byte(0xbb),
        ..BurnerConfig::default()
    }
}

/// Fresh vault with `amount` of WETH and LRC fees owned by the burn address
fn funded_vault(amount: u128) -> Arc<FeeVault> {
    let vault = FeeVault::new();
    vault.register_token(lrc(), 1_000_000 * ONE_TOKEN);
    vault.register_token(weth(), 1_000_000 * ONE_TOKEN);
    vault.deposit_fee(&weth(), &burn_address(), amount).unwrap();
    vault.deposit_fee(&lrc(), &burn_address(), amount).unwrap();
    Arc::new(vault)
}

// ============================================================================
// BURNING
// ============================================================================

#[test]
fn test_burn_lrc_deposited_as_fees() {
    let vault = funded_vault(ONE_TOKEN);
    let manager = BurnManager::new(&config(), Arc::new(OrderBook::new()), Arc::clone(&vault)).unwrap();

    let held_before = vault.holdings(&lrc());
    let balance_before = vault.fee_balance(&lrc(), &burn_address());
    let supply_before = vault.total_supply(&lrc());

    assert_eq!(manager.burn_lrc(), Ok(ONE_TOKEN));

    assert_eq!(vault.holdings(&lrc()), held_before - ONE_TOKEN);
    assert_eq!(vault.fee_balance(&lrc(), &burn_address()), balance_before - ONE_TOKEN);
    assert_eq!(vault.total_supply(&lrc()), supply_before - ONE_TOKEN);

    // Non-LRC fees are untouched
    assert_eq!(vault.fee_balance(&weth(), &burn_address()), ONE_TOKEN);
}

#[test]
fn test_second_burn_has_nothing_to_burn() {
    let vault = funded_vault(ONE_TOKEN);
    let manager = BurnManager::new(&config(), Arc::new(OrderBook::new()), Arc::clone(&vault)).unwrap();

    manager.burn_lrc().unwrap();
    let supply = vault.total_supply(&lrc());

    assert_eq!(manager.burn_lrc(), Err(BurnError::NothingToBurn));
    assert_eq!(vault.total_supply(&lrc()), supply);
}

#[test]
fn test_burn_only_uses_burn_address_balance() {
    let vault = funded_vault(ONE_TOKEN);
    let user = Address::repeat_byte(0x42);
    vault.deposit_fee(&lrc(), &user, 3 * ONE_TOKEN).unwrap();
    let manager = BurnManager::new(&config(), Arc::new(OrderBook::new()), Arc::clone(&vault)).unwrap();

    assert_eq!(manager.burn_lrc(), Ok(ONE_TOKEN));
    assert_eq!(vault.fee_balance(&lrc(), &user), 3 * ONE_TOKEN);
}

// ============================================================================
// ORDER CREATION
// ============================================================================

#[test]
fn test_create_order_selling_non_lrc_token() {
    let book = Arc::new(OrderBook::new());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let from_block = book.block_number();
    manager.update_token_order(&weth(), Decimal::from(500)).unwrap();

    let events = book.submitted_since(from_block);
    assert_eq!(events.len(), 1, "No order was created");

    let order = book.order_data(&events[0].order_hash).unwrap();
    assert_eq!(order.owner, config().order_owner);
    assert_eq!(order.token_s, weth());
    assert_eq!(order.token_b, lrc());
    assert_eq!(order.amount_s, ONE_TOKEN);
    assert_eq!(order.amount_b, 500 * ONE_TOKEN);

    // The stored order round-trips through its encoding and hash
    assert_eq!(OrderData::decode(order.encode().as_bytes()).unwrap(), order);
    assert_eq!(order.hash(), events[0].order_hash);
}

#[test]
fn test_order_updated_when_price_changes() {
    let book = Arc::new(OrderBook::new());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let from_block = book.block_number();
    manager.update_token_order(&weth(), Decimal::from(500)).unwrap();
    let events = book.submitted_since(from_block);
    assert_eq!(events.len(), 1, "No order was created");
    let first = events[0].order_hash;

    manager.update_token_order(&weth(), Decimal::from(400)).unwrap();

    assert!(!book.exists(&first));
    let live = book.live_orders_selling(&weth());
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].1.amount_b, 400 * ONE_TOKEN);
    assert_eq!(manager.current_order(&weth()).unwrap().order_id, live[0].0);
}

#[test]
fn test_repeat_price_submits_once() {
    let book = Arc::new(OrderBook::new());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let first = manager.update_token_order(&weth(), Decimal::from(500)).unwrap();
    let second = manager.update_token_order(&weth(), Decimal::from(500)).unwrap();

    assert!(first.is_submitted());
    assert!(!second.is_submitted());
    assert_eq!(book.submitted_since(0).len(), 1);
    assert_eq!(book.cancellation_count(), 0);
}

#[test]
fn test_order_resized_after_more_fees_arrive() {
    let book = Arc::new(OrderBook::new());
    let vault = funded_vault(ONE_TOKEN);
    let manager = BurnManager::new(&config(), Arc::clone(&book), Arc::clone(&vault)).unwrap();

    manager.update_token_order(&weth(), Decimal::from(500)).unwrap();
    vault.deposit_fee(&weth(), &burn_address(), ONE_TOKEN).unwrap();

    let update = manager.update_token_order(&weth(), Decimal::new(4505, 1)).unwrap();
    let order = update.order();
    assert_eq!(order.amount_to_sell, 2 * ONE_TOKEN);
    assert_eq!(order.amount_to_buy, 901 * ONE_TOKEN);
    assert_eq!(order.implied_price(), Some(45_050_000_000));
}

#[test]
fn test_lrc_cannot_be_sold() {
    let book = Arc::new(OrderBook::new());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    assert_eq!(
        manager.update_token_order(&lrc(), Decimal::ONE),
        Err(BurnError::BurnTokenOrder(lrc()))
    );
    assert!(book.is_empty());
}

// ============================================================================
// LEDGER FAILURES
// ============================================================================

/// Order book wrapper that can fail submissions, fail cancellations or
/// ignore cancellations
#[derive(Default)]
struct FlakyBook {
    inner: OrderBook,
    fail_submit: AtomicBool,
    fail_cancel: AtomicBool,
    ignore_cancel: AtomicBool,
}

impl OrderLedger for FlakyBook {
    fn submit(&self, order: OrderData) -> Result<OrderSubmitted, LedgerError> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("submit rejected".to_string()));
        }
        self.inner.submit(order)
    }

    fn cancel(&self, order_id: &OrderId) -> Result<(), LedgerError> {
        if self.fail_cancel.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("cancel rejected".to_string()));
        }
        if self.ignore_cancel.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.inner.cancel(order_id)
    }

    fn exists(&self, order_id: &OrderId) -> bool {
        self.inner.exists(order_id)
    }

    fn order_data(&self, order_id: &OrderId) -> Option<OrderData> {
        self.inner.order_data(order_id)
    }

    fn submitted_since(&self, from_block: u64) -> Vec<OrderSubmitted> {
        self.inner.submitted_since(from_block)
    }

    fn block_number(&self) -> u64 {
        self.inner.block_number()
    }
}

#[test]
fn test_unconfirmed_cancel_stops_replacement() {
    let book = Arc::new(FlakyBook::default());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let first = *manager.update_token_order(&weth(), Decimal::from(500)).unwrap().order();
    book.ignore_cancel.store(true, Ordering::SeqCst);

    assert_eq!(
        manager.update_token_order(&weth(), Decimal::from(400)),
        Err(BurnError::CancelNotConfirmed(first.order_id))
    );
    // No second order was placed
    assert_eq!(book.inner.live_orders_selling(&weth()).len(), 1);
    assert_eq!(manager.current_order(&weth()), Some(first));
}

#[test]
fn test_failed_cancel_keeps_old_order() {
    let book = Arc::new(FlakyBook::default());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let first = *manager.update_token_order(&weth(), Decimal::from(500)).unwrap().order();
    book.fail_cancel.store(true, Ordering::SeqCst);

    let result = manager.update_token_order(&weth(), Decimal::from(400));
    assert!(matches!(result, Err(BurnError::Ledger(LedgerError::Unavailable(_)))));

    // Nothing was replaced
    assert!(book.exists(&first.order_id));
    assert_eq!(book.inner.live_orders_selling(&weth()).len(), 1);
    assert_eq!(book.inner.submission_count(), 1);
    assert_eq!(manager.current_order(&weth()), Some(first));

    // Once the ledger accepts cancels again the refresh goes through
    book.fail_cancel.store(false, Ordering::SeqCst);
    let update = manager.update_token_order(&weth(), Decimal::from(400)).unwrap();
    assert_eq!(update, OrderUpdate::Submitted { order: *update.order(), cancelled: Some(first.order_id) });
    assert!(!book.exists(&first.order_id));
}

#[test]
fn test_failed_submit_is_recovered_on_next_update() {
    let book = Arc::new(FlakyBook::default());
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    let first = *manager.update_token_order(&weth(), Decimal::from(500)).unwrap().order();
    book.fail_submit.store(true, Ordering::SeqCst);

    let result = manager.update_token_order(&weth(), Decimal::from(400));
    assert!(matches!(result, Err(BurnError::Ledger(LedgerError::Unavailable(_)))));
    // The cancel went through, the tracked order is now dead
    assert!(!book.exists(&first.order_id));
    assert_eq!(manager.current_order(&weth()), Some(first));

    book.fail_submit.store(false, Ordering::SeqCst);
    let update = manager.update_token_order(&weth(), Decimal::from(400)).unwrap();

    assert_eq!(update, OrderUpdate::Submitted { order: *update.order(), cancelled: None });
    assert_eq!(book.inner.live_orders_selling(&weth()).len(), 1);
    assert_eq!(book.inner.cancellation_count(), 1);
}

#[test]
fn test_failed_first_submit_tracks_nothing() {
    let book = Arc::new(FlakyBook::default());
    book.fail_submit.store(true, Ordering::SeqCst);
    let manager = BurnManager::new(&config(), Arc::clone(&book), funded_vault(ONE_TOKEN)).unwrap();

    assert!(manager.update_token_order(&weth(), Decimal::from(500)).is_err());
    assert!(manager.current_order(&weth()).is_none());
    assert!(manager.tracked_assets().is_empty());
}
