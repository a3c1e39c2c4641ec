//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Target prices are stored as u64 scaled by 10^8: the number of burn tokens
//! (LRC) one whole unit of the sold asset should fetch. Token amounts are raw
//! `u128` base units, so the price is dimensionless with respect to decimals.
//!
//! ## Scaling Policy
//!
//! ```text
//! amount_to_buy = floor(amount_to_sell * price / SCALE)
//! ```
//!
//! Rounding is always toward zero so an order never asks for more than the
//! target ratio allows.
//!
//! ## Examples
//!
//! ```
//! use fee_burner::types::price::{to_fixed, from_fixed, scale_amount};
//!
//! let price = to_fixed("500").unwrap();
//! assert_eq!(price, 50_000_000_000);
//! assert_eq!(from_fixed(price), "500.00000000");
//!
//! // 1e18 base units sold at 500 buy 5e20 base units
//! assert_eq!(scale_amount(1_000_000_000_000_000_000, price), Some(500_000_000_000_000_000_000));
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If parsing fails or value is out of range
///
/// # Example
///
/// ```
/// use fee_burner::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Digits beyond the eighth decimal place are rounded (banker's rounding).
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If value is negative or out of range
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use fee_burner::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(40_000_000_000), "400.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

// ============================================================================
// Order Sizing
// ============================================================================

/// Apply a fixed-point price to a raw token amount
///
/// # Returns
///
/// * `Some(u128)` - `floor(amount * price / SCALE)`
/// * `None` - If the intermediate product overflows
pub fn scale_amount(amount: u128, price: u64) -> Option<u128> {
    let scale = u128::from(SCALE);
    let price = u128::from(price);

    // Split to keep the product in range for large balances:
    // amount * price / SCALE = (q * SCALE + r) * price / SCALE = q * price + r * price / SCALE
    let (q, r) = (amount / scale, amount % scale);
    q.checked_mul(price)?.checked_add(r * price / scale)
}

/// Fixed-point ratio implied by a pair of order amounts
///
/// # Returns
///
/// * `Some(u64)` - `floor(amount_to_buy * SCALE / amount_to_sell)`
/// * `None` - If `amount_to_sell` is zero or the ratio exceeds u64
///
/// # Example
///
/// ```
/// use fee_burner::types::price::{implied_price, to_fixed};
///
/// assert_eq!(implied_price(2, 800), to_fixed("400"));
/// assert_eq!(implied_price(0, 800), None);
/// ```
pub fn implied_price(amount_to_sell: u128, amount_to_buy: u128) -> Option<u64> {
    if amount_to_sell == 0 {
        return None;
    }
    let sell = Decimal::from_u128(amount_to_sell)?;
    let buy = Decimal::from_u128(amount_to_buy)?;
    let ratio = buy.checked_div(sell)?;
    ratio.checked_mul(Decimal::from(SCALE))?.floor().to_u64()
}

// ============================================================================
// Unit Tests
// ============================================================================
