//! Price quotes from the relay and their conversion into burn-token prices.
//!
//! The relay reports every token in a common fiat currency (USD). The burn
//! manager needs prices in the burn token instead:
//!
//! ```text
//! price_in_base(token) = token_price / base_price
//! ```
//!
//! i.e. how many base tokens one unit of `token` is worth, which is the
//! target price [`crate::burn::BurnManager::update_token_order`] expects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::QuoteError;

/// One entry of a relay price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Token symbol, e.g. "WETH"
    pub symbol: String,
    /// Price in the quote currency
    pub price: Decimal,
}

/// A token price expressed in the base token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    /// Token symbol
    pub symbol: String,
    /// Price in units of the base token
    pub price: Decimal,
}

/// Source of fiat price quotes (the relay RPC in production).
pub trait PriceSource {
    /// Quotes for every supported token in `currency`
    fn quote(&self, currency: &str) -> Result<Vec<PriceQuote>, QuoteError>;
}

/// Convert fiat quotes into prices denominated in `base`.
///
/// The base token itself is left out of the result. Tokens with a zero or
/// negative fiat price cannot be converted and are skipped.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use fee_burner::types::{prices_in, PriceQuote};
///
/// let quotes = vec![
///     PriceQuote { symbol: "LRC".into(), price: Decimal::new(10, 2) },
///     PriceQuote { symbol: "WETH".into(), price: Decimal::new(200, 0) },
/// ];
/// let prices = prices_in("LRC", &quotes).unwrap();
///
/// assert_eq!(prices.len(), 1);
/// assert_eq!(prices[0].symbol, "WETH");
/// assert_eq!(prices[0].price, Decimal::new(2000, 0));
/// ```
pub fn prices_in(base: &str, quotes: &[PriceQuote]) -> Result<Vec<TokenPrice>, QuoteError> {
    let base_price = quotes
        .iter()
        .find(|q| q.symbol == base)
        .map(|q| q.price)
        .ok_or_else(|| QuoteError::MissingBase(base.to_string()))?;
    if base_price <= Decimal::ZERO {
        return Err(QuoteError::InvalidBase(base.to_string()));
    }

    let prices = quotes
        .iter()
        .filter(|q| q.symbol != base)
        .filter_map(|q| {
            if q.price <= Decimal::ZERO {
                warn!(symbol = %q.symbol, price = %q.price, "skipping token without a usable price");
                return None;
            }
            q.price.checked_div(base_price).map(|ratio| TokenPrice {
                symbol: q.symbol.clone(),
                price: ratio,
            })
        })
        .collect();
    Ok(prices)
}

/// Fetch quotes in `currency` and convert them into `base` prices.
pub fn fetch_prices_in<S: PriceSource + ?Sized>(
    source: &S,
    currency: &str,
    base: &str,
) -> Result<Vec<TokenPrice>, QuoteError> {
    let quotes = source.quote(currency)?;
    prices_in(base, &quotes)
}
