//! Price Normalizer
//!
//! Converts a raw feed reading into an unsigned fixed-point unit price
//! scaled to 1e18, independent of the feed's native decimal count. The
//! ledger queries this on every price-dependent call; nothing is cached,
//! so two calls made against different feed readings can legitimately
//! disagree on vault health.
//!
//! Scaling is purely multiplicative/divisive by a power of ten. When the
//! source carries more than 18 decimals the divide truncates: the computed
//! price is biased slightly low, which is conservative - vaults appear
//! very slightly less healthy than the literal feed value, never more.

use core::cell::Cell;

use vaultusd_common::constants::precision::TARGET_DECIMALS;
use vaultusd_common::errors::{LedgerError, LedgerResult};

/// A raw price source: the latest signed reading plus its decimal
/// precision. Read synchronously and fully on every price-dependent call;
/// staleness and round metadata are not consulted here.
pub trait PriceFeed {
    /// Latest raw answer and the number of decimals it carries.
    fn latest_answer(&self) -> (i128, u8);
}

/// Normalize a raw signed reading with `decimals` places into a 1e18-scaled
/// unsigned unit price.
///
/// Fails with `InvalidPrice` when the reading is zero or negative, or when
/// truncation would leave a zero price - a non-positive price can never
/// represent a valid exchange rate and must halt all dependent operations
/// rather than propagate a nonsensical ratio.
pub fn normalize_answer(raw: i128, decimals: u8) -> LedgerResult<u128> {
    if raw <= 0 {
        return Err(LedgerError::InvalidPrice { raw });
    }
    let unsigned = raw as u128;

    let price = if decimals <= TARGET_DECIMALS {
        let factor = 10u128
            .checked_pow((TARGET_DECIMALS - decimals) as u32)
            .ok_or(LedgerError::Overflow)?;
        unsigned.checked_mul(factor).ok_or(LedgerError::Overflow)?
    } else {
        let factor = 10u128
            .checked_pow((decimals - TARGET_DECIMALS) as u32)
            .ok_or(LedgerError::Overflow)?;
        unsigned / factor
    };

    if price == 0 {
        return Err(LedgerError::InvalidPrice { raw });
    }
    Ok(price)
}

/// Pure adapter over a feed; holds no mutable state beyond the feed
/// reference itself.
#[derive(Debug, Clone)]
pub struct PriceNormalizer<F: PriceFeed> {
    feed: F,
}

impl<F: PriceFeed> PriceNormalizer<F> {
    /// Wrap a feed.
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Fetch the current reading and normalize it to 1e18 fixed point.
    pub fn unit_price(&self) -> LedgerResult<u128> {
        let (raw, decimals) = self.feed.latest_answer();
        normalize_answer(raw, decimals)
    }

    /// Access the underlying feed.
    pub fn feed(&self) -> &F {
        &self.feed
    }
}

/// A settable in-memory feed, the trusted-operator stand-in used by tests
/// and local deployments.
#[derive(Debug)]
pub struct StaticFeed {
    answer: Cell<i128>,
    decimals: u8,
}

impl StaticFeed {
    /// Create a feed with an initial answer.
    pub fn new(answer: i128, decimals: u8) -> Self {
        Self {
            answer: Cell::new(answer),
            decimals,
        }
    }

    /// Replace the current answer.
    pub fn set_answer(&self, answer: i128) {
        self.answer.set(answer);
    }
}

impl PriceFeed for StaticFeed {
    fn latest_answer(&self) -> (i128, u8) {
        (self.answer.get(), self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultusd_common::constants::precision::SCALE;

    #[test]
    fn test_normalize_eight_decimals() {
        // A Chainlink-style 8-decimal reading of 2,000.
        let price = normalize_answer(2_000_00000000, 8).unwrap();
        assert_eq!(price, 2_000 * SCALE);
    }

    #[test]
    fn test_normalize_eighteen_decimals_identity() {
        let raw = 1_234 * SCALE;
        let price = normalize_answer(raw as i128, 18).unwrap();
        assert_eq!(price, raw);
    }

    #[test]
    fn test_normalize_more_than_eighteen_decimals_truncates() {
        // 20-decimal reading: the two extra digits are dropped, rounding
        // the price down.
        let price = normalize_answer(2_000 * (SCALE as i128) * 100 + 99, 20).unwrap();
        assert_eq!(price, 2_000 * SCALE);
    }

    #[test]
    fn test_normalize_rejects_zero() {
        assert_eq!(
            normalize_answer(0, 8),
            Err(LedgerError::InvalidPrice { raw: 0 })
        );
    }

    #[test]
    fn test_normalize_rejects_negative() {
        assert_eq!(
            normalize_answer(-1, 8),
            Err(LedgerError::InvalidPrice { raw: -1 })
        );
    }

    #[test]
    fn test_normalize_rejects_truncated_to_zero() {
        // Positive reading so small that truncation leaves nothing.
        let result = normalize_answer(1, 40);
        assert_eq!(result, Err(LedgerError::InvalidPrice { raw: 1 }));
    }

    #[test]
    fn test_normalizer_follows_feed() {
        let feed = StaticFeed::new(2_000_00000000, 8);
        let normalizer = PriceNormalizer::new(feed);
        assert_eq!(normalizer.unit_price().unwrap(), 2_000 * SCALE);

        normalizer.feed().set_answer(1_000_00000000);
        assert_eq!(normalizer.unit_price().unwrap(), 1_000 * SCALE);
    }
}
