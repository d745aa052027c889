//! Fixed-Point Health Math
//!
//! Safe arithmetic for the ratio contract. Collateral and debt amounts are
//! u64 base units (8 decimals); unit prices and ratios are u128 integers
//! scaled by 1e18. All intermediates widen to u128 with checked operations.
//!
//! The health and liquidation predicates compare cross-multiplied terms
//! (`collateral * price` against `debt * ratio`), which is exact - no
//! truncation on the predicate path. Division appears only in the max-debt
//! and ratio queries, where integer truncation rounds down: the computed
//! value is biased slightly low, which is conservative - a vault can only
//! ever look less healthy than the literal feed value, never more.

use crate::constants::ratios::{COLLATERALIZATION_RATIO, LIQUIDATION_THRESHOLD};
use crate::errors::{LedgerError, LedgerResult};

/// Health predicate: `debt == 0` is vacuously healthy; otherwise
/// `collateral * price >= debt * COLLATERALIZATION_RATIO / SCALE`.
pub fn is_healthy(collateral: u64, debt: u64, price: u128) -> LedgerResult<bool> {
    if debt == 0 {
        return Ok(true);
    }
    let value = (collateral as u128)
        .checked_mul(price)
        .ok_or(LedgerError::Overflow)?;
    let required = (debt as u128)
        .checked_mul(COLLATERALIZATION_RATIO)
        .ok_or(LedgerError::Overflow)?;
    Ok(value >= required)
}

/// Liquidation predicate: `debt == 0` is never liquidatable; otherwise
/// `collateral * price < debt * LIQUIDATION_THRESHOLD / SCALE`. Strict
/// `<`: a vault sitting exactly on the threshold is not yet seizable; one
/// base unit below, it is.
pub fn is_liquidatable(collateral: u64, debt: u64, price: u128) -> LedgerResult<bool> {
    if debt == 0 {
        return Ok(false);
    }
    let value = (collateral as u128)
        .checked_mul(price)
        .ok_or(LedgerError::Overflow)?;
    let floor = (debt as u128)
        .checked_mul(LIQUIDATION_THRESHOLD)
        .ok_or(LedgerError::Overflow)?;
    Ok(value < floor)
}

/// Maximum debt mintable against the given collateral:
/// `collateral * price / COLLATERALIZATION_RATIO`, truncating (rounds
/// down). Monotonic non-decreasing in both price and collateral.
pub fn max_debt_for_collateral(collateral: u64, price: u128) -> LedgerResult<u64> {
    let max_debt = (collateral as u128)
        .checked_mul(price)
        .ok_or(LedgerError::Overflow)?
        / COLLATERALIZATION_RATIO;
    u64::try_from(max_debt).map_err(|_| LedgerError::Overflow)
}

/// Collateralization ratio of a `(collateral, debt)` pair, SCALE-scaled;
/// `None` for a debt-free position.
pub fn collateral_ratio(
    collateral: u64,
    debt: u64,
    price: u128,
) -> LedgerResult<Option<u128>> {
    if debt == 0 {
        return Ok(None);
    }
    let ratio = (collateral as u128)
        .checked_mul(price)
        .ok_or(LedgerError::Overflow)?
        / debt as u128;
    Ok(Some(ratio))
}

/// Safe addition with overflow check
pub fn safe_add(a: u64, b: u64) -> LedgerResult<u64> {
    a.checked_add(b).ok_or(LedgerError::Overflow)
}

/// Safe subtraction with underflow check
pub fn safe_sub(a: u64, b: u64) -> LedgerResult<u64> {
    a.checked_sub(b).ok_or(LedgerError::Overflow)
}
