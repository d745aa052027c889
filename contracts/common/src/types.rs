//! Core Types for the VaultUSD Ledger
//!
//! Fundamental data structures shared by the ledger, token, and
//! normalizer crates.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerResult;
use crate::math;

/// Type alias for addresses (32-byte hash)
pub type Address = [u8; 32];

// ============ Vault Types ============

/// Per-owner record of locked collateral and outstanding debt.
///
/// Presence of a `Vault` in the store is the existence flag: a vault that
/// was liquidated is zeroed in place, never removed, so "created with zero
/// balances" stays distinguishable from "never created".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Vault {
    /// Owner's address
    pub owner: Address,
    /// Native-asset units currently locked (8 decimals)
    pub collateral: u64,
    /// Outstanding sUSD debt (8 decimals)
    pub debt: u64,
}

impl Vault {
    /// Creates a new zero-balance vault
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            collateral: 0,
            debt: 0,
        }
    }

    /// Returns true if the vault has outstanding debt
    pub fn has_debt(&self) -> bool {
        self.debt > 0
    }
}

/// Health classification of a vault at a given price.
///
/// Recomputed fresh from the current price on every call, never cached.
/// `AboveLiquidation` is the intentional 110-150% grace band: the vault can
/// no longer mint or withdraw, but cannot be seized either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum HealthStatus {
    /// At or above the collateralization ratio (or debt-free)
    Healthy,
    /// Below the collateralization ratio but at or above the liquidation
    /// threshold
    AboveLiquidation,
    /// Below the liquidation threshold; seizable by any actor
    Liquidatable,
}

impl HealthStatus {
    /// Classify a `(collateral, debt)` pair against a unit price.
    pub fn classify(collateral: u64, debt: u64, price: u128) -> LedgerResult<Self> {
        if math::is_healthy(collateral, debt, price)? {
            Ok(Self::Healthy)
        } else if math::is_liquidatable(collateral, debt, price)? {
            Ok(Self::Liquidatable)
        } else {
            Ok(Self::AboveLiquidation)
        }
    }
}

// ============ System State ============

/// Aggregate view over every vault in a store, at one price snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SystemState {
    /// Total native-asset units locked across all vaults
    pub total_collateral: u64,
    /// Total outstanding sUSD debt across all vaults
    pub total_debt: u64,
    /// Unit price the aggregate was computed against (SCALE-scaled)
    pub unit_price: u128,
    /// System-wide collateralization ratio, SCALE-scaled; `None` when the
    /// system carries no debt
    pub collateral_ratio: Option<u128>,
}

impl SystemState {
    /// Build the aggregate from totals and a price snapshot.
    pub fn compute(total_collateral: u64, total_debt: u64, unit_price: u128) -> LedgerResult<Self> {
        let collateral_ratio =
            math::collateral_ratio(total_collateral, total_debt, unit_price)?;
        Ok(Self {
            total_collateral,
            total_debt,
            unit_price,
            collateral_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::precision::SCALE;
    use crate::constants::{collateral, token};

    const PRICE_2000: u128 = 2_000 * SCALE;

    #[test]
    fn test_new_vault_is_empty() {
        let vault = Vault::new([1u8; 32]);
        assert_eq!(vault.collateral, 0);
        assert_eq!(vault.debt, 0);
        assert!(!vault.has_debt());
    }

    #[test]
    fn test_classify_debt_free_vault() {
        // Zero debt is vacuously healthy regardless of collateral.
        let status = HealthStatus::classify(0, 0, PRICE_2000).unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[test]
    fn test_classify_grace_band() {
        // 10 units collateral, 10,000 sUSD debt at price 1,300:
        // 130% collateralized - between 110% and 150%.
        let status = HealthStatus::classify(
            10 * collateral::ONE,
            10_000 * token::ONE,
            1_300 * SCALE,
        )
        .unwrap();
        assert_eq!(status, HealthStatus::AboveLiquidation);
    }

    #[test]
    fn test_classify_liquidatable() {
        let status = HealthStatus::classify(
            10 * collateral::ONE,
            10_000 * token::ONE,
            1_000 * SCALE,
        )
        .unwrap();
        assert_eq!(status, HealthStatus::Liquidatable);
    }

    #[test]
    fn test_system_state_debt_free() {
        let state = SystemState::compute(5 * collateral::ONE, 0, PRICE_2000).unwrap();
        assert_eq!(state.collateral_ratio, None);
    }

    #[test]
    fn test_system_state_ratio() {
        // 10 units at 2,000 backing 10,000 sUSD -> 200%.
        let state = SystemState::compute(
            10 * collateral::ONE,
            10_000 * token::ONE,
            PRICE_2000,
        )
        .unwrap();
        assert_eq!(state.collateral_ratio, Some(2 * SCALE));
    }
}
