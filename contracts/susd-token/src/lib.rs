//! sUSD Token Ledger
//!
//! Pure in-memory balance ledger for the sUSD liability token.
//!
//! ## Key Features
//! - Capability-gated supply changes: only the configured minter address
//!   may mint or burn
//! - Checked arithmetic on every balance and supply mutation
//! - Plain transfers between holders, used to fund liquidators in tests
//!   and local deployments
//!
//! sUSD only enters circulation through vault debt and only leaves it
//! through repayment or liquidation, so the authorized minter is the vault
//! ledger's own identity address.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use vaultusd_common::constants::token;
use vaultusd_common::errors::{LedgerError, LedgerResult};
use vaultusd_common::types::Address;

extern crate alloc;
use alloc::collections::BTreeMap;

// ============ Token State ============

/// Balance ledger for sUSD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SusdToken {
    /// Per-holder balances (8 decimals)
    balances: BTreeMap<Address, u64>,
    /// Total sUSD in circulation
    total_supply: u64,
    /// The single address allowed to mint and burn
    authorized_minter: Address,
}

impl SusdToken {
    /// Creates an empty ledger with the given minter capability.
    pub fn new(authorized_minter: Address) -> Self {
        Self {
            balances: BTreeMap::new(),
            total_supply: 0,
            authorized_minter,
        }
    }

    // ============ Metadata ============

    /// Token name
    pub fn name(&self) -> &'static str {
        token::NAME
    }

    /// Token symbol
    pub fn symbol(&self) -> &'static str {
        token::SYMBOL
    }

    /// Decimal places
    pub fn decimals(&self) -> u8 {
        token::DECIMALS
    }

    // ============ Queries ============

    /// Balance of an account; zero for accounts never seen.
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Total sUSD in circulation.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// The address holding the mint/burn capability.
    pub fn authorized_minter(&self) -> &Address {
        &self.authorized_minter
    }

    // ============ Supply Changes ============

    /// Mints `amount` sUSD to `to`. Only the authorized minter may call.
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        if caller != &self.authorized_minter {
            return Err(LedgerError::MintUnauthorized { caller: *caller });
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self.balance_of(to);
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(*to, new_balance);
        Ok(())
    }

    /// Burns `amount` sUSD from `from`. Only the authorized minter may
    /// call; fails if the holder's balance cannot cover the burn.
    pub fn burn(&mut self, caller: &Address, from: &Address, amount: u64) -> LedgerResult<()> {
        if caller != &self.authorized_minter {
            return Err(LedgerError::BurnUnauthorized { caller: *caller });
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                available: balance,
                requested: amount,
            });
        }

        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*from, balance - amount);
        Ok(())
    }

    // ============ Transfers ============

    /// Moves `amount` sUSD from one holder to another.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                available: from_balance,
                requested: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINTER: Address = [0xAAu8; 32];
    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];

    fn token_with_minter() -> SusdToken {
        SusdToken::new(MINTER)
    }

    #[test]
    fn test_metadata() {
        let t = token_with_minter();
        assert_eq!(t.name(), "sUSD");
        assert_eq!(t.symbol(), "sUSD");
        assert_eq!(t.decimals(), 8);
        assert_eq!(t.total_supply(), 0);
    }

    #[test]
    fn test_mint_increases_balance_and_supply() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, 10_000 * token::ONE).unwrap();
        assert_eq!(t.balance_of(&ALICE), 10_000 * token::ONE);
        assert_eq!(t.total_supply(), 10_000 * token::ONE);
    }

    #[test]
    fn test_mint_requires_capability() {
        let mut t = token_with_minter();
        let result = t.mint(&ALICE, &ALICE, token::ONE);
        assert_eq!(result, Err(LedgerError::MintUnauthorized { caller: ALICE }));
        assert_eq!(t.total_supply(), 0);
    }

    #[test]
    fn test_burn_requires_capability() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, token::ONE).unwrap();
        let result = t.burn(&ALICE, &ALICE, token::ONE);
        assert_eq!(result, Err(LedgerError::BurnUnauthorized { caller: ALICE }));
        assert_eq!(t.balance_of(&ALICE), token::ONE);
    }

    #[test]
    fn test_burn_reduces_balance_and_supply() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, 500 * token::ONE).unwrap();
        t.burn(&MINTER, &ALICE, 200 * token::ONE).unwrap();
        assert_eq!(t.balance_of(&ALICE), 300 * token::ONE);
        assert_eq!(t.total_supply(), 300 * token::ONE);
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, 100 * token::ONE).unwrap();
        let result = t.burn(&MINTER, &ALICE, 101 * token::ONE);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                available: 100 * token::ONE,
                requested: 101 * token::ONE,
            })
        );
    }

    #[test]
    fn test_zero_amounts_rejected() {
        let mut t = token_with_minter();
        assert_eq!(t.mint(&MINTER, &ALICE, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(t.burn(&MINTER, &ALICE, 0), Err(LedgerError::ZeroAmount));
        assert_eq!(t.transfer(&ALICE, &BOB, 0), Err(LedgerError::ZeroAmount));
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, 1_000 * token::ONE).unwrap();
        t.transfer(&ALICE, &BOB, 400 * token::ONE).unwrap();
        assert_eq!(t.balance_of(&ALICE), 600 * token::ONE);
        assert_eq!(t.balance_of(&BOB), 400 * token::ONE);
        assert_eq!(t.total_supply(), 1_000 * token::ONE);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut t = token_with_minter();
        let result = t.transfer(&ALICE, &BOB, token::ONE);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                available: 0,
                requested: token::ONE,
            })
        );
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, token::ONE).unwrap();
        t.transfer(&ALICE, &ALICE, token::ONE).unwrap();
        assert_eq!(t.balance_of(&ALICE), token::ONE);
    }

    #[test]
    fn test_mint_overflow_leaves_state_untouched() {
        let mut t = token_with_minter();
        t.mint(&MINTER, &ALICE, u64::MAX).unwrap();
        let result = t.mint(&MINTER, &BOB, 1);
        assert_eq!(result, Err(LedgerError::Overflow));
        assert_eq!(t.total_supply(), u64::MAX);
        assert_eq!(t.balance_of(&BOB), 0);
    }
}
