//! Vault Store
//!
//! Keyed storage for vault records. Map presence doubles as the existence
//! flag: liquidation zeroes a vault in place but never removes it, so an
//! owner who was liquidated can deposit again without re-creating.
//!
//! `owners` is append-only and records creation order, giving deterministic
//! iteration for aggregates and the liquidation scan.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use vaultusd_common::errors::{LedgerError, LedgerResult};
use vaultusd_common::math;
use vaultusd_common::types::{Address, Vault};
use vaultusd_common::Vec;

extern crate alloc;
use alloc::collections::BTreeMap;

/// All vault records, keyed by owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct VaultStore {
    vaults: BTreeMap<Address, Vault>,
    owners: Vec<Address>,
}

impl VaultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero-balance vault for `owner`. Creation is not
    /// idempotent: a second call for the same owner fails even if the
    /// vault was later liquidated.
    pub fn create(&mut self, owner: Address) -> LedgerResult<&Vault> {
        if self.vaults.contains_key(&owner) {
            return Err(LedgerError::AlreadyExists { owner });
        }
        self.owners.push(owner);
        Ok(self.vaults.entry(owner).or_insert_with(|| Vault::new(owner)))
    }

    /// Looks up the vault for `owner`.
    pub fn get(&self, owner: &Address) -> LedgerResult<&Vault> {
        self.vaults
            .get(owner)
            .ok_or(LedgerError::NoSuchVault { owner: *owner })
    }

    /// Mutable lookup for `owner`.
    pub fn get_mut(&mut self, owner: &Address) -> LedgerResult<&mut Vault> {
        self.vaults
            .get_mut(owner)
            .ok_or(LedgerError::NoSuchVault { owner: *owner })
    }

    /// Whether a vault has ever been created for `owner`.
    pub fn contains(&self, owner: &Address) -> bool {
        self.vaults.contains_key(owner)
    }

    /// Owners in creation order.
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Iterates vaults in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Vault> {
        self.owners.iter().filter_map(|owner| self.vaults.get(owner))
    }

    /// Number of vaults ever created.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no vault has ever been created.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// System-wide `(total_collateral, total_debt)` across all vaults.
    pub fn totals(&self) -> LedgerResult<(u64, u64)> {
        let mut total_collateral = 0u64;
        let mut total_debt = 0u64;
        for vault in self.iter() {
            total_collateral = math::safe_add(total_collateral, vault.collateral)?;
            total_debt = math::safe_add(total_debt, vault.debt)?;
        }
        Ok((total_collateral, total_debt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];

    #[test]
    fn test_create_and_get() {
        let mut store = VaultStore::new();
        store.create(ALICE).unwrap();

        let vault = store.get(&ALICE).unwrap();
        assert_eq!(vault.owner, ALICE);
        assert_eq!(vault.collateral, 0);
        assert_eq!(vault.debt, 0);
    }

    #[test]
    fn test_create_is_not_idempotent() {
        let mut store = VaultStore::new();
        store.create(ALICE).unwrap();
        let result = store.create(ALICE);
        assert_eq!(result.map(|_| ()), Err(LedgerError::AlreadyExists { owner: ALICE }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_vault() {
        let store = VaultStore::new();
        assert_eq!(
            store.get(&ALICE).map(|_| ()),
            Err(LedgerError::NoSuchVault { owner: ALICE })
        );
    }

    #[test]
    fn test_owners_in_creation_order() {
        let mut store = VaultStore::new();
        store.create(BOB).unwrap();
        store.create(ALICE).unwrap();
        assert_eq!(store.owners(), &[BOB, ALICE]);
    }

    #[test]
    fn test_zeroed_vault_still_exists() {
        let mut store = VaultStore::new();
        store.create(ALICE).unwrap();
        {
            let vault = store.get_mut(&ALICE).unwrap();
            vault.collateral = 0;
            vault.debt = 0;
        }
        assert!(store.contains(&ALICE));
        assert!(store.get(&ALICE).is_ok());
    }

    #[test]
    fn test_totals() {
        let mut store = VaultStore::new();
        store.create(ALICE).unwrap();
        store.create(BOB).unwrap();
        store.get_mut(&ALICE).unwrap().collateral = 10;
        store.get_mut(&ALICE).unwrap().debt = 4;
        store.get_mut(&BOB).unwrap().collateral = 7;
        store.get_mut(&BOB).unwrap().debt = 3;

        assert_eq!(store.totals().unwrap(), (17, 7));
    }
}
