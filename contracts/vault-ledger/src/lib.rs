//! VaultUSD Vault Ledger
//!
//! The core state machine of the protocol: per-owner vaults of locked
//! collateral and outstanding sUSD debt, with the ratio contract enforced
//! on every mutation.
//!
//! ## Key Features
//! - Overcollateralized minting: debt requires 150% collateral backing
//! - Full liquidation below the 110% threshold, open to any actor
//! - Fresh price on every price-dependent call, never cached
//! - State committed before external asset movement, rolled back in full
//!   if the movement fails
//!
//! Every operation takes `&mut self`, so the exclusive borrow is the
//! reentrancy guard: no second operation can observe a vault mid-mutation.

use vaultusd_common::errors::{LedgerError, LedgerResult};
use vaultusd_common::events::{EventLog, LedgerEvent};
use vaultusd_common::math;
use vaultusd_common::types::{Address, HealthStatus, SystemState, Vault};
use vaultusd_common::Vec;

use vaultusd_price_normalizer::{PriceFeed, PriceNormalizer};
use vaultusd_susd_token::SusdToken;

extern crate alloc;
use alloc::collections::BTreeMap;

pub mod store;

pub use store::VaultStore;


// ============ Collateral Bridge ============

/// Custody boundary for the native collateral asset. `collect` pulls
/// funds from an owner into ledger custody; `release` pays custody funds
/// out. Either side may fail, and the ledger treats a failure as a signal
/// to roll back the operation that triggered it.
pub trait CollateralBridge {
    /// Pull `amount` collateral units from `from` into custody.
    fn collect(&mut self, from: &Address, amount: u64) -> LedgerResult<()>;

    /// Pay `amount` collateral units from custody out to `to`.
    fn release(&mut self, to: &Address, amount: u64) -> LedgerResult<()>;
}

/// In-memory bridge over per-account collateral balances, used by tests
/// and local deployments. A fail switch forces `release` to error so the
/// rollback paths can be exercised.
#[derive(Debug, Clone, Default)]
pub struct MockBridge {
    accounts: BTreeMap<Address, u64>,
    custody: u64,
    fail_releases: bool,
}

impl MockBridge {
    /// Creates an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` collateral units to an external account.
    pub fn fund(&mut self, account: Address, amount: u64) {
        let balance = self.accounts.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// External balance of an account.
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.accounts.get(account).copied().unwrap_or(0)
    }

    /// Total collateral currently held in custody.
    pub fn custody(&self) -> u64 {
        self.custody
    }

    /// Forces every subsequent `release` to fail.
    pub fn set_fail_releases(&mut self, fail: bool) {
        self.fail_releases = fail;
    }
}

impl CollateralBridge for MockBridge {
    fn collect(&mut self, from: &Address, amount: u64) -> LedgerResult<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::TransferFailed {
                account: *from,
                amount,
            });
        }
        self.custody = self.custody.checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.accounts.insert(*from, balance - amount);
        Ok(())
    }

    fn release(&mut self, to: &Address, amount: u64) -> LedgerResult<()> {
        if self.fail_releases || self.custody < amount {
            return Err(LedgerError::TransferFailed {
                account: *to,
                amount,
            });
        }
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.custody -= amount;
        self.accounts.insert(*to, balance);
        Ok(())
    }
}

// ============ Vault Ledger ============

/// The ledger: vault store, sUSD token, price normalizer, and collateral
/// bridge wired together under one identity address that holds the
/// token's mint/burn capability.
#[derive(Debug)]
pub struct VaultLedger<F: PriceFeed, B: CollateralBridge> {
    store: VaultStore,
    token: SusdToken,
    normalizer: PriceNormalizer<F>,
    bridge: B,
    identity: Address,
    events: EventLog,
}

impl<F: PriceFeed, B: CollateralBridge> VaultLedger<F, B> {
    /// Wires up an empty ledger. `identity` becomes the sUSD token's
    /// authorized minter.
    pub fn new(feed: F, bridge: B, identity: Address) -> Self {
        Self {
            store: VaultStore::new(),
            token: SusdToken::new(identity),
            normalizer: PriceNormalizer::new(feed),
            bridge,
            identity,
            events: EventLog::new(),
        }
    }

    // ============ Vault Lifecycle ============

    /// Creates an empty vault for `owner`. Fails if one already exists,
    /// even a liquidated (zeroed) one.
    pub fn create_vault(&mut self, owner: Address) -> LedgerResult<()> {
        self.store.create(owner)?;
        self.events.emit(LedgerEvent::VaultCreated { owner });
        Ok(())
    }

    /// Locks `amount` collateral units into the owner's vault. The funds
    /// are collected over the bridge before the vault balance changes, so
    /// a failed collection leaves the vault untouched.
    pub fn deposit(&mut self, owner: Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let new_collateral = math::safe_add(self.store.get(&owner)?.collateral, amount)?;

        self.bridge.collect(&owner, amount)?;

        self.store.get_mut(&owner)?.collateral = new_collateral;
        self.events.emit(LedgerEvent::CollateralDeposited {
            owner,
            amount,
            new_collateral,
        });
        Ok(())
    }

    /// Withdraws `amount` collateral units, provided the remaining vault
    /// stays healthy at the current price. A debt-free vault can withdraw
    /// everything.
    pub fn withdraw(&mut self, owner: Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let vault = *self.store.get(&owner)?;
        if amount > vault.collateral {
            return Err(LedgerError::InsufficientCollateral {
                available: vault.collateral,
                requested: amount,
            });
        }
        let new_collateral = math::safe_sub(vault.collateral, amount)?;

        if vault.has_debt() {
            let price = self.normalizer.unit_price()?;
            if !math::is_healthy(new_collateral, vault.debt, price)? {
                return Err(LedgerError::RatioViolation {
                    collateral: new_collateral,
                    debt: vault.debt,
                });
            }
        }

        // Commit, then pay out; restore on a failed release.
        self.store.get_mut(&owner)?.collateral = new_collateral;
        if self.bridge.release(&owner, amount).is_err() {
            self.store.get_mut(&owner)?.collateral = vault.collateral;
            return Err(LedgerError::TransferFailed {
                account: owner,
                amount,
            });
        }

        self.events.emit(LedgerEvent::CollateralWithdrawn {
            owner,
            amount,
            new_collateral,
        });
        Ok(())
    }

    // ============ Debt Operations ============

    /// Mints `amount` sUSD against the owner's vault. The resulting
    /// position must satisfy the collateralization ratio at the current
    /// price.
    pub fn mint(&mut self, owner: Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let vault = *self.store.get(&owner)?;
        let new_debt = math::safe_add(vault.debt, amount)?;

        let price = self.normalizer.unit_price()?;
        if !math::is_healthy(vault.collateral, new_debt, price)? {
            return Err(LedgerError::RatioViolation {
                collateral: vault.collateral,
                debt: new_debt,
            });
        }

        self.store.get_mut(&owner)?.debt = new_debt;
        let identity = self.identity;
        if let Err(err) = self.token.mint(&identity, &owner, amount) {
            self.store.get_mut(&owner)?.debt = vault.debt;
            return Err(err);
        }

        self.events.emit(LedgerEvent::DebtMinted {
            owner,
            amount,
            new_debt,
        });
        Ok(())
    }

    /// Burns `amount` sUSD from the owner and retires that much vault
    /// debt. Overpayment is rejected rather than clamped.
    pub fn repay(&mut self, owner: Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let vault = *self.store.get(&owner)?;
        if amount > vault.debt {
            return Err(LedgerError::ExceedsDebt {
                debt: vault.debt,
                requested: amount,
            });
        }
        let new_debt = math::safe_sub(vault.debt, amount)?;

        self.store.get_mut(&owner)?.debt = new_debt;
        let identity = self.identity;
        if self.token.burn(&identity, &owner, amount).is_err() {
            self.store.get_mut(&owner)?.debt = vault.debt;
            return Err(LedgerError::TransferFailed {
                account: owner,
                amount,
            });
        }

        self.events.emit(LedgerEvent::DebtRepaid {
            owner,
            amount,
            new_debt,
        });
        Ok(())
    }

    // ============ Liquidation ============

    /// Seizes a vault whose ratio has fallen below the liquidation
    /// threshold. The liquidator burns sUSD equal to the full debt and
    /// receives the full collateral; the vault is zeroed in place. Any
    /// caller may liquidate, including the owner.
    pub fn liquidate(&mut self, liquidator: Address, owner: Address) -> LedgerResult<()> {
        let vault = *self.store.get(&owner)?;
        let price = self.normalizer.unit_price()?;
        if !math::is_liquidatable(vault.collateral, vault.debt, price)? {
            return Err(LedgerError::NotLiquidatable { owner });
        }

        // Burn first: a liquidator who cannot cover the debt must not
        // touch the vault at all.
        let identity = self.identity;
        if self.token.burn(&identity, &liquidator, vault.debt).is_err() {
            return Err(LedgerError::TransferFailed {
                account: liquidator,
                amount: vault.debt,
            });
        }

        {
            let record = self.store.get_mut(&owner)?;
            record.collateral = 0;
            record.debt = 0;
        }

        if self.bridge.release(&liquidator, vault.collateral).is_err() {
            let record = self.store.get_mut(&owner)?;
            record.collateral = vault.collateral;
            record.debt = vault.debt;
            self.token.mint(&identity, &liquidator, vault.debt)?;
            return Err(LedgerError::TransferFailed {
                account: liquidator,
                amount: vault.collateral,
            });
        }

        self.events.emit(LedgerEvent::VaultLiquidated {
            owner,
            liquidator,
            debt_repaid: vault.debt,
            collateral_seized: vault.collateral,
        });
        Ok(())
    }

    // ============ Queries ============

    /// Current vault record for `owner`.
    pub fn vault(&self, owner: &Address) -> LedgerResult<Vault> {
        self.store.get(owner).copied()
    }

    /// Owners in creation order.
    pub fn owners(&self) -> &[Address] {
        self.store.owners()
    }

    /// Health classification of a vault at the current price.
    pub fn health_of(&self, owner: &Address) -> LedgerResult<HealthStatus> {
        let vault = self.store.get(owner)?;
        if !vault.has_debt() {
            return Ok(HealthStatus::Healthy);
        }
        let price = self.normalizer.unit_price()?;
        HealthStatus::classify(vault.collateral, vault.debt, price)
    }

    /// Maximum total debt the vault's collateral supports at the current
    /// price (not the remaining headroom).
    pub fn max_debt(&self, owner: &Address) -> LedgerResult<u64> {
        let vault = self.store.get(owner)?;
        let price = self.normalizer.unit_price()?;
        math::max_debt_for_collateral(vault.collateral, price)
    }

    /// Aggregate totals and system-wide ratio at the current price.
    pub fn system_state(&self) -> LedgerResult<SystemState> {
        let (total_collateral, total_debt) = self.store.totals()?;
        let price = self.normalizer.unit_price()?;
        SystemState::compute(total_collateral, total_debt, price)
    }

    /// Owners whose vaults are seizable at the current price, in creation
    /// order.
    pub fn liquidatable_owners(&self) -> LedgerResult<Vec<Address>> {
        let price = self.normalizer.unit_price()?;
        let mut result = Vec::new();
        for vault in self.store.iter() {
            if math::is_liquidatable(vault.collateral, vault.debt, price)? {
                result.push(vault.owner);
            }
        }
        Ok(result)
    }

    /// Events emitted so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The sUSD token ledger.
    pub fn token(&self) -> &SusdToken {
        &self.token
    }

    /// Mutable access to the token ledger, for holder-to-holder
    /// transfers outside vault operations.
    pub fn token_mut(&mut self) -> &mut SusdToken {
        &mut self.token
    }

    /// The underlying price feed.
    pub fn feed(&self) -> &F {
        self.normalizer.feed()
    }

    /// The collateral bridge.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Mutable access to the bridge, for funding accounts in tests and
    /// local deployments.
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }
}
