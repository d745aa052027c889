//! Lifecycle Events for the VaultUSD Ledger
//!
//! Events are emitted on every successful mutating operation and can be
//! indexed off-chain for UIs, analytics, and notifications. They are an
//! observation surface only - nothing in the ledger consumes them.

use crate::types::Address;
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    VaultCreated = 0x01,
    CollateralDeposited = 0x02,
    CollateralWithdrawn = 0x03,
    DebtMinted = 0x04,
    DebtRepaid = 0x05,
    VaultLiquidated = 0x06,
}

/// Main event enum covering the ledger lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum LedgerEvent {
    /// Emitted when a new vault is created
    VaultCreated { owner: Address },

    /// Emitted when collateral is locked into a vault
    CollateralDeposited {
        owner: Address,
        amount: u64,
        new_collateral: u64,
    },

    /// Emitted when collateral is withdrawn from a vault
    CollateralWithdrawn {
        owner: Address,
        amount: u64,
        new_collateral: u64,
    },

    /// Emitted when debt is minted against a vault
    DebtMinted {
        owner: Address,
        amount: u64,
        new_debt: u64,
    },

    /// Emitted when debt is repaid
    DebtRepaid {
        owner: Address,
        amount: u64,
        new_debt: u64,
    },

    /// Emitted when a vault is seized in full
    VaultLiquidated {
        owner: Address,
        liquidator: Address,
        debt_repaid: u64,
        collateral_seized: u64,
    },
}

impl LedgerEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::VaultCreated { .. } => EventType::VaultCreated,
            Self::CollateralDeposited { .. } => EventType::CollateralDeposited,
            Self::CollateralWithdrawn { .. } => EventType::CollateralWithdrawn,
            Self::DebtMinted { .. } => EventType::DebtMinted,
            Self::DebtRepaid { .. } => EventType::DebtRepaid,
            Self::VaultLiquidated { .. } => EventType::VaultLiquidated,
        }
    }

    /// The owner the event acts on (the liquidated owner for liquidations)
    pub fn owner(&self) -> Address {
        match self {
            Self::VaultCreated { owner }
            | Self::CollateralDeposited { owner, .. }
            | Self::CollateralWithdrawn { owner, .. }
            | Self::DebtMinted { owner, .. }
            | Self::DebtRepaid { owner, .. }
            | Self::VaultLiquidated { owner, .. } => *owner,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log collecting events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<LedgerEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
