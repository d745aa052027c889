//! Error Types for the VaultUSD Ledger
//!
//! Inspired by Soroban's error handling patterns, these typed errors
//! provide clear feedback for debugging and better UX. Every failure is a
//! local, synchronous rejection that leaves all persisted state exactly as
//! it was before the call.

use crate::types::Address;

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Main error enum for all VaultUSD ledger errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ============ Vault Errors ============
    /// No vault has ever been created for this owner
    NoSuchVault { owner: Address },

    /// A vault already exists for this owner (creation is not idempotent)
    AlreadyExists { owner: Address },

    /// Withdrawal exceeds the collateral currently locked
    InsufficientCollateral { available: u64, requested: u64 },

    /// Repayment exceeds the outstanding debt
    ExceedsDebt { debt: u64, requested: u64 },

    /// The proposed state would fall below the collateralization ratio
    RatioViolation { collateral: u64, debt: u64 },

    /// The target vault is at or above the liquidation threshold
    NotLiquidatable { owner: Address },

    // ============ Amount Errors ============
    /// Zero amount not allowed
    ZeroAmount,

    /// Insufficient token balance for operation
    InsufficientBalance { available: u64, requested: u64 },

    // ============ Price Errors ============
    /// The feed reported a zero or negative price; all price-dependent
    /// operations are blocked until the feed recovers
    InvalidPrice { raw: i128 },

    // ============ Transfer Errors ============
    /// An asset movement (native transfer or liability burn) failed; the
    /// operation was rolled back in full
    TransferFailed { account: Address, amount: u64 },

    /// Mint not authorized for this caller
    MintUnauthorized { caller: Address },

    /// Burn not authorized for this caller
    BurnUnauthorized { caller: Address },

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,
}

impl LedgerError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSuchVault { .. } => "E001_NO_SUCH_VAULT",
            Self::AlreadyExists { .. } => "E002_ALREADY_EXISTS",
            Self::InsufficientCollateral { .. } => "E003_INSUFFICIENT_COLLATERAL",
            Self::ExceedsDebt { .. } => "E004_EXCEEDS_DEBT",
            Self::RatioViolation { .. } => "E005_RATIO_VIOLATION",
            Self::NotLiquidatable { .. } => "E006_NOT_LIQUIDATABLE",
            Self::ZeroAmount => "E010_ZERO_AMOUNT",
            Self::InsufficientBalance { .. } => "E011_INSUFFICIENT_BALANCE",
            Self::InvalidPrice { .. } => "E020_INVALID_PRICE",
            Self::TransferFailed { .. } => "E030_TRANSFER_FAILED",
            Self::MintUnauthorized { .. } => "E031_MINT_UNAUTH",
            Self::BurnUnauthorized { .. } => "E032_BURN_UNAUTH",
            Self::Overflow => "E040_OVERFLOW",
        }
    }

    /// Returns true if the caller can recover by retrying with corrected
    /// inputs or after external conditions change (e.g. price recovery).
    /// At this layer every taxonomy member qualifies; only the capability
    /// and overflow errors indicate a wiring or input-size bug.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::MintUnauthorized { .. } | Self::BurnUnauthorized { .. } | Self::Overflow
        )
    }
}
