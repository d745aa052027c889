//! Protocol Constants
//!
//! All magic numbers for the VaultUSD ledger. Ratios and unit prices are
//! fixed-point integers scaled by `precision::SCALE` (1e18); token and
//! collateral amounts carry 8 decimal places.

/// Liability token metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "sUSD";
    /// Token symbol
    pub const SYMBOL: &str = "sUSD";
    /// Decimal places
    pub const DECIMALS: u8 = 8;
    /// One unit with decimals (1 sUSD = 100_000_000 base units)
    pub const ONE: u64 = 100_000_000;
}

/// Native collateral asset
pub mod collateral {
    /// Decimal places (same as the liability token)
    pub const DECIMALS: u8 = 8;
    /// One unit with decimals
    pub const ONE: u64 = 100_000_000;
}

/// Collateralization ratios, scaled by `precision::SCALE`
pub mod ratios {
    /// Minimum ratio of collateral value to debt value required to mint
    /// debt or withdraw collateral (150%)
    pub const COLLATERALIZATION_RATIO: u128 = 1_500_000_000_000_000_000;

    /// Ratio below which a vault becomes seizable by any actor (110%).
    /// Between the two ratios a vault is unhealthy but not yet
    /// liquidatable.
    pub const LIQUIDATION_THRESHOLD: u128 = 1_100_000_000_000_000_000;
}

/// Fixed-point precision
pub mod precision {
    /// The 1e18 denominator used to represent fractional ratios and unit
    /// prices as integers
    pub const SCALE: u128 = 1_000_000_000_000_000_000;

    /// Decimal count the price normalizer scales every feed reading to
    pub const TARGET_DECIMALS: u8 = 18;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_ordering() {
        // Threshold sits strictly below the minting ratio, leaving the
        // 110-150% grace band.
        assert!(ratios::LIQUIDATION_THRESHOLD < ratios::COLLATERALIZATION_RATIO);
        assert!(ratios::LIQUIDATION_THRESHOLD > precision::SCALE);
    }

    #[test]
    fn test_scale_matches_target_decimals() {
        assert_eq!(precision::SCALE, 10u128.pow(precision::TARGET_DECIMALS as u32));
    }
}
