//! Farm positions held by the connected account.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

/// Identifier of a farm (pool) on the MasterChef contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FarmId(pub u32);

impl FarmId {
    /// Pool 0 is the single-token staking pool, not a farm.
    pub const STAKING_POOL: FarmId = FarmId(0);

    pub fn is_staking_pool(&self) -> bool {
        *self == Self::STAKING_POOL
    }
}

impl fmt::Display for FarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One farm the account has staked in, with amounts in whole-token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmPosition {
    pub farm_id: FarmId,
    pub staked_balance: Decimal,
    pub pending_earnings: Decimal,
}

impl FarmPosition {
    pub fn new(farm_id: FarmId, staked_balance: Decimal, pending_earnings: Decimal) -> Self {
        Self {
            farm_id,
            staked_balance,
            pending_earnings,
        }
    }
}

/// The account's staked farms together with their summed pending earnings.
///
/// Only constructed through [`FarmsWithBalanceSummary::new`], so
/// `earnings_sum` always equals the sum of `pending_earnings` over `positions`
/// and every position has a nonzero stake. Deserializing goes through `new`
/// too; a serialized `earnings_sum` is ignored and recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializedSummary")]
pub struct FarmsWithBalanceSummary {
    positions: Vec<FarmPosition>,
    earnings_sum: Decimal,
}

#[derive(Deserialize)]
struct SerializedSummary {
    positions: Vec<FarmPosition>,
}

impl From<SerializedSummary> for FarmsWithBalanceSummary {
    fn from(serialized: SerializedSummary) -> Self {
        Self::new(serialized.positions)
    }
}

impl FarmsWithBalanceSummary {
    /// Keeps positions with a positive stake, in their original order.
    pub fn new(positions: impl IntoIterator<Item = FarmPosition>) -> Self {
        let positions: Vec<FarmPosition> = positions
            .into_iter()
            .filter(|p| p.staked_balance > Decimal::ZERO)
            .collect();
        let earnings_sum = positions
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.pending_earnings));

        Self {
            positions,
            earnings_sum,
        }
    }

    pub fn positions(&self) -> &[FarmPosition] {
        &self.positions
    }

    pub fn earnings_sum(&self) -> Decimal {
        self.earnings_sum
    }

    /// Number of farms the harvest-all button advertises. The staking pool is
    /// still harvested but is not counted.
    pub fn collectible_count(&self) -> usize {
        self.positions
            .iter()
            .filter(|p| !p.farm_id.is_staking_pool())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
