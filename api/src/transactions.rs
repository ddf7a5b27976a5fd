//! Harvest transactions against the MasterChef contract.

use std::fmt;

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::farms::FarmId;

/// Errors that can occur while submitting a harvest transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    /// The user declined to sign in their wallet.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The transaction was mined but reverted.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// The transaction never made it to the chain.
    #[error("transaction submission failed: {0}")]
    Submission(String),
}

/// Hash of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to the deployed MasterChef contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    address: String,
}

impl ContractHandle {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// The contract call that harvests a farm's pending rewards.
///
/// Depositing zero into a farm pays out its pending rewards without changing
/// the stake. The staking pool has its own entry point for the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarvestCall {
    LeaveStaking { amount: u128 },
    Deposit { farm_id: FarmId, amount: u128 },
}

impl HarvestCall {
    pub fn for_farm(farm_id: FarmId) -> Self {
        if farm_id.is_staking_pool() {
            Self::LeaveStaking { amount: 0 }
        } else {
            Self::Deposit { farm_id, amount: 0 }
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::LeaveStaking { .. } => "leaveStaking",
            Self::Deposit { .. } => "deposit",
        }
    }
}

impl fmt::Display for HarvestCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeaveStaking { amount } => write!(f, "leaveStaking({})", amount),
            Self::Deposit { farm_id, amount } => write!(f, "deposit({}, {})", farm_id, amount),
        }
    }
}

/// Submits harvest transactions and resolves once each is settled.
pub trait TransactionExecutor {
    fn harvest<'a>(
        &'a self,
        contract: &'a ContractHandle,
        farm_id: FarmId,
    ) -> LocalBoxFuture<'a, Result<TxHash, TxError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staking_pool_uses_leave_staking() {
        let call = HarvestCall::for_farm(FarmId::STAKING_POOL);
        assert_eq!(call.method(), "leaveStaking");
        assert_eq!(call.to_string(), "leaveStaking(0)");
    }

    #[test]
    fn farms_deposit_zero() {
        let call = HarvestCall::for_farm(FarmId(7));
        assert_eq!(call, HarvestCall::Deposit { farm_id: FarmId(7), amount: 0 });
        assert_eq!(call.to_string(), "deposit(7, 0)");
    }
}
