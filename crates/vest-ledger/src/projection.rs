use serde::{Deserialize, Serialize};
use vest_types::{Amount, Principal, Timestamp};

use crate::state::LockupLedger;

/// Parties and balances of a lockup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupData {
    pub initialized: bool,
    pub admin: Principal,
    pub claimer: Principal,
    pub remaining_balance: Amount,
    pub claimed_total: Amount,
    pub last_claimed_at: Option<Timestamp>,
}

impl LockupData {
    /// What a deployed but not yet initialized lockup reports.
    pub fn uninitialized(admin: Principal, claimer: Principal) -> Self {
        Self {
            initialized: false,
            admin,
            claimer,
            remaining_balance: 0,
            claimed_total: 0,
            last_claimed_at: None,
        }
    }
}

/// Schedule parameters plus the derived cliff unlock amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingData {
    pub asset_handle: Principal,
    pub cliff_end: Timestamp,
    pub cliff_numerator: u16,
    pub cliff_denominator: u16,
    pub cliff_unlock_amount: Amount,
    pub vesting_period: u64,
    pub distribution_frequency: u64,
}

/// Deterministic projection builders.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn lockup_data(ledger: &LockupLedger) -> LockupData {
        LockupData {
            initialized: true,
            admin: ledger.admin(),
            claimer: ledger.claimer(),
            remaining_balance: ledger.remaining_balance(),
            claimed_total: ledger.claimed_total(),
            last_claimed_at: ledger.last_claimed_at(),
        }
    }

    pub fn vesting_data(ledger: &LockupLedger) -> VestingData {
        let params = ledger.schedule_params();
        VestingData {
            asset_handle: ledger.asset_handle(),
            cliff_end: params.cliff_end(),
            cliff_numerator: params.cliff_numerator(),
            cliff_denominator: params.cliff_denominator(),
            cliff_unlock_amount: ledger.schedule().cliff_unlock_amount(),
            vesting_period: params.vesting_period(),
            distribution_frequency: params.distribution_frequency(),
        }
    }
}
