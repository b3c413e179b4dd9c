use serde::{Deserialize, Serialize};
use vest_types::{Amount, Timestamp};

use crate::math;
use crate::params::ScheduleParams;

/// Schedule parameters bound to the allocation they release.
///
/// `original_total` is fixed for the lifetime of a lockup, so everything
/// derived from it here (cliff unlock, step size) is stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub params: ScheduleParams,
    pub original_total: Amount,
}

impl Schedule {
    pub fn new(params: ScheduleParams, original_total: Amount) -> Self {
        Self {
            params,
            original_total,
        }
    }

    pub fn cliff_unlock_amount(&self) -> Amount {
        math::cliff_unlock_amount(&self.params, self.original_total)
    }

    pub fn periods_total(&self) -> u64 {
        math::periods_total(&self.params)
    }

    pub fn per_period_amount(&self) -> Amount {
        math::per_period_amount(&self.params, self.original_total)
    }

    pub fn vesting_end(&self) -> Timestamp {
        math::vesting_end(&self.params)
    }

    pub fn is_fully_vested(&self, now: Timestamp) -> bool {
        math::is_fully_vested(&self.params, now)
    }

    pub fn periods_elapsed(&self, now: Timestamp) -> u64 {
        math::periods_elapsed(&self.params, now)
    }

    pub fn vested_total(&self, now: Timestamp) -> Amount {
        math::vested_total(&self.params, self.original_total, now)
    }

    pub fn claimable(&self, claimed_total: Amount, now: Timestamp) -> Amount {
        math::claimable(&self.params, self.original_total, claimed_total, now)
    }

    pub fn next_unlock_at(&self, now: Timestamp) -> Option<Timestamp> {
        math::next_unlock_at(&self.params, now)
    }
}
