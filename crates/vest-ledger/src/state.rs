use serde::{Deserialize, Serialize};
use tracing::debug;
use vest_schedule::{Schedule, ScheduleParams};
use vest_types::{Amount, Principal, Timestamp};

use crate::error::LedgerError;
use crate::records::{ClaimRecord, Genesis};

/// The single mutable record of a lockup.
///
/// Created once from its [`Genesis`] and then changed only by
/// [`record_claim`](Self::record_claim). The original allocation is never
/// stored separately; it is always `remaining_balance + claimed_total`, and
/// every transition preserves that sum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupLedger {
    pub(crate) genesis: Genesis,
    pub(crate) genesis_hash: [u8; 32],
    pub(crate) remaining_balance: Amount,
    pub(crate) claimed_total: Amount,
    pub(crate) last_claimed_at: Option<Timestamp>,
    pub(crate) journal: Vec<ClaimRecord>,
}

impl LockupLedger {
    /// Open a fresh ledger holding the full initial allocation.
    pub fn open(genesis: Genesis) -> Result<Self, LedgerError> {
        let genesis_hash = genesis.genesis_hash()?;
        Ok(Self {
            remaining_balance: genesis.initial_allocation,
            claimed_total: 0,
            last_claimed_at: None,
            journal: Vec::new(),
            genesis_hash,
            genesis,
        })
    }

    pub fn genesis(&self) -> &Genesis {
        &self.genesis
    }

    pub fn genesis_hash(&self) -> [u8; 32] {
        self.genesis_hash
    }

    pub fn admin(&self) -> Principal {
        self.genesis.admin
    }

    pub fn claimer(&self) -> Principal {
        self.genesis.claimer
    }

    pub fn asset_handle(&self) -> Principal {
        self.genesis.asset_handle
    }

    pub fn schedule_params(&self) -> &ScheduleParams {
        &self.genesis.schedule
    }

    pub fn remaining_balance(&self) -> Amount {
        self.remaining_balance
    }

    pub fn claimed_total(&self) -> Amount {
        self.claimed_total
    }

    pub fn last_claimed_at(&self) -> Option<Timestamp> {
        self.last_claimed_at
    }

    /// `remaining_balance + claimed_total`; constant for the ledger's lifetime.
    pub fn original_total(&self) -> Amount {
        self.remaining_balance.saturating_add(self.claimed_total)
    }

    /// The schedule bound to the derived original total.
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.genesis.schedule, self.original_total())
    }

    /// Amount the claimer may withdraw at `now`.
    pub fn claimable(&self, now: Timestamp) -> Amount {
        self.schedule()
            .claimable(self.claimed_total, now)
            .min(self.remaining_balance)
    }

    /// Settled claims, oldest first.
    pub fn journal(&self) -> &[ClaimRecord] {
        &self.journal
    }

    /// Hash the next journal record must link to.
    pub fn head_hash(&self) -> [u8; 32] {
        self.journal
            .last()
            .map(|r| r.record_hash)
            .unwrap_or(self.genesis_hash)
    }

    /// Move `amount` from the remaining balance to the claimed total.
    ///
    /// This is the only transition. It either fully applies and returns the
    /// journal record, or fails and leaves the ledger untouched.
    pub fn record_claim(&mut self, amount: Amount, now: Timestamp) -> Result<ClaimRecord, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroClaim);
        }
        if amount > self.remaining_balance {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                remaining: self.remaining_balance,
            });
        }
        if let Some(last) = self.last_claimed_at {
            if now < last {
                return Err(LedgerError::ClockRegression { last, now });
            }
        }

        let remaining_after = self.remaining_balance - amount;
        let claimed_after = self
            .claimed_total
            .checked_add(amount)
            .ok_or_else(|| LedgerError::IntegrityViolation {
                seq: self.journal.len() as u64 + 1,
                reason: "claimed total overflow".into(),
            })?;

        let mut record = ClaimRecord {
            seq: self.journal.len() as u64 + 1,
            amount,
            at: now,
            remaining_after,
            claimed_after,
            prev_hash: self.head_hash(),
            record_hash: [0; 32],
        };
        record.record_hash = record.compute_hash()?;

        self.remaining_balance = remaining_after;
        self.claimed_total = claimed_after;
        self.last_claimed_at = Some(now);
        self.journal.push(record.clone());

        debug!(
            seq = record.seq,
            amount,
            remaining = remaining_after,
            hash = %record.short_hash(),
            "claim recorded"
        );
        Ok(record)
    }
}
