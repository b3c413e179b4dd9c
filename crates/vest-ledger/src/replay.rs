use crate::error::LedgerError;
use crate::records::{ClaimRecord, Genesis};
use crate::state::LockupLedger;

/// Result of replaying a claim journal on top of its genesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub ledger: LockupLedger,
    pub applied: u64,
}

/// Deterministic replay helpers for lockup journals.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Rebuild a ledger by re-applying every record through
    /// [`LockupLedger::record_claim`].
    ///
    /// Each rebuilt record must hash identically to the stored one, so a
    /// journal that was edited after the fact fails here even when its
    /// balances still add up.
    pub fn replay(genesis: Genesis, records: &[ClaimRecord]) -> Result<ReplayResult, LedgerError> {
        let mut ledger = LockupLedger::open(genesis)?;
        let mut applied = 0u64;

        for stored in records {
            let rebuilt = ledger.record_claim(stored.amount, stored.at)?;
            if rebuilt != *stored {
                return Err(LedgerError::IntegrityViolation {
                    seq: stored.seq,
                    reason: format!(
                        "replayed record {} differs from stored {}",
                        rebuilt.short_hash(),
                        stored.short_hash()
                    ),
                });
            }
            applied += 1;
        }

        Ok(ReplayResult { ledger, applied })
    }

    /// Replay a ledger's own journal and check the result matches it.
    pub fn verify(ledger: &LockupLedger) -> Result<bool, LedgerError> {
        let replayed = Self::replay(ledger.genesis().clone(), ledger.journal())?;
        Ok(replayed.ledger == *ledger)
    }
}

#[cfg(test)]
mod tests {
    use vest_schedule::ScheduleParams;
    use vest_types::{Principal, Timestamp};

    use super::*;

    fn genesis() -> Genesis {
        Genesis {
            admin: Principal::derive("admin"),
            claimer: Principal::derive("claimer"),
            asset_handle: Principal::derive("holding"),
            schedule: ScheduleParams::new(Timestamp::from_secs(500), 10, 100, 1_000, 250).unwrap(),
            initial_allocation: 1_000_000,
        }
    }

    fn live_ledger() -> LockupLedger {
        let mut ledger = LockupLedger::open(genesis()).unwrap();
        ledger.record_claim(100_000, Timestamp::from_secs(500)).unwrap();
        ledger.record_claim(225_000, Timestamp::from_secs(760)).unwrap();
        ledger.record_claim(675_000, Timestamp::from_secs(1_600)).unwrap();
        ledger
    }

    #[test]
    fn replay_reconstructs_live_state() {
        let live = live_ledger();
        let result = ReplayEngine::replay(genesis(), live.journal()).unwrap();
        assert_eq!(result.applied, 3);
        assert_eq!(result.ledger, live);
        assert_eq!(result.ledger.remaining_balance(), 0);
        assert!(ReplayEngine::verify(&live).unwrap());
    }

    #[test]
    fn replay_empty_journal() {
        let result = ReplayEngine::replay(genesis(), &[]).unwrap();
        assert_eq!(result.applied, 0);
        assert_eq!(result.ledger.remaining_balance(), 1_000_000);
        assert_eq!(result.ledger.last_claimed_at(), None);
    }

    #[test]
    fn replay_rejects_edited_record() {
        let live = live_ledger();
        let mut records = live.journal().to_vec();
        records[1].prev_hash = [9; 32];
        let err = ReplayEngine::replay(genesis(), &records).unwrap_err();
        assert!(matches!(err, LedgerError::IntegrityViolation { seq: 2, .. }));
    }

    #[test]
    fn replay_against_wrong_genesis_fails() {
        let live = live_ledger();
        let mut other = genesis();
        other.claimer = Principal::derive("impostor");
        assert!(ReplayEngine::replay(other, live.journal()).is_err());
    }

    #[test]
    fn verify_detects_live_drift() {
        let mut live = live_ledger();
        live.claimed_total -= 1;
        assert!(!ReplayEngine::verify(&live).unwrap());
    }
}
