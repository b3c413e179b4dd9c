use vest_types::{Amount, Timestamp};

use crate::error::LedgerError;
use crate::records::ClaimRecord;
use crate::state::LockupLedger;

/// Result of ledger validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub record_count: u64,
    pub hash_chain_valid: bool,
    pub sequence_contiguous: bool,
    pub balance_conserved: bool,
    pub monotonic: bool,
    pub head_consistent: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub seq: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    HashChainBreak,
    HashMismatch,
    ConservationBreak,
    MonotonicityBreak,
    HeadMismatch,
}

/// Ledger invariant validator.
pub struct InvariantValidator;

impl InvariantValidator {
    /// Check the journal and live state of a ledger against every invariant.
    pub fn validate(ledger: &LockupLedger) -> Result<ValidationReport, LedgerError> {
        let original_total = ledger.genesis().initial_allocation;
        let mut violations = Vec::new();
        let mut hash_chain_valid = true;
        let mut sequence_contiguous = true;
        let mut balance_conserved = true;
        let mut monotonic = true;

        let mut prev_hash = ledger.genesis_hash();
        let mut prev_remaining: Amount = original_total;
        let mut prev_claimed: Amount = 0;
        let mut prev_at: Option<Timestamp> = None;

        for (index, record) in ledger.journal().iter().enumerate() {
            let expected_seq = (index + 1) as u64;
            if record.seq != expected_seq {
                sequence_contiguous = false;
                violations.push(Violation {
                    seq: record.seq,
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected seq {expected_seq}, got {}", record.seq),
                });
            }

            if record.prev_hash != prev_hash {
                hash_chain_valid = false;
                violations.push(Violation {
                    seq: record.seq,
                    kind: ViolationKind::HashChainBreak,
                    description: "previous hash link mismatch".into(),
                });
            }

            if record.compute_hash()? != record.record_hash {
                hash_chain_valid = false;
                violations.push(Violation {
                    seq: record.seq,
                    kind: ViolationKind::HashMismatch,
                    description: "record hash does not match computed".into(),
                });
            }

            if record.remaining_after.checked_add(record.claimed_after) != Some(original_total) {
                balance_conserved = false;
                violations.push(Violation {
                    seq: record.seq,
                    kind: ViolationKind::ConservationBreak,
                    description: format!(
                        "remaining {} + claimed {} != allocation {original_total}",
                        record.remaining_after, record.claimed_after
                    ),
                });
            }

            if !steps_forward(record, prev_remaining, prev_claimed, prev_at) {
                monotonic = false;
                violations.push(Violation {
                    seq: record.seq,
                    kind: ViolationKind::MonotonicityBreak,
                    description: "balances or timestamps moved backwards".into(),
                });
            }

            prev_hash = record.record_hash;
            prev_remaining = record.remaining_after;
            prev_claimed = record.claimed_after;
            prev_at = Some(record.at);
        }

        let head_consistent = ledger.remaining_balance() == prev_remaining
            && ledger.claimed_total() == prev_claimed
            && ledger.last_claimed_at() == prev_at;
        if !head_consistent {
            violations.push(Violation {
                seq: ledger.journal().len() as u64,
                kind: ViolationKind::HeadMismatch,
                description: "live balances differ from the last journal record".into(),
            });
        }

        Ok(ValidationReport {
            record_count: ledger.journal().len() as u64,
            hash_chain_valid,
            sequence_contiguous,
            balance_conserved,
            monotonic,
            head_consistent,
            violations,
        })
    }
}

fn steps_forward(
    record: &ClaimRecord,
    prev_remaining: Amount,
    prev_claimed: Amount,
    prev_at: Option<Timestamp>,
) -> bool {
    record.amount > 0
        && prev_remaining.checked_sub(record.amount) == Some(record.remaining_after)
        && prev_claimed.checked_add(record.amount) == Some(record.claimed_after)
        && prev_at.map_or(true, |at| record.at >= at)
}

#[cfg(test)]
mod tests {
    use vest_schedule::ScheduleParams;
    use vest_types::Principal;

    use super::*;
    use crate::records::Genesis;

    fn ledger_with_claims() -> LockupLedger {
        let mut ledger = LockupLedger::open(Genesis {
            admin: Principal::derive("admin"),
            claimer: Principal::derive("claimer"),
            asset_handle: Principal::derive("holding"),
            schedule: ScheduleParams::new(Timestamp::from_secs(100), 1, 4, 1_000, 100).unwrap(),
            initial_allocation: 10_000,
        })
        .unwrap();
        ledger.record_claim(2_500, Timestamp::from_secs(100)).unwrap();
        ledger.record_claim(750, Timestamp::from_secs(200)).unwrap();
        ledger.record_claim(6_750, Timestamp::from_secs(1_100)).unwrap();
        ledger
    }

    #[test]
    fn untouched_ledger_is_valid() {
        let report = InvariantValidator::validate(&ledger_with_claims()).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.record_count, 3);
        assert!(report.balance_conserved);
    }

    #[test]
    fn empty_journal_is_valid() {
        let mut ledger = ledger_with_claims();
        ledger.journal.clear();
        ledger.remaining_balance = 10_000;
        ledger.claimed_total = 0;
        ledger.last_claimed_at = None;
        assert!(InvariantValidator::validate(&ledger).unwrap().is_valid());
    }

    #[test]
    fn tampered_amount_breaks_hash_and_conservation() {
        let mut ledger = ledger_with_claims();
        ledger.journal[1].claimed_after += 1;
        let report = InvariantValidator::validate(&ledger).unwrap();
        assert!(!report.is_valid());
        assert!(!report.hash_chain_valid);
        assert!(!report.balance_conserved);
        assert!(report
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::HashMismatch && v.seq == 2));
    }

    #[test]
    fn dropped_record_breaks_sequence_and_chain() {
        let mut ledger = ledger_with_claims();
        ledger.journal.remove(1);
        let report = InvariantValidator::validate(&ledger).unwrap();
        assert!(!report.sequence_contiguous);
        assert!(!report.hash_chain_valid);
        assert!(!report.monotonic);
    }

    #[test]
    fn live_state_drift_is_detected() {
        let mut ledger = ledger_with_claims();
        ledger.remaining_balance += 1;
        let report = InvariantValidator::validate(&ledger).unwrap();
        assert!(!report.head_consistent);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::HeadMismatch);
    }

    proptest::proptest! {
        #[test]
        fn any_accepted_claim_sequence_validates(
            claims in proptest::collection::vec((1u128..5_000, 0u64..500), 0..20)
        ) {
            let mut ledger = ledger_with_claims();
            ledger.journal.clear();
            ledger.remaining_balance = 10_000;
            ledger.claimed_total = 0;
            ledger.last_claimed_at = None;

            let mut now = 0u64;
            for (amount, step) in claims {
                now += step;
                let _ = ledger.record_claim(amount, Timestamp::from_secs(now));
                proptest::prop_assert_eq!(ledger.original_total(), 10_000);
            }
            let report = InvariantValidator::validate(&ledger).unwrap();
            proptest::prop_assert!(report.is_valid(), "{:?}", report.violations);
        }
    }
}
