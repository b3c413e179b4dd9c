use serde::{Deserialize, Serialize};
use vest_schedule::ScheduleParams;
use vest_types::{Amount, Principal, Timestamp};

use crate::error::LedgerError;

const GENESIS_DOMAIN: &[u8] = b"vest-genesis-v1:";
const CLAIM_DOMAIN: &[u8] = b"vest-claim-v1:";

/// Everything fixed at deployment.
///
/// The genesis hash anchors the claim journal: the first record links to it
/// instead of to a previous record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    pub admin: Principal,
    pub claimer: Principal,
    /// Where the underlying tokens live.
    pub asset_handle: Principal,
    pub schedule: ScheduleParams,
    pub initial_allocation: Amount,
}

impl Genesis {
    pub fn genesis_hash(&self) -> Result<[u8; 32], LedgerError> {
        hash_json(GENESIS_DOMAIN, self)
    }
}

/// One settled claim in the journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// 1-based position in the journal.
    pub seq: u64,
    pub amount: Amount,
    pub at: Timestamp,
    pub remaining_after: Amount,
    pub claimed_after: Amount,
    pub prev_hash: [u8; 32],
    pub record_hash: [u8; 32],
}

impl ClaimRecord {
    /// Hash of the record with `record_hash` zeroed.
    pub fn compute_hash(&self) -> Result<[u8; 32], LedgerError> {
        let mut canonical = self.clone();
        canonical.record_hash = [0; 32];
        hash_json(CLAIM_DOMAIN, &canonical)
    }

    /// Short hex form of the record hash.
    pub fn short_hash(&self) -> String {
        hex::encode(&self.record_hash[..4])
    }
}

fn hash_json<T: Serialize>(domain: &[u8], value: &T) -> Result<[u8; 32], LedgerError> {
    let encoded =
        serde_json::to_vec(value).map_err(|e| LedgerError::Serialization(e.to_string()))?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain);
    hasher.update(&encoded);
    Ok(*hasher.finalize().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis() -> Genesis {
        Genesis {
            admin: Principal::derive("admin"),
            claimer: Principal::derive("claimer"),
            asset_handle: Principal::derive("holding"),
            schedule: ScheduleParams::new(Timestamp::from_secs(100), 1, 2, 1000, 100).unwrap(),
            initial_allocation: 1_000,
        }
    }

    #[test]
    fn genesis_hash_is_deterministic() {
        assert_eq!(
            genesis().genesis_hash().unwrap(),
            genesis().genesis_hash().unwrap()
        );
    }

    #[test]
    fn genesis_hash_covers_parties() {
        let mut other = genesis();
        other.claimer = Principal::derive("someone-else");
        assert_ne!(
            genesis().genesis_hash().unwrap(),
            other.genesis_hash().unwrap()
        );
    }

    #[test]
    fn record_hash_ignores_stored_hash() {
        let mut record = ClaimRecord {
            seq: 1,
            amount: 500,
            at: Timestamp::from_secs(100),
            remaining_after: 500,
            claimed_after: 500,
            prev_hash: [7; 32],
            record_hash: [0; 32],
        };
        let h = record.compute_hash().unwrap();
        record.record_hash = h;
        assert_eq!(record.compute_hash().unwrap(), h);
        assert_eq!(record.short_hash(), hex::encode(&h[..4]));
    }

    #[test]
    fn record_hash_covers_amount() {
        let a = ClaimRecord {
            seq: 1,
            amount: 500,
            at: Timestamp::from_secs(100),
            remaining_after: 500,
            claimed_after: 500,
            prev_hash: [7; 32],
            record_hash: [0; 32],
        };
        let mut b = a.clone();
        b.amount = 501;
        assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
    }
}
