use vest_types::{Amount, Timestamp};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("integrity violation at seq {seq}: {reason}")]
    IntegrityViolation { seq: u64, reason: String },

    #[error("claim amount must be positive")]
    ZeroClaim,

    #[error("claim of {requested} exceeds remaining balance {remaining}")]
    InsufficientBalance { requested: Amount, remaining: Amount },

    #[error("claim at {now} precedes last claim at {last}")]
    ClockRegression { last: Timestamp, now: Timestamp },

    #[error("serialization error: {0}")]
    Serialization(String),
}
