use vest_ledger::LedgerError;
use vest_protocol::ProtocolError;
use vest_schedule::ScheduleError;
use vest_types::{Amount, ExitCode, Timestamp};

/// Why an inbound message was rejected.
///
/// Every rejection is detected before the ledger is touched.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("sender is not the admin")]
    NotFromAdmin,

    #[error("sender is not the claimer")]
    NotFromClaimer,

    #[error("attached value {attached} is below the minimum fee {min_fee}")]
    NotEnoughFee { attached: Amount, min_fee: Amount },

    #[error("nothing to claim")]
    NothingToClaim,

    #[error("lockup runs until {ends_at}")]
    LockupNotFinished { ends_at: Timestamp },

    #[error("invalid schedule: {0}")]
    InvalidVestingPeriod(#[from] ScheduleError),

    #[error("malformed payload: {0}")]
    MalformedPayload(ProtocolError),

    #[error("unknown operation {0:#010x}")]
    UnknownOperation(u32),

    /// The account was drained and destroyed; nothing reaches it any more.
    #[error("lockup is frozen")]
    Frozen,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("stage error in '{stage}': {message}")]
    StageError { stage: String, message: String },
}

impl ContractError {
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageError {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Numeric code reported to the sender, if the rejection has one.
    pub fn exit_code(&self) -> Option<ExitCode> {
        match self {
            Self::NotFromAdmin => Some(ExitCode::NotFromAdmin),
            Self::NotFromClaimer => Some(ExitCode::NotFromClaimer),
            Self::NotEnoughFee { .. } => Some(ExitCode::NotEnoughFee),
            Self::NothingToClaim => Some(ExitCode::NothingToClaim),
            Self::LockupNotFinished { .. } => Some(ExitCode::LockupNotFinished),
            Self::InvalidVestingPeriod(_) => Some(ExitCode::InvalidVestingPeriod),
            Self::MalformedPayload(_) => Some(ExitCode::MalformedPayload),
            Self::UnknownOperation(_) => Some(ExitCode::UnknownOperation),
            Self::Frozen | Self::Ledger(_) | Self::StageError { .. } => None,
        }
    }
}

impl From<ProtocolError> for ContractError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::UnknownOp(op) => Self::UnknownOperation(op),
            other => Self::MalformedPayload(other),
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
