use thiserror::Error;
use vest_types::TypeError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("truncated {what}: need {needed} bytes, have {remaining}")]
    Truncated {
        what: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("unknown op-code: {0:#010x}")]
    UnknownOp(u32),

    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("type error: {0}")]
    Type(#[from] TypeError),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
