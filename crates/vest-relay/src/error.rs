use thiserror::Error;
use vest_contract::ContractError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transport error: {0}")]
    TransportError(String),

    #[error("relay channel closed")]
    ChannelClosed,

    #[error("relay task failed: {0}")]
    TaskFailed(String),

    #[error("contract rejected message: {0}")]
    Contract(#[from] ContractError),
}

pub type RelayResult<T> = Result<T, RelayError>;
