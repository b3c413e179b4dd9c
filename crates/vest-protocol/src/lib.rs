//! Wire format for the vesting lockup.
//!
//! Defines the op-codes, operation bodies, deployment payload, and
//! asset-transfer body exchanged with the message transport, and the
//! big-endian codec that reads and writes them.

pub mod codec;
pub mod error;
pub mod message;

pub use codec::LockupCodec;
pub use error::{ProtocolError, ProtocolResult};
pub use message::{
    AssetTransferBody, DeployPayload, InboundOp, MAX_MESSAGE_SIZE, OP_ASSET_TRANSFER, OP_CLAIM,
    OP_SEND_SERVICE_MESSAGE, TRANSFER_NOTIFY_AMOUNT,
};
