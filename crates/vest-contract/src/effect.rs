use serde::{Deserialize, Serialize};
use vest_protocol::{AssetTransferBody, LockupCodec};
use vest_types::{Amount, Principal, SendMode};

/// Move `amount` tokens from the asset holding to `recipient`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAsset {
    /// Account the transfer body is addressed to.
    pub holding: Principal,
    pub amount: Amount,
    pub recipient: Principal,
    /// Receives whatever native value the transfer does not spend.
    pub excess_recipient: Principal,
    pub query_id: u64,
    /// Native value attached to the outbound message.
    pub value: Amount,
    pub send_mode: SendMode,
}

impl TransferAsset {
    pub fn body(&self) -> AssetTransferBody {
        AssetTransferBody::new(self.query_id, self.amount, self.recipient, self.excess_recipient)
    }

    /// Wire body for the asset holding.
    pub fn encode(&self) -> Vec<u8> {
        LockupCodec::encode_transfer(&self.body())
    }
}

/// Relay an admin payload without interpreting it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRaw {
    pub payload: Vec<u8>,
    pub send_mode: SendMode,
    pub query_id: u64,
}

/// Side effects produced by a successful operation, in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum OutboundEffect {
    TransferAsset(TransferAsset),
    ForwardRaw(ForwardRaw),
}

impl OutboundEffect {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TransferAsset(_) => "TransferAsset",
            Self::ForwardRaw(_) => "ForwardRaw",
        }
    }

    pub fn send_mode(&self) -> SendMode {
        match self {
            Self::TransferAsset(t) => t.send_mode,
            Self::ForwardRaw(f) => f.send_mode,
        }
    }
}
