use serde::{Deserialize, Serialize};
use vest_schedule::{ScheduleError, ScheduleParams};
use vest_types::{Amount, Principal, SendMode, Timestamp};

use crate::error::{ProtocolError, ProtocolResult};

/// Claim vested tokens.
pub const OP_CLAIM: u32 = 0x3651_a88c;
/// Relay an opaque admin message.
pub const OP_SEND_SERVICE_MESSAGE: u32 = 0x000a_3c66;
/// Token transfer addressed to the asset holding.
pub const OP_ASSET_TRANSFER: u32 = 0x0f8a_7ea5;

/// Upper bound on an opaque service payload.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Forward amount attached to every asset transfer so the recipient is notified.
pub const TRANSFER_NOTIFY_AMOUNT: Amount = 1;

/// Operations accepted by an initialized lockup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InboundOp {
    Claim {
        query_id: u64,
    },
    ServiceMessage {
        query_id: u64,
        #[serde(with = "hex_bytes")]
        payload: Vec<u8>,
        send_mode: SendMode,
    },
}

impl InboundOp {
    pub fn op_code(&self) -> u32 {
        match self {
            Self::Claim { .. } => OP_CLAIM,
            Self::ServiceMessage { .. } => OP_SEND_SERVICE_MESSAGE,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Claim { .. } => "Claim",
            Self::ServiceMessage { .. } => "ServiceMessage",
        }
    }

    pub fn query_id(&self) -> u64 {
        match self {
            Self::Claim { query_id } | Self::ServiceMessage { query_id, .. } => *query_id,
        }
    }
}

/// Body of the first message a lockup receives.
///
/// Time fields are 32-bit on the wire; [`DeployPayload::schedule_params`]
/// widens them and runs the schedule checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPayload {
    pub initial_allocation: Amount,
    pub asset_handle: Principal,
    pub cliff_end: u32,
    pub cliff_numerator: u16,
    pub cliff_denominator: u16,
    pub vesting_period: u32,
    pub distribution_frequency: u32,
}

impl DeployPayload {
    /// Narrow validated schedule parameters into the wire layout.
    pub fn from_schedule(
        initial_allocation: Amount,
        asset_handle: Principal,
        params: &ScheduleParams,
    ) -> ProtocolResult<Self> {
        Ok(Self {
            initial_allocation,
            asset_handle,
            cliff_end: params.cliff_end().to_wire()?,
            cliff_numerator: params.cliff_numerator(),
            cliff_denominator: params.cliff_denominator(),
            vesting_period: narrow("vesting_period", params.vesting_period())?,
            distribution_frequency: narrow(
                "distribution_frequency",
                params.distribution_frequency(),
            )?,
        })
    }

    pub fn schedule_params(&self) -> Result<ScheduleParams, ScheduleError> {
        ScheduleParams::new(
            Timestamp::from(self.cliff_end),
            self.cliff_numerator,
            self.cliff_denominator,
            u64::from(self.vesting_period),
            u64::from(self.distribution_frequency),
        )
    }
}

fn narrow(field: &str, value: u64) -> ProtocolResult<u32> {
    u32::try_from(value)
        .map_err(|_| ProtocolError::InvalidField(format!("{field} {value} does not fit in 32 bits")))
}

/// Body sent to the asset holding to move tokens out of the lockup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransferBody {
    pub query_id: u64,
    pub amount: Amount,
    pub destination: Principal,
    /// Receives the unspent attached value.
    pub response_destination: Principal,
    pub forward_amount: Amount,
}

impl AssetTransferBody {
    pub fn new(query_id: u64, amount: Amount, destination: Principal, response_destination: Principal) -> Self {
        Self {
            query_id,
            amount,
            destination,
            response_destination,
            forward_amount: TRANSFER_NOTIFY_AMOUNT,
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}
