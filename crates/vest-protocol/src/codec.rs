use bytes::{Buf, BufMut, BytesMut};
use tracing::trace;
use vest_types::{Principal, SendMode};

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{
    AssetTransferBody, DeployPayload, InboundOp, MAX_MESSAGE_SIZE, OP_ASSET_TRANSFER, OP_CLAIM,
    OP_SEND_SERVICE_MESSAGE,
};

/// Big-endian, fixed-width codec for lockup message bodies.
///
/// Bytes past the end of a declared layout are ignored.
pub struct LockupCodec;

impl LockupCodec {
    /// Encode an operation: `[op u32][query_id u64][op-specific fields]`.
    pub fn encode_op(op: &InboundOp) -> ProtocolResult<Vec<u8>> {
        let mut buf = BytesMut::with_capacity(16);
        buf.put_u32(op.op_code());
        buf.put_u64(op.query_id());
        if let InboundOp::ServiceMessage {
            payload, send_mode, ..
        } = op
        {
            if payload.len() > MAX_MESSAGE_SIZE {
                return Err(ProtocolError::MessageTooLarge {
                    size: payload.len(),
                    max: MAX_MESSAGE_SIZE,
                });
            }
            buf.put_u32(payload.len() as u32);
            buf.put_slice(payload);
            buf.put_u8(send_mode.bits());
        }
        Ok(buf.to_vec())
    }

    pub fn decode_op(data: &[u8]) -> ProtocolResult<InboundOp> {
        let mut buf = data;
        let op_code = take_u32(&mut buf, "op-code")?;
        let op = match op_code {
            OP_CLAIM => InboundOp::Claim {
                query_id: take_u64(&mut buf, "query id")?,
            },
            OP_SEND_SERVICE_MESSAGE => {
                let query_id = take_u64(&mut buf, "query id")?;
                let len = take_u32(&mut buf, "message length")? as usize;
                if len > MAX_MESSAGE_SIZE {
                    return Err(ProtocolError::MessageTooLarge {
                        size: len,
                        max: MAX_MESSAGE_SIZE,
                    });
                }
                ensure(buf, len, "message")?;
                let payload = buf.copy_to_bytes(len).to_vec();
                let send_mode = SendMode::from_bits(take_u8(&mut buf, "send mode")?);
                InboundOp::ServiceMessage {
                    query_id,
                    payload,
                    send_mode,
                }
            }
            other => return Err(ProtocolError::UnknownOp(other)),
        };
        trace!(op = op.type_name(), query_id = op.query_id(), "decoded operation");
        Ok(op)
    }

    pub fn encode_deploy(deploy: &DeployPayload) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(64);
        buf.put_u128(deploy.initial_allocation);
        buf.put_slice(deploy.asset_handle.as_bytes());
        buf.put_u32(deploy.cliff_end);
        buf.put_u16(deploy.cliff_numerator);
        buf.put_u16(deploy.cliff_denominator);
        buf.put_u32(deploy.vesting_period);
        buf.put_u32(deploy.distribution_frequency);
        buf.to_vec()
    }

    pub fn decode_deploy(data: &[u8]) -> ProtocolResult<DeployPayload> {
        let mut buf = data;
        Ok(DeployPayload {
            initial_allocation: take_u128(&mut buf, "initial allocation")?,
            asset_handle: take_principal(&mut buf, "asset handle")?,
            cliff_end: take_u32(&mut buf, "cliff end")?,
            cliff_numerator: take_u16(&mut buf, "cliff numerator")?,
            cliff_denominator: take_u16(&mut buf, "cliff denominator")?,
            vesting_period: take_u32(&mut buf, "vesting period")?,
            distribution_frequency: take_u32(&mut buf, "distribution frequency")?,
        })
    }

    pub fn encode_transfer(body: &AssetTransferBody) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(128);
        buf.put_u32(OP_ASSET_TRANSFER);
        buf.put_u64(body.query_id);
        buf.put_u128(body.amount);
        buf.put_slice(body.destination.as_bytes());
        buf.put_slice(body.response_destination.as_bytes());
        buf.put_u128(body.forward_amount);
        buf.to_vec()
    }

    pub fn decode_transfer(data: &[u8]) -> ProtocolResult<AssetTransferBody> {
        let mut buf = data;
        let op_code = take_u32(&mut buf, "op-code")?;
        if op_code != OP_ASSET_TRANSFER {
            return Err(ProtocolError::UnknownOp(op_code));
        }
        Ok(AssetTransferBody {
            query_id: take_u64(&mut buf, "query id")?,
            amount: take_u128(&mut buf, "amount")?,
            destination: take_principal(&mut buf, "destination")?,
            response_destination: take_principal(&mut buf, "response destination")?,
            forward_amount: take_u128(&mut buf, "forward amount")?,
        })
    }
}

fn ensure(buf: &[u8], needed: usize, what: &'static str) -> ProtocolResult<()> {
    if buf.len() < needed {
        return Err(ProtocolError::Truncated {
            what,
            needed,
            remaining: buf.len(),
        });
    }
    Ok(())
}

fn take_u8(buf: &mut &[u8], what: &'static str) -> ProtocolResult<u8> {
    ensure(buf, 1, what)?;
    Ok(buf.get_u8())
}

fn take_u16(buf: &mut &[u8], what: &'static str) -> ProtocolResult<u16> {
    ensure(buf, 2, what)?;
    Ok(buf.get_u16())
}

fn take_u32(buf: &mut &[u8], what: &'static str) -> ProtocolResult<u32> {
    ensure(buf, 4, what)?;
    Ok(buf.get_u32())
}

fn take_u64(buf: &mut &[u8], what: &'static str) -> ProtocolResult<u64> {
    ensure(buf, 8, what)?;
    Ok(buf.get_u64())
}

fn take_u128(buf: &mut &[u8], what: &'static str) -> ProtocolResult<u128> {
    ensure(buf, 16, what)?;
    Ok(buf.get_u128())
}

fn take_principal(buf: &mut &[u8], what: &'static str) -> ProtocolResult<Principal> {
    ensure(buf, 32, what)?;
    let mut raw = [0u8; 32];
    buf.copy_to_slice(&mut raw);
    Ok(Principal::from_raw(raw))
}
