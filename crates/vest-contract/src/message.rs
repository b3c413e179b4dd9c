use serde::{Deserialize, Serialize};
use vest_types::{Amount, Principal, Timestamp};

/// A message body together with what the transport vouches for.
///
/// `sender` is verified by the transport, `value` is the native value
/// attached, and `now` is the finalization time of the message. The lockup
/// trusts all three and reads no clock of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub sender: Principal,
    pub value: Amount,
    pub now: Timestamp,
    pub body: Vec<u8>,
}

impl InboundMessage {
    pub fn new(sender: Principal, value: Amount, now: Timestamp, body: Vec<u8>) -> Self {
        Self {
            sender,
            value,
            now,
            body,
        }
    }
}
