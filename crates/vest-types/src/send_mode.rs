use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Fee-handling policy attached to an outbound message.
///
/// A bit set carried verbatim on the wire as a single byte. The lockup only
/// inspects it to decide whether a service message empties and destroys the
/// account; the transport is responsible for honouring the rest.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendMode(u8);

impl SendMode {
    /// No flags: fees are taken from the attached value.
    pub const ORDINARY: Self = Self(0);
    /// Pay transfer fees separately from the message value.
    pub const PAY_FEES_SEPARATELY: Self = Self(1);
    /// Ignore errors raised while sending.
    pub const IGNORE_ERRORS: Self = Self(2);
    /// Bounce the whole operation if the send fails.
    pub const BOUNCE_ON_FAILURE: Self = Self(16);
    /// Destroy the account once its balance reaches zero.
    pub const DESTROY_IF_ZERO: Self = Self(32);
    /// Carry whatever value remains from the inbound message.
    pub const CARRY_REMAINING_VALUE: Self = Self(64);
    /// Carry the entire remaining balance of the account.
    pub const CARRY_ALL_BALANCE: Self = Self(128);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    pub const fn contains(&self, other: SendMode) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if this mode empties the account and destroys it.
    pub const fn drains_account(&self) -> bool {
        self.contains(Self::CARRY_ALL_BALANCE) && self.contains(Self::DESTROY_IF_ZERO)
    }
}

impl BitOr for SendMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<u8> for SendMode {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl fmt::Debug for SendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(SendMode, &str); 6] = [
            (SendMode::PAY_FEES_SEPARATELY, "PAY_FEES_SEPARATELY"),
            (SendMode::IGNORE_ERRORS, "IGNORE_ERRORS"),
            (SendMode::BOUNCE_ON_FAILURE, "BOUNCE_ON_FAILURE"),
            (SendMode::DESTROY_IF_ZERO, "DESTROY_IF_ZERO"),
            (SendMode::CARRY_REMAINING_VALUE, "CARRY_REMAINING_VALUE"),
            (SendMode::CARRY_ALL_BALANCE, "CARRY_ALL_BALANCE"),
        ];
        let set: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if set.is_empty() {
            write!(f, "SendMode(ORDINARY)")
        } else {
            write!(f, "SendMode({})", set.join(" | "))
        }
    }
}

impl fmt::Display for SendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
