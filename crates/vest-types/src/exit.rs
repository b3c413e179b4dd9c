use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric result codes surfaced to whoever submitted an operation.
///
/// The values are fixed by deployed tooling and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCode {
    /// The body ended before its declared layout did.
    MalformedPayload,
    NotFromAdmin,
    NotFromClaimer,
    NotEnoughFee,
    NothingToClaim,
    InvalidVestingPeriod,
    LockupNotFinished,
    UnknownOperation,
}

impl ExitCode {
    pub const fn code(&self) -> u32 {
        match self {
            Self::MalformedPayload => 9,
            Self::NotFromAdmin => 101,
            Self::NotFromClaimer => 102,
            Self::NotEnoughFee => 103,
            Self::NothingToClaim => 104,
            Self::InvalidVestingPeriod => 105,
            Self::LockupNotFinished => 106,
            Self::UnknownOperation => 0xffff,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_deployed_values() {
        assert_eq!(ExitCode::NotFromAdmin.code(), 101);
        assert_eq!(ExitCode::NotFromClaimer.code(), 102);
        assert_eq!(ExitCode::NotEnoughFee.code(), 103);
        assert_eq!(ExitCode::NothingToClaim.code(), 104);
        assert_eq!(ExitCode::InvalidVestingPeriod.code(), 105);
        assert_eq!(ExitCode::LockupNotFinished.code(), 106);
    }

    #[test]
    fn display_includes_numeric_code() {
        assert_eq!(ExitCode::NothingToClaim.to_string(), "NothingToClaim(104)");
    }
}
