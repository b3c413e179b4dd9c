use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Wall-clock time in whole seconds since the UNIX epoch.
///
/// The message transport stamps every operation with the time it was
/// finalized; the lockup never reads the clock on its own. Ordering is the
/// plain numeric order of the seconds.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp from seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The epoch itself.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Seconds since the epoch.
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Shift forward by `secs`, saturating at the far end of time.
    pub const fn saturating_add(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since `earlier`, or `None` if `earlier` is in the future.
    pub const fn seconds_since(&self, earlier: Timestamp) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// Narrow to the 32-bit wire representation.
    pub fn to_wire(&self) -> Result<u32, TypeError> {
        u32::try_from(self.0)
            .map_err(|_| TypeError::InvalidTimestamp(format!("{} does not fit in 32 bits", self.0)))
    }
}

impl From<u32> for Timestamp {
    fn from(secs: u32) -> Self {
        Self(u64::from(secs))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}s)", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric() {
        assert!(Timestamp::from_secs(100) < Timestamp::from_secs(200));
        assert!(Timestamp::zero() < Timestamp::from_secs(1));
    }

    #[test]
    fn saturating_add_clamps() {
        let t = Timestamp::from_secs(u64::MAX - 1);
        assert_eq!(t.saturating_add(10).as_secs(), u64::MAX);
    }

    #[test]
    fn seconds_since_rejects_future() {
        let a = Timestamp::from_secs(100);
        let b = Timestamp::from_secs(160);
        assert_eq!(b.seconds_since(a), Some(60));
        assert_eq!(a.seconds_since(b), None);
    }

    #[test]
    fn wire_narrowing() {
        assert_eq!(Timestamp::from_secs(1_700_000_000).to_wire().unwrap(), 1_700_000_000);
        assert!(Timestamp::from_secs(u64::from(u32::MAX) + 1).to_wire().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&Timestamp::from_secs(42)).unwrap();
        assert_eq!(json, "42");
    }
}
