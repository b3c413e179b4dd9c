use serde::{Deserialize, Serialize};
use vest_types::Timestamp;

use crate::error::ScheduleError;

/// Immutable release parameters of a lockup.
///
/// Only constructible through [`ScheduleParams::new`] (or deserialization,
/// which goes through the same checks), so every value in circulation
/// satisfies:
///
/// - `0 < cliff_numerator <= cliff_denominator`
/// - `0 < distribution_frequency <= vesting_period`
/// - `vesting_period / distribution_frequency >= 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedParams")]
pub struct ScheduleParams {
    cliff_end: Timestamp,
    cliff_numerator: u16,
    cliff_denominator: u16,
    vesting_period: u64,
    distribution_frequency: u64,
}

impl ScheduleParams {
    pub fn new(
        cliff_end: Timestamp,
        cliff_numerator: u16,
        cliff_denominator: u16,
        vesting_period: u64,
        distribution_frequency: u64,
    ) -> Result<Self, ScheduleError> {
        if vesting_period == 0
            || distribution_frequency == 0
            || distribution_frequency > vesting_period
        {
            return Err(ScheduleError::InvalidVestingPeriod {
                period: vesting_period,
                frequency: distribution_frequency,
            });
        }
        if cliff_denominator == 0 || cliff_numerator == 0 || cliff_numerator > cliff_denominator {
            return Err(ScheduleError::InvalidCliffRatio {
                numerator: cliff_numerator,
                denominator: cliff_denominator,
            });
        }
        Ok(Self {
            cliff_end,
            cliff_numerator,
            cliff_denominator,
            vesting_period,
            distribution_frequency,
        })
    }

    /// When the cliff ends and the cliff fraction unlocks.
    pub fn cliff_end(&self) -> Timestamp {
        self.cliff_end
    }

    pub fn cliff_numerator(&self) -> u16 {
        self.cliff_numerator
    }

    pub fn cliff_denominator(&self) -> u16 {
        self.cliff_denominator
    }

    /// Length of the post-cliff release window, in seconds.
    pub fn vesting_period(&self) -> u64 {
        self.vesting_period
    }

    /// Length of one release step, in seconds.
    pub fn distribution_frequency(&self) -> u64 {
        self.distribution_frequency
    }
}

#[derive(Deserialize)]
struct UncheckedParams {
    cliff_end: Timestamp,
    cliff_numerator: u16,
    cliff_denominator: u16,
    vesting_period: u64,
    distribution_frequency: u64,
}

impl TryFrom<UncheckedParams> for ScheduleParams {
    type Error = ScheduleError;

    fn try_from(raw: UncheckedParams) -> Result<Self, Self::Error> {
        Self::new(
            raw.cliff_end,
            raw.cliff_numerator,
            raw.cliff_denominator,
            raw.vesting_period,
            raw.distribution_frequency,
        )
    }
}
