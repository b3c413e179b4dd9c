use thiserror::Error;

/// Errors produced when constructing schedule parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid vesting period: period={period}s, frequency={frequency}s")]
    InvalidVestingPeriod { period: u64, frequency: u64 },

    #[error("invalid cliff ratio: {numerator}/{denominator}")]
    InvalidCliffRatio { numerator: u16, denominator: u16 },
}
