//! Schedule math for the vesting lockup.
//!
//! Everything in this crate is a pure, total function of the schedule
//! parameters, the original allocation, the amount already claimed, and the
//! time of evaluation. There is no state and no clock access.
//!
//! The release curve is a cliff followed by a stepped linear release:
//!
//! - before `cliff_end` nothing is claimable;
//! - at `cliff_end` the cliff fraction of the allocation unlocks at once;
//! - after that, the remainder unlocks in equal steps every
//!   `distribution_frequency` seconds;
//! - once `cliff_end + vesting_period` is reached, the whole remaining
//!   balance is claimable, including the truncation dust the equal steps
//!   could not distribute.
//!
//! # Quick Start
//!
//! ```rust
//! use vest_schedule::{Schedule, ScheduleParams};
//! use vest_types::Timestamp;
//!
//! const DAY: u64 = 24 * 60 * 60;
//! let cliff_end = Timestamp::from_secs(1_000_000);
//! let params = ScheduleParams::new(cliff_end, 20, 100, 365 * DAY, 30 * DAY).unwrap();
//! let schedule = Schedule::new(params, 200_000);
//!
//! assert_eq!(schedule.cliff_unlock_amount(), 40_000);
//! assert_eq!(schedule.claimable(0, cliff_end.saturating_add(185 * DAY)), 119_998);
//! ```

pub mod error;
pub mod math;
pub mod params;
pub mod schedule;

pub use error::ScheduleError;
pub use params::ScheduleParams;
pub use schedule::Schedule;
