//! Built-in gate stages.

pub mod authorization;
pub mod fee;
pub mod schedule;

pub use authorization::AuthorizationStage;
pub use fee::FeeStage;
pub use schedule::ScheduleStage;
