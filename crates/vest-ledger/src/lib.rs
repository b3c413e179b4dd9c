//! Ledger state for the vesting lockup.
//!
//! This crate holds the single mutable record of a lockup. It provides:
//! - [`LockupLedger`]: the owned state (parties, balances, schedule) and its
//!   one transition, [`LockupLedger::record_claim`]
//! - A hash-linked journal of [`ClaimRecord`]s anchored to the [`Genesis`]
//! - [`InvariantValidator`]: conservation, monotonicity, and chain checks
//! - [`ReplayEngine`]: deterministic reconstruction from genesis + journal
//! - Read-only projections backing the lockup queries

pub mod error;
pub mod projection;
pub mod records;
pub mod replay;
pub mod state;
pub mod validation;

pub use error::LedgerError;
pub use projection::{LockupData, ProjectionBuilder, VestingData};
pub use records::{ClaimRecord, Genesis};
pub use replay::{ReplayEngine, ReplayResult};
pub use state::LockupLedger;
pub use validation::{InvariantValidator, ValidationReport, Violation, ViolationKind};
