//! Foundation types for the vesting lockup.
//!
//! This crate provides the identity, temporal, and value types shared by the
//! schedule math, the ledger, the wire codec, and the operation dispatcher.
//! Every other `vest-*` crate depends on `vest-types`.
//!
//! # Key Types
//!
//! - [`Principal`]: 32-byte account identifier (admin, claimer, asset holding)
//! - [`Timestamp`]: seconds since the UNIX epoch
//! - [`Amount`]: token or native value in smallest units
//! - [`SendMode`]: outbound fee-handling policy flags
//! - [`ExitCode`]: numeric result codes surfaced to callers

pub mod error;
pub mod exit;
pub mod principal;
pub mod send_mode;
pub mod temporal;

pub use error::TypeError;
pub use exit::ExitCode;
pub use principal::Principal;
pub use send_mode::SendMode;
pub use temporal::Timestamp;

/// Token or native value, in smallest indivisible units.
pub type Amount = u128;
