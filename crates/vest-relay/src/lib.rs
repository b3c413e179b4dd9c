//! Message relay for the vesting lockup.
//!
//! The lockup itself never performs I/O. This crate sits between it and the
//! outside world:
//!
//! - [`Relay`] owns a [`VestingContract`](vest_contract::VestingContract),
//!   receives [`InboundMessage`]s in order over a channel, and applies them
//!   one at a time
//! - [`EffectEmitter`] receives the resulting outbound effects, backed by an
//!   [`AssetTransport`] and a [`MessageTransport`]
//! - [`InMemoryEmitter`] records effects for tests and simulation

pub mod error;
pub mod memory;
pub mod relay;
pub mod transport;

pub use error::{RelayError, RelayResult};
pub use memory::InMemoryEmitter;
pub use relay::{Relay, RelayHandle, DEFAULT_CAPACITY};
pub use transport::{AssetTransport, EffectEmitter, MessageTransport, TransportEmitter};
pub use vest_contract::InboundMessage;
