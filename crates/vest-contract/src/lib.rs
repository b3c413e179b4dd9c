//! Operation dispatcher for the vesting lockup.
//!
//! Every inbound message body passes through [`VestingContract::handle`]:
//! the body is decoded, the operation runs through a fail-fast gate
//! pipeline (authorization, fee, schedule), and only then is the ledger
//! mutated. Success yields a list of [`OutboundEffect`]s for the relay to
//! emit; rejection yields a [`ContractError`] carrying its exit code.
//!
//! # Quick Start
//!
//! ```rust
//! use vest_contract::{ContractConfig, InboundMessage, OutboundEffect, VestingContract};
//! use vest_protocol::{DeployPayload, InboundOp, LockupCodec};
//! use vest_types::{Principal, Timestamp};
//!
//! let admin = Principal::derive("admin");
//! let claimer = Principal::derive("claimer");
//! let mut lockup = VestingContract::new(admin, claimer, ContractConfig::default());
//!
//! let deploy = DeployPayload {
//!     initial_allocation: 200_000,
//!     asset_handle: Principal::derive("holding"),
//!     cliff_end: 1_000,
//!     cliff_numerator: 20,
//!     cliff_denominator: 100,
//!     vesting_period: 3_650,
//!     distribution_frequency: 365,
//! };
//! let body = LockupCodec::encode_deploy(&deploy);
//! lockup.handle(&InboundMessage::new(admin, 0, Timestamp::zero(), body)).unwrap();
//!
//! let claim = LockupCodec::encode_op(&InboundOp::Claim { query_id: 1 }).unwrap();
//! let at_cliff = Timestamp::from_secs(1_000);
//! let effects = lockup
//!     .handle(&InboundMessage::new(claimer, 50_000_000, at_cliff, claim))
//!     .unwrap();
//! assert!(matches!(&effects[..], [OutboundEffect::TransferAsset(t)] if t.amount == 40_000));
//! ```

pub mod config;
pub mod contract;
pub mod effect;
pub mod error;
pub mod gate;
pub mod message;
pub mod stage;
pub mod stages;

pub use config::{ContractConfig, DEFAULT_MIN_FEE};
pub use contract::{LockupStatus, VestingContract};
pub use effect::{ForwardRaw, OutboundEffect, TransferAsset};
pub use error::{ContractError, ContractResult};
pub use gate::{GateResult, OperationGate};
pub use message::InboundMessage;
pub use stage::{GateContext, GateStage, OperationKind, OperationRequest, StageDecision, StageResult};
pub use stages::{AuthorizationStage, FeeStage, ScheduleStage};
