use std::time::Duration;

use serde::{Deserialize, Serialize};
use vest_types::{Amount, Principal, Timestamp};

use crate::error::ContractError;

// ---------------------------------------------------------------------------
// OperationRequest
// ---------------------------------------------------------------------------

/// The two operations an initialized lockup accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Claim,
    ServiceMessage,
}

/// A decoded operation and who sent it, evaluated by the gate pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub kind: OperationKind,
    /// Sender as attributed by the message transport.
    pub sender: Principal,
    /// Native value attached to the message.
    pub attached_value: Amount,
}

// ---------------------------------------------------------------------------
// StageDecision
// ---------------------------------------------------------------------------

/// The outcome of a single gate stage evaluation.
#[derive(Debug, PartialEq, Eq)]
pub enum StageDecision {
    Pass,
    /// The operation is rejected with this error.
    Fail(ContractError),
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

// ---------------------------------------------------------------------------
// StageResult
// ---------------------------------------------------------------------------

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug)]
pub struct StageResult {
    pub stage_name: String,
    pub passed: bool,
    /// Populated on failure.
    pub reason: Option<String>,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// GateContext
// ---------------------------------------------------------------------------

/// Lockup state every stage may consult.
///
/// Computed once per message, before any stage runs, so all stages see the
/// same instant and the same balances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateContext {
    pub admin: Principal,
    pub claimer: Principal,
    pub min_fee: Amount,
    /// Claimable amount at `now`.
    pub claimable: Amount,
    pub vesting_end: Timestamp,
    pub now: Timestamp,
}

impl GateContext {
    pub fn is_fully_vested(&self) -> bool {
        self.now >= self.vesting_end
    }
}

// ---------------------------------------------------------------------------
// GateStage trait
// ---------------------------------------------------------------------------

/// A single evaluation stage in the gate pipeline.
///
/// Stages run in order and the first failure wins, so the order in which
/// they are added fixes which rejection a sender sees when several apply.
pub trait GateStage: Send + Sync {
    /// Human-readable name of this stage (e.g., "authorization", "fee").
    fn name(&self) -> &str;

    fn evaluate(
        &self,
        request: &OperationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, ContractError>;
}
