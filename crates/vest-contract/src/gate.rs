use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ContractError;
use crate::stage::{GateContext, GateStage, OperationRequest, StageDecision, StageResult};
use crate::stages::{AuthorizationStage, FeeStage, ScheduleStage};

// ---------------------------------------------------------------------------
// GateResult
// ---------------------------------------------------------------------------

/// The outcome of running an operation through the full gate pipeline.
#[derive(Debug)]
pub struct GateResult {
    /// The first failure, or `None` if every stage passed.
    pub rejection: Option<ContractError>,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
    /// Total wall-clock time for the pipeline evaluation.
    pub elapsed: Duration,
}

impl GateResult {
    pub fn is_accepted(&self) -> bool {
        self.rejection.is_none()
    }

    /// Turn a rejection into an error, keeping the stage trail on success.
    pub fn into_result(self) -> Result<Vec<StageResult>, ContractError> {
        match self.rejection {
            Some(err) => Err(err),
            None => Ok(self.stage_results),
        }
    }
}

// ---------------------------------------------------------------------------
// OperationGate
// ---------------------------------------------------------------------------

/// The pipeline every decoded operation passes through before the ledger
/// is touched.
pub struct OperationGate {
    stages: Vec<Box<dyn GateStage>>,
}

impl Default for OperationGate {
    fn default() -> Self {
        Self::with_default_stages()
    }
}

impl OperationGate {
    /// Create a gate with an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Authorization -> Fee -> Schedule
    pub fn with_default_stages() -> Self {
        let mut gate = Self::new();
        gate.add_stage(Box::new(AuthorizationStage));
        gate.add_stage(Box::new(FeeStage));
        gate.add_stage(Box::new(ScheduleStage));
        gate
    }

    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Evaluate an operation through the pipeline.
    ///
    /// The pipeline is **fail-fast**: the first stage that fails stops
    /// evaluation and its error becomes the rejection.
    pub fn evaluate(
        &self,
        request: &OperationRequest,
        context: &GateContext,
    ) -> Result<GateResult, ContractError> {
        let pipeline_start = Instant::now();
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let stage_start = Instant::now();
            let decision = stage.evaluate(request, context)?;
            let elapsed = stage_start.elapsed();

            let (passed, reason) = match &decision {
                StageDecision::Pass => (true, None),
                StageDecision::Fail(err) => (false, Some(err.to_string())),
            };
            stage_results.push(StageResult {
                stage_name: stage.name().to_string(),
                passed,
                reason,
                elapsed,
            });

            if let StageDecision::Fail(err) = decision {
                debug!(stage = stage.name(), kind = ?request.kind, error = %err, "operation rejected");
                return Ok(GateResult {
                    rejection: Some(err),
                    stage_results,
                    elapsed: pipeline_start.elapsed(),
                });
            }
        }

        Ok(GateResult {
            rejection: None,
            stage_results,
            elapsed: pipeline_start.elapsed(),
        })
    }
}
