use crate::error::ContractError;
use crate::stage::{GateContext, GateStage, OperationKind, OperationRequest, StageDecision};

/// Time-based business rule stage.
///
/// A claim needs something claimable; a service message needs the lockup
/// to be fully vested.
pub struct ScheduleStage;

impl GateStage for ScheduleStage {
    fn name(&self) -> &str {
        "schedule"
    }

    fn evaluate(
        &self,
        request: &OperationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, ContractError> {
        let decision = match request.kind {
            OperationKind::Claim if context.claimable == 0 => {
                StageDecision::Fail(ContractError::NothingToClaim)
            }
            OperationKind::ServiceMessage if !context.is_fully_vested() => {
                StageDecision::Fail(ContractError::LockupNotFinished {
                    ends_at: context.vesting_end,
                })
            }
            _ => StageDecision::Pass,
        };
        Ok(decision)
    }
}
