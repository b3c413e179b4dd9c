use crate::error::ContractError;
use crate::stage::{GateContext, GateStage, OperationRequest, StageDecision};

/// Minimum attached value stage. The same floor applies to both operations.
pub struct FeeStage;

impl GateStage for FeeStage {
    fn name(&self) -> &str {
        "fee"
    }

    fn evaluate(
        &self,
        request: &OperationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, ContractError> {
        if request.attached_value < context.min_fee {
            return Ok(StageDecision::Fail(ContractError::NotEnoughFee {
                attached: request.attached_value,
                min_fee: context.min_fee,
            }));
        }
        Ok(StageDecision::Pass)
    }
}
