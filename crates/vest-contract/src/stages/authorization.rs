use crate::error::ContractError;
use crate::stage::{GateContext, GateStage, OperationKind, OperationRequest, StageDecision};

/// Sender verification stage.
///
/// Claims must come from the claimer and service messages from the admin.
/// The two roles are not interchangeable, even when held by one principal
/// for different lockups.
pub struct AuthorizationStage;

impl GateStage for AuthorizationStage {
    fn name(&self) -> &str {
        "authorization"
    }

    fn evaluate(
        &self,
        request: &OperationRequest,
        context: &GateContext,
    ) -> Result<StageDecision, ContractError> {
        let decision = match request.kind {
            OperationKind::Claim if request.sender != context.claimer => {
                StageDecision::Fail(ContractError::NotFromClaimer)
            }
            OperationKind::ServiceMessage if request.sender != context.admin => {
                StageDecision::Fail(ContractError::NotFromAdmin)
            }
            _ => StageDecision::Pass,
        };
        Ok(decision)
    }
}
