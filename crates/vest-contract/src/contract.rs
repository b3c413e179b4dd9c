use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vest_ledger::{Genesis, LockupData, LockupLedger, ProjectionBuilder, VestingData};
use vest_protocol::{DeployPayload, InboundOp, LockupCodec};
use vest_types::{Amount, Principal, SendMode, Timestamp};

use crate::config::ContractConfig;
use crate::effect::{ForwardRaw, OutboundEffect, TransferAsset};
use crate::error::{ContractError, ContractResult};
use crate::gate::OperationGate;
use crate::message::InboundMessage;
use crate::stage::{GateContext, OperationKind, OperationRequest};

/// Lifecycle stage of a lockup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockupStatus {
    /// Deployed with its parties but no schedule yet.
    Uninitialized,
    Active,
    /// Past the vesting end; the whole remaining balance is claimable.
    FullyVested,
    /// Drained and destroyed. Terminal.
    Frozen,
}

impl fmt::Display for LockupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::FullyVested => "fully-vested",
            Self::Frozen => "frozen",
        };
        f.write_str(label)
    }
}

/// A vesting lockup: the operation dispatcher and the ledger it owns.
///
/// Messages are applied one at a time through [`handle`](Self::handle). Each
/// one either fully applies and returns its outbound effects, or is rejected
/// and leaves the lockup exactly as it was.
pub struct VestingContract {
    admin: Principal,
    claimer: Principal,
    config: ContractConfig,
    gate: OperationGate,
    ledger: Option<LockupLedger>,
    frozen: bool,
}

impl VestingContract {
    /// A freshly deployed lockup awaiting its deployment payload.
    pub fn new(admin: Principal, claimer: Principal, config: ContractConfig) -> Self {
        Self {
            admin,
            claimer,
            config,
            gate: OperationGate::with_default_stages(),
            ledger: None,
            frozen: false,
        }
    }

    /// Apply one inbound message.
    ///
    /// While uninitialized the body is read as a deployment payload; after
    /// that it is read as an operation.
    pub fn handle(&mut self, message: &InboundMessage) -> ContractResult<Vec<OutboundEffect>> {
        if self.frozen {
            return Err(ContractError::Frozen);
        }
        if self.ledger.is_none() {
            if message.sender != self.admin {
                return Err(ContractError::NotFromAdmin);
            }
            let deploy = LockupCodec::decode_deploy(&message.body)?;
            self.initialize(message.sender, &deploy)?;
            return Ok(Vec::new());
        }
        let op = LockupCodec::decode_op(&message.body)?;
        self.dispatch(message, op)
    }

    /// Bind the schedule and allocation. Only the admin may do this, once.
    pub fn initialize(&mut self, sender: Principal, deploy: &DeployPayload) -> ContractResult<()> {
        if self.frozen {
            return Err(ContractError::Frozen);
        }
        if sender != self.admin {
            return Err(ContractError::NotFromAdmin);
        }
        if self.ledger.is_some() {
            return Err(ContractError::stage("lifecycle", "lockup already initialized"));
        }
        let schedule = deploy.schedule_params()?;
        let ledger = LockupLedger::open(Genesis {
            admin: self.admin,
            claimer: self.claimer,
            asset_handle: deploy.asset_handle,
            schedule,
            initial_allocation: deploy.initial_allocation,
        })?;
        info!(
            admin = %self.admin,
            claimer = %self.claimer,
            allocation = deploy.initial_allocation,
            cliff_end = deploy.cliff_end,
            "lockup initialized"
        );
        self.ledger = Some(ledger);
        Ok(())
    }

    fn dispatch(&mut self, message: &InboundMessage, op: InboundOp) -> ContractResult<Vec<OutboundEffect>> {
        let ledger = self
            .ledger
            .as_mut()
            .ok_or_else(|| ContractError::stage("lifecycle", "lockup not initialized"))?;

        let kind = match op {
            InboundOp::Claim { .. } => OperationKind::Claim,
            InboundOp::ServiceMessage { .. } => OperationKind::ServiceMessage,
        };
        let request = OperationRequest {
            kind,
            sender: message.sender,
            attached_value: message.value,
        };
        let context = GateContext {
            admin: self.admin,
            claimer: self.claimer,
            min_fee: self.config.min_fee,
            claimable: ledger.claimable(message.now),
            vesting_end: ledger.schedule().vesting_end(),
            now: message.now,
        };
        self.gate.evaluate(&request, &context)?.into_result()?;

        match op {
            InboundOp::Claim { query_id } => {
                let record = ledger.record_claim(context.claimable, message.now)?;
                debug!(
                    claimer = %self.claimer,
                    amount = record.amount,
                    remaining = record.remaining_after,
                    query_id,
                    "claim settled"
                );
                Ok(vec![OutboundEffect::TransferAsset(TransferAsset {
                    holding: ledger.asset_handle(),
                    amount: record.amount,
                    recipient: self.claimer,
                    excess_recipient: self.claimer,
                    query_id,
                    value: message.value,
                    send_mode: SendMode::CARRY_REMAINING_VALUE,
                })])
            }
            InboundOp::ServiceMessage {
                query_id,
                payload,
                send_mode,
            } => {
                debug!(
                    admin = %self.admin,
                    size = payload.len(),
                    mode = %send_mode,
                    query_id,
                    "service message relayed"
                );
                if send_mode.drains_account() {
                    let remaining = ledger.remaining_balance();
                    if remaining > 0 {
                        warn!(remaining, "lockup frozen with unclaimed tokens");
                    }
                    self.frozen = true;
                    info!(admin = %self.admin, "lockup frozen");
                }
                Ok(vec![OutboundEffect::ForwardRaw(ForwardRaw {
                    payload,
                    send_mode,
                    query_id,
                })])
            }
        }
    }

    // -- queries ------------------------------------------------------------

    pub fn lockup_data(&self) -> LockupData {
        match &self.ledger {
            Some(ledger) => ProjectionBuilder::lockup_data(ledger),
            None => LockupData::uninitialized(self.admin, self.claimer),
        }
    }

    /// `None` until the deployment payload has been applied.
    pub fn vesting_data(&self) -> Option<VestingData> {
        self.ledger.as_ref().map(ProjectionBuilder::vesting_data)
    }

    pub fn claimable_amount(&self, now: Timestamp) -> Amount {
        self.ledger.as_ref().map_or(0, |l| l.claimable(now))
    }

    pub fn min_fee(&self) -> Amount {
        self.config.min_fee
    }

    pub fn status(&self, now: Timestamp) -> LockupStatus {
        if self.frozen {
            return LockupStatus::Frozen;
        }
        match &self.ledger {
            None => LockupStatus::Uninitialized,
            Some(ledger) if ledger.schedule().is_fully_vested(now) => LockupStatus::FullyVested,
            Some(_) => LockupStatus::Active,
        }
    }

    /// Total unlocked at `now`, claimed or not.
    pub fn vested_total(&self, now: Timestamp) -> Amount {
        self.ledger
            .as_ref()
            .map_or(0, |l| l.schedule().vested_total(now))
    }

    pub fn next_unlock_at(&self, now: Timestamp) -> Option<Timestamp> {
        self.ledger
            .as_ref()
            .and_then(|l| l.schedule().next_unlock_at(now))
    }

    pub fn admin(&self) -> Principal {
        self.admin
    }

    pub fn claimer(&self) -> Principal {
        self.claimer
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn ledger(&self) -> Option<&LockupLedger> {
        self.ledger.as_ref()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> VestingContract {
        VestingContract::new(
            Principal::derive("admin"),
            Principal::derive("claimer"),
            ContractConfig::with_min_fee(10),
        )
    }

    fn deploy() -> DeployPayload {
        DeployPayload {
            initial_allocation: 1_000,
            asset_handle: Principal::derive("holding"),
            cliff_end: 100,
            cliff_numerator: 1,
            cliff_denominator: 2,
            vesting_period: 100,
            distribution_frequency: 10,
        }
    }

    fn msg(sender: &str, value: u128, now: u64, body: Vec<u8>) -> InboundMessage {
        InboundMessage::new(Principal::derive(sender), value, Timestamp::from_secs(now), body)
    }

    #[test]
    fn deploy_via_handle() {
        let mut c = contract();
        assert_eq!(c.status(Timestamp::zero()), LockupStatus::Uninitialized);
        assert!(!c.lockup_data().initialized);
        assert!(c.vesting_data().is_none());

        let effects = c
            .handle(&msg("admin", 0, 0, LockupCodec::encode_deploy(&deploy())))
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(c.status(Timestamp::zero()), LockupStatus::Active);
        assert_eq!(c.lockup_data().remaining_balance, 1_000);
        assert_eq!(c.vesting_data().unwrap().cliff_unlock_amount, 500);
    }

    #[test]
    fn deploy_from_stranger_is_rejected() {
        let mut c = contract();
        let err = c
            .handle(&msg("claimer", 0, 0, LockupCodec::encode_deploy(&deploy())))
            .unwrap_err();
        assert_eq!(err, ContractError::NotFromAdmin);
        assert_eq!(c.status(Timestamp::zero()), LockupStatus::Uninitialized);
    }

    #[test]
    fn malformed_deploy_is_rejected() {
        let mut c = contract();
        let mut body = LockupCodec::encode_deploy(&deploy());
        body.truncate(20);
        let err = c.handle(&msg("admin", 0, 0, body)).unwrap_err();
        assert_eq!(err.exit_code().map(|e| e.code()), Some(9));
        assert!(c.ledger().is_none());
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let mut c = contract();
        let mut bad = deploy();
        bad.distribution_frequency = 0;
        let err = c
            .handle(&msg("admin", 0, 0, LockupCodec::encode_deploy(&bad)))
            .unwrap_err();
        assert_eq!(err.exit_code().map(|e| e.code()), Some(105));
        assert!(c.ledger().is_none());
    }

    #[test]
    fn second_initialize_is_refused() {
        let mut c = contract();
        c.initialize(Principal::derive("admin"), &deploy()).unwrap();
        assert!(c.initialize(Principal::derive("admin"), &deploy()).is_err());
    }

    #[test]
    fn unknown_op_after_init() {
        let mut c = contract();
        c.initialize(Principal::derive("admin"), &deploy()).unwrap();
        let before = c.lockup_data();
        let err = c
            .handle(&msg("claimer", 10, 150, vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]))
            .unwrap_err();
        assert_eq!(err, ContractError::UnknownOperation(1));
        assert_eq!(err.exit_code().map(|e| e.code()), Some(0xffff));
        assert_eq!(c.lockup_data(), before);
        assert!(c.ledger().is_some_and(|l| l.journal().is_empty()));
    }

    #[test]
    fn claim_transfers_claimable() {
        let mut c = contract();
        c.initialize(Principal::derive("admin"), &deploy()).unwrap();
        let body = LockupCodec::encode_op(&InboundOp::Claim { query_id: 3 }).unwrap();
        let effects = c.handle(&msg("claimer", 25, 120, body)).unwrap();
        // cliff 500 + 2 steps of 50
        match &effects[..] {
            [OutboundEffect::TransferAsset(t)] => {
                assert_eq!(t.amount, 600);
                assert_eq!(t.value, 25);
                assert_eq!(t.query_id, 3);
                assert_eq!(t.holding, Principal::derive("holding"));
                assert_eq!(t.send_mode, SendMode::CARRY_REMAINING_VALUE);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert_eq!(c.lockup_data().claimed_total, 600);
        assert_eq!(c.claimable_amount(Timestamp::from_secs(120)), 0);
    }

    #[test]
    fn progress_queries() {
        let mut c = contract();
        assert_eq!(c.vested_total(Timestamp::from_secs(150)), 0);
        assert_eq!(c.next_unlock_at(Timestamp::from_secs(150)), None);
        c.initialize(Principal::derive("admin"), &deploy()).unwrap();
        assert_eq!(c.vested_total(Timestamp::from_secs(155)), 750);
        assert_eq!(
            c.next_unlock_at(Timestamp::from_secs(155)),
            Some(Timestamp::from_secs(160))
        );
        assert_eq!(c.status(Timestamp::from_secs(200)), LockupStatus::FullyVested);
        assert_eq!(c.next_unlock_at(Timestamp::from_secs(200)), None);
    }
}
