use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use vest_contract::{InboundMessage, OutboundEffect, VestingContract};
use vest_ledger::{InvariantValidator, ReplayEngine};
use vest_protocol::{InboundOp, LockupCodec};
use vest_relay::{InMemoryEmitter, Relay, RelayError};
use vest_types::{Amount, Principal, SendMode, Timestamp};

use crate::cli::*;
use crate::config::Deployment;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Inspect(args) => cmd_inspect(args, cli.format),
        Command::Claimable(args) => cmd_claimable(args, cli.format),
        Command::Simulate(args) => cmd_simulate(args, cli.format),
        Command::Encode(args) => cmd_encode(args, cli.format),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// -- inspect ----------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ScheduleSummary {
    pub admin: Principal,
    pub claimer: Principal,
    pub asset_handle: Principal,
    pub initial_allocation: Amount,
    pub min_fee: Amount,
    pub cliff_end: Timestamp,
    pub cliff_unlock_amount: Amount,
    pub periods_total: u64,
    pub per_period_amount: Amount,
    pub vesting_end: Timestamp,
}

pub fn summarize(deployment: &Deployment) -> ScheduleSummary {
    let schedule = deployment.schedule();
    ScheduleSummary {
        admin: deployment.admin,
        claimer: deployment.claimer,
        asset_handle: deployment.asset_handle,
        initial_allocation: deployment.initial_allocation,
        min_fee: deployment.contract.min_fee,
        cliff_end: deployment.params.cliff_end(),
        cliff_unlock_amount: schedule.cliff_unlock_amount(),
        periods_total: schedule.periods_total(),
        per_period_amount: schedule.per_period_amount(),
        vesting_end: schedule.vesting_end(),
    }
}

fn cmd_inspect(args: InspectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let deployment = Deployment::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let summary = summarize(&deployment);
    if format == OutputFormat::Json {
        return print_json(&summary);
    }
    println!("{} {}", "Lockup".bold(), args.config.display());
    println!("  Admin:       {}", summary.admin.short_id().cyan());
    println!("  Claimer:     {}", summary.claimer.short_id().cyan());
    println!("  Holding:     {}", summary.asset_handle.short_id().cyan());
    println!("  Allocation:  {}", summary.initial_allocation.to_string().bold());
    println!("  Min fee:     {}", summary.min_fee);
    println!("  Cliff end:   {} (unlocks {})", summary.cliff_end.to_string().yellow(), summary.cliff_unlock_amount.to_string().green());
    println!("  Steps:       {} x {}", summary.periods_total, summary.per_period_amount.to_string().green());
    println!("  Vesting end: {}", summary.vesting_end.to_string().yellow());
    Ok(())
}

// -- claimable --------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ClaimableReport {
    pub at: Timestamp,
    pub claimed: Amount,
    pub vested_total: Amount,
    pub claimable: Amount,
    pub next_unlock_at: Option<Timestamp>,
}

pub fn claimable_report(deployment: &Deployment, at: Timestamp, claimed: Amount) -> ClaimableReport {
    let schedule = deployment.schedule();
    ClaimableReport {
        at,
        claimed,
        vested_total: schedule.vested_total(at),
        claimable: schedule.claimable(claimed, at),
        next_unlock_at: schedule.next_unlock_at(at),
    }
}

fn cmd_claimable(args: ClaimableArgs, format: OutputFormat) -> anyhow::Result<()> {
    let deployment = Deployment::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let report = claimable_report(&deployment, Timestamp::from_secs(args.at), args.claimed);
    if format == OutputFormat::Json {
        return print_json(&report);
    }
    println!("At {}: {} claimable", report.at.to_string().yellow(), report.claimable.to_string().green().bold());
    println!("  Vested:  {}", report.vested_total);
    println!("  Claimed: {}", report.claimed);
    match report.next_unlock_at {
        Some(next) => println!("  Next unlock: {}", next.to_string().yellow()),
        None => println!("  {}", "Fully vested".green()),
    }
    Ok(())
}

// -- simulate ---------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Claimed { amount: Amount },
    Rejected { error: String, exit_code: Option<u32> },
}

#[derive(Debug, Serialize)]
pub struct SimulationStep {
    pub at: Timestamp,
    pub outcome: StepOutcome,
    pub remaining_balance: Amount,
    pub claimed_total: Amount,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    pub effects_emitted: usize,
    pub journal_valid: bool,
    pub replay_verified: bool,
}

/// Deploy the lockup behind a relay and claim at each time, in order.
pub async fn simulate(deployment: &Deployment, times: &[u64]) -> anyhow::Result<SimulationReport> {
    let contract = VestingContract::new(deployment.admin, deployment.claimer, deployment.contract.clone());
    let emitter = Arc::new(InMemoryEmitter::new());
    let relay = Relay::spawn(contract, emitter.clone());
    let handle = relay.handle();

    let deploy = LockupCodec::encode_deploy(&deployment.deploy_payload()?);
    handle
        .submit(InboundMessage::new(deployment.admin, 0, Timestamp::zero(), deploy))
        .await?;

    let mut steps = Vec::with_capacity(times.len());
    for (query_id, &secs) in (1u64..).zip(times) {
        let at = Timestamp::from_secs(secs);
        let body = LockupCodec::encode_op(&InboundOp::Claim { query_id })?;
        let message = InboundMessage::new(deployment.claimer, deployment.contract.min_fee, at, body);
        let outcome = match handle.submit(message).await {
            Ok(effects) => StepOutcome::Claimed {
                amount: effects
                    .iter()
                    .map(|effect| match effect {
                        OutboundEffect::TransferAsset(t) => t.amount,
                        OutboundEffect::ForwardRaw(_) => 0,
                    })
                    .sum(),
            },
            Err(RelayError::Contract(err)) => StepOutcome::Rejected {
                exit_code: err.exit_code().map(|c| c.code()),
                error: err.to_string(),
            },
            Err(other) => return Err(other.into()),
        };
        let data = handle.lockup_data().await?;
        steps.push(SimulationStep {
            at,
            outcome,
            remaining_balance: data.remaining_balance,
            claimed_total: data.claimed_total,
        });
    }

    drop(handle);
    let contract = relay.shutdown().await?;
    let ledger = contract
        .ledger()
        .context("lockup was not initialized")?;
    Ok(SimulationReport {
        steps,
        effects_emitted: emitter.len(),
        journal_valid: InvariantValidator::validate(ledger)?.is_valid(),
        replay_verified: ReplayEngine::verify(ledger)?,
    })
}

fn cmd_simulate(args: SimulateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let deployment = Deployment::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(simulate(&deployment, &args.times))?;
    if format == OutputFormat::Json {
        return print_json(&report);
    }
    for step in &report.steps {
        let outcome = match &step.outcome {
            StepOutcome::Claimed { amount } => format!("{} claimed {}", "✓".green(), amount.to_string().bold()),
            StepOutcome::Rejected { error, exit_code } => {
                let code = exit_code.map(|c| format!(" [{c}]")).unwrap_or_default();
                format!("{} {}{}", "✗".red(), error, code.dimmed())
            }
        };
        println!(
            "{}  {}  remaining {} / claimed {}",
            step.at.to_string().yellow(),
            outcome,
            step.remaining_balance,
            step.claimed_total
        );
    }
    let integrity = if report.journal_valid && report.replay_verified { "✓".green() } else { "✗".red() };
    println!("Effects emitted: {}, journal integrity {}", report.effects_emitted, integrity);
    Ok(())
}

// -- encode -----------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct EncodedBody {
    pub kind: &'static str,
    pub body: String,
    pub bytes: usize,
}

pub fn encode(body: &EncodeBody) -> anyhow::Result<EncodedBody> {
    let (kind, bytes) = match body {
        EncodeBody::Claim { query_id } => (
            "claim",
            LockupCodec::encode_op(&InboundOp::Claim { query_id: *query_id })?,
        ),
        EncodeBody::ServiceMessage { payload, mode, query_id } => {
            let payload = hex::decode(payload.trim_start_matches("0x"))
                .context("service message payload must be hex")?;
            let op = InboundOp::ServiceMessage {
                query_id: *query_id,
                payload,
                send_mode: SendMode::from_bits(*mode),
            };
            ("service_message", LockupCodec::encode_op(&op)?)
        }
        EncodeBody::Deploy { config } => {
            let deployment = Deployment::load(config)
                .with_context(|| format!("loading {}", config.display()))?;
            ("deploy", LockupCodec::encode_deploy(&deployment.deploy_payload()?))
        }
    };
    Ok(EncodedBody {
        kind,
        bytes: bytes.len(),
        body: hex::encode(bytes),
    })
}

fn cmd_encode(args: EncodeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let encoded = encode(&args.body)?;
    if format == OutputFormat::Json {
        return print_json(&encoded);
    }
    println!("{}", encoded.body);
    Ok(())
}
