use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};
use vest_contract::{InboundMessage, OutboundEffect, VestingContract};
use vest_ledger::LockupData;
use vest_types::{Amount, Timestamp};

use crate::error::{RelayError, RelayResult};
use crate::transport::EffectEmitter;

/// Default depth of the inbound queue.
pub const DEFAULT_CAPACITY: usize = 64;

enum Command {
    Deliver {
        message: InboundMessage,
        reply: oneshot::Sender<RelayResult<Vec<OutboundEffect>>>,
    },
    LockupData {
        reply: oneshot::Sender<LockupData>,
    },
    Claimable {
        now: Timestamp,
        reply: oneshot::Sender<Amount>,
    },
}

/// Cheap, cloneable entry point into a running [`Relay`].
///
/// The order in which messages are accepted by the channel is the order in
/// which the lockup applies them.
#[derive(Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<Command>,
}

impl RelayHandle {
    /// Apply a message and return the effects it produced.
    ///
    /// Resolves once the lockup has applied the message. Emission of the
    /// returned effects is started but not awaited.
    pub async fn submit(&self, message: InboundMessage) -> RelayResult<Vec<OutboundEffect>> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(Command::Deliver { message, reply })
            .await
            .map_err(|_| RelayError::ChannelClosed)?;
        rx.await.map_err(|_| RelayError::ChannelClosed)?
    }

    pub async fn lockup_data(&self) -> RelayResult<LockupData> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(Command::LockupData { reply })
            .await
            .map_err(|_| RelayError::ChannelClosed)?;
        rx.await.map_err(|_| RelayError::ChannelClosed)
    }

    pub async fn claimable_amount(&self, now: Timestamp) -> RelayResult<Amount> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(Command::Claimable { now, reply })
            .await
            .map_err(|_| RelayError::ChannelClosed)?;
        rx.await.map_err(|_| RelayError::ChannelClosed)
    }
}

/// Serial driver that owns a lockup and feeds it one message at a time.
///
/// Effects are handed to the emitter on their own tasks; a failed emission
/// is logged and never reaches back into the ledger.
pub struct Relay {
    handle: RelayHandle,
    task: JoinHandle<VestingContract>,
}

impl Relay {
    pub fn spawn(contract: VestingContract, emitter: Arc<dyn EffectEmitter>) -> Self {
        Self::with_capacity(contract, emitter, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(
        contract: VestingContract,
        emitter: Arc<dyn EffectEmitter>,
        capacity: usize,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(drive(contract, emitter, receiver));
        Self {
            handle: RelayHandle { sender },
            task,
        }
    }

    pub fn handle(&self) -> RelayHandle {
        self.handle.clone()
    }

    /// Stop accepting messages, wait for in-flight emissions, and hand the
    /// lockup back.
    ///
    /// Outstanding [`RelayHandle`] clones keep the queue open; the relay only
    /// finishes once every one of them has been dropped.
    pub async fn shutdown(self) -> RelayResult<VestingContract> {
        drop(self.handle);
        self.task
            .await
            .map_err(|e| RelayError::TaskFailed(e.to_string()))
    }
}

async fn drive(
    mut contract: VestingContract,
    emitter: Arc<dyn EffectEmitter>,
    mut receiver: mpsc::Receiver<Command>,
) -> VestingContract {
    let mut inflight = JoinSet::new();

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(command) => apply(&mut contract, &emitter, &mut inflight, command),
                None => break,
            },
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                if let Err(err) = joined {
                    warn!(error = %err, "emission task aborted");
                }
            }
        }
    }

    while let Some(joined) = inflight.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "emission task aborted");
        }
    }
    debug!("relay stopped");
    contract
}

fn apply(
    contract: &mut VestingContract,
    emitter: &Arc<dyn EffectEmitter>,
    inflight: &mut JoinSet<()>,
    command: Command,
) {
    match command {
        Command::Deliver { message, reply } => {
            let outcome = contract.handle(&message);
            match &outcome {
                Ok(effects) => {
                    for effect in effects.iter().cloned() {
                        let emitter = Arc::clone(emitter);
                        inflight.spawn(async move {
                            if let Err(err) = emitter.emit(&effect).await {
                                warn!(effect = effect.type_name(), error = %err, "effect emission failed");
                            }
                        });
                    }
                }
                Err(err) => {
                    debug!(
                        sender = %message.sender,
                        code = ?err.exit_code().map(|c| c.code()),
                        error = %err,
                        "message rejected"
                    );
                }
            }
            let _ = reply.send(outcome.map_err(RelayError::from));
        }
        Command::LockupData { reply } => {
            let _ = reply.send(contract.lockup_data());
        }
        Command::Claimable { now, reply } => {
            let _ = reply.send(contract.claimable_amount(now));
        }
    }
}
