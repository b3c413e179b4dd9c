use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use vest_contract::{ForwardRaw, OutboundEffect, TransferAsset};

use crate::error::{RelayError, RelayResult};
use crate::transport::{AssetTransport, EffectEmitter, MessageTransport};

/// Emitter that records effects in memory.
///
/// Used by tests and by the CLI simulator. When set to fail, every emission
/// returns a transport error and nothing is recorded.
#[derive(Debug, Default)]
pub struct InMemoryEmitter {
    emitted: RwLock<Vec<OutboundEffect>>,
    failing: AtomicBool,
}

impl InMemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An emitter whose every delivery fails.
    pub fn failing() -> Self {
        let emitter = Self::default();
        emitter.set_failing(true);
        emitter
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Effects delivered so far, in delivery order.
    pub fn emitted(&self) -> Vec<OutboundEffect> {
        self.emitted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.emitted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, effect: OutboundEffect) -> RelayResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RelayError::TransportError(format!(
                "{} delivery refused",
                effect.type_name()
            )));
        }
        self.emitted
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(effect);
        Ok(())
    }
}

#[async_trait]
impl AssetTransport for InMemoryEmitter {
    async fn transfer(&self, effect: &TransferAsset) -> RelayResult<()> {
        self.record(OutboundEffect::TransferAsset(effect.clone()))
    }
}

#[async_trait]
impl MessageTransport for InMemoryEmitter {
    async fn forward(&self, effect: &ForwardRaw) -> RelayResult<()> {
        self.record(OutboundEffect::ForwardRaw(effect.clone()))
    }
}

#[async_trait]
impl EffectEmitter for InMemoryEmitter {
    async fn emit(&self, effect: &OutboundEffect) -> RelayResult<()> {
        self.record(effect.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vest_types::{Principal, SendMode};

    use super::*;
    use crate::transport::TransportEmitter;

    fn forward() -> ForwardRaw {
        ForwardRaw {
            payload: vec![0xab],
            send_mode: SendMode::PAY_FEES_SEPARATELY,
            query_id: 1,
        }
    }

    fn transfer() -> TransferAsset {
        TransferAsset {
            holding: Principal::derive("holding"),
            amount: 10,
            recipient: Principal::derive("claimer"),
            excess_recipient: Principal::derive("claimer"),
            query_id: 2,
            value: 0,
            send_mode: SendMode::CARRY_REMAINING_VALUE,
        }
    }

    #[tokio::test]
    async fn records_in_order() {
        let emitter = InMemoryEmitter::new();
        emitter.transfer(&transfer()).await.unwrap();
        emitter.forward(&forward()).await.unwrap();
        let emitted = emitter.emitted();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].type_name(), "TransferAsset");
        assert_eq!(emitted[1].type_name(), "ForwardRaw");
    }

    #[tokio::test]
    async fn failing_emitter_records_nothing() {
        let emitter = InMemoryEmitter::failing();
        let err = emitter
            .emit(&OutboundEffect::ForwardRaw(forward()))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::TransportError(_)));
        assert!(emitter.is_empty());

        emitter.set_failing(false);
        emitter.emit(&OutboundEffect::ForwardRaw(forward())).await.unwrap();
        assert_eq!(emitter.len(), 1);
    }

    #[tokio::test]
    async fn transport_emitter_routes_by_kind() {
        let assets = Arc::new(InMemoryEmitter::new());
        let messages = Arc::new(InMemoryEmitter::new());
        let emitter = TransportEmitter::new(assets.clone(), messages.clone());

        emitter.emit(&OutboundEffect::TransferAsset(transfer())).await.unwrap();
        emitter.emit(&OutboundEffect::ForwardRaw(forward())).await.unwrap();

        assert_eq!(assets.emitted(), vec![OutboundEffect::TransferAsset(transfer())]);
        assert_eq!(messages.emitted(), vec![OutboundEffect::ForwardRaw(forward())]);
    }
}
