use std::sync::Arc;

use async_trait::async_trait;
use vest_contract::{ForwardRaw, OutboundEffect, TransferAsset};

use crate::error::RelayResult;

/// Delivers token transfers to the asset holding.
#[async_trait]
pub trait AssetTransport: Send + Sync {
    async fn transfer(&self, effect: &TransferAsset) -> RelayResult<()>;
}

/// Delivers raw admin payloads.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn forward(&self, effect: &ForwardRaw) -> RelayResult<()>;
}

/// Accepts every kind of outbound effect.
#[async_trait]
pub trait EffectEmitter: Send + Sync {
    async fn emit(&self, effect: &OutboundEffect) -> RelayResult<()>;
}

/// Routes each effect to the transport that handles its kind.
#[derive(Clone)]
pub struct TransportEmitter {
    asset: Arc<dyn AssetTransport>,
    message: Arc<dyn MessageTransport>,
}

impl TransportEmitter {
    pub fn new(asset: Arc<dyn AssetTransport>, message: Arc<dyn MessageTransport>) -> Self {
        Self { asset, message }
    }
}

#[async_trait]
impl EffectEmitter for TransportEmitter {
    async fn emit(&self, effect: &OutboundEffect) -> RelayResult<()> {
        match effect {
            OutboundEffect::TransferAsset(transfer) => self.asset.transfer(transfer).await,
            OutboundEffect::ForwardRaw(forward) => self.message.forward(forward).await,
        }
    }
}
