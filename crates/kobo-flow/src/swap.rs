use std::sync::Arc;

use async_trait::async_trait;
use kobo_core::common::reference::ReferenceGenerator;
use kobo_core::config::AppConfig;
use kobo_core::flow::entity::SwapCompleted;
use kobo_core::flow::error::{FlowError, FlowFailure, Step};
use kobo_core::flow::port::SwapPort;
use kobo_core::provider::port::ProviderPort;

use crate::step::{self, Endpoint};
use crate::wire::{FinalizeSwapRequest, InitializeSwapRequest};

/// # Summary
/// 固定金额的比特币兑换编排服务 (initialize-swap → finalize-swap)。
///
/// # Invariants
/// - 兑换金额来自 `AppConfig::swap`，调用方无需任何输入。
/// - finalize 阶段生成的引用号只在内部使用，不回显给调用方。
pub struct SwapService {
    provider: Arc<dyn ProviderPort>,
    config: Arc<AppConfig>,
    references: Arc<dyn ReferenceGenerator>,
}

impl SwapService {
    pub fn new(
        provider: Arc<dyn ProviderPort>,
        config: Arc<AppConfig>,
        references: Arc<dyn ReferenceGenerator>,
    ) -> Self {
        Self {
            provider,
            config,
            references,
        }
    }

    async fn run(&self) -> Result<(), FlowError> {
        let endpoint = Endpoint::trade(&self.config.provider)?;
        let provider = self.provider.as_ref();

        // 1. 初始化兑换
        let init_request = InitializeSwapRequest {
            amount: self.config.swap.amount,
        };
        let raw = step::call(
            provider,
            Step::InitializeSwap,
            &endpoint,
            "wallets/initialize-swap-for-bitcoin",
            &init_request,
        )
        .await?;
        let quote_id = step::quote_id(Step::InitializeSwap, &raw)?;
        tracing::info!("Swap initialized: {}", step::body_text(&raw));

        // 2. 确认兑换
        let reference = self.references.next_reference();
        tracing::info!("Finalizing swap {} with reference {}", quote_id, reference);
        let finalize_request = FinalizeSwapRequest {
            quote_id: quote_id.as_str(),
            reference: reference.as_str(),
        };
        let raw = step::call(
            provider,
            Step::FinalizeSwap,
            &endpoint,
            "wallets/finalize-swap-for-bitcoin",
            &finalize_request,
        )
        .await?;
        tracing::info!("Swap {} finalized: {}", reference, step::body_text(&raw));

        Ok(())
    }
}

#[async_trait]
impl SwapPort for SwapService {
    async fn swap(&self) -> Result<SwapCompleted, FlowFailure> {
        self.run().await.map(|()| SwapCompleted).map_err(|error| {
            tracing::error!("Swap failed: {}", error);
            FlowFailure::new(error)
        })
    }
}
