use std::sync::Arc;

use async_trait::async_trait;
use kobo_core::common::reference::{Reference, ReferenceGenerator};
use kobo_core::config::AppConfig;
use kobo_core::flow::entity::{
    FinalizeTradeRequest, QuoteId, TradeCreated, TradeFinalized, TradeOrder, TradeRequest,
};
use kobo_core::flow::error::{FlowError, FlowFailure, Step};
use kobo_core::flow::port::TradingPort;
use kobo_core::provider::port::ProviderPort;

use crate::step::{self, Endpoint};
use crate::wire::{CreateTradeRequest, FinalizeRequest};

/// # Summary
/// 交易编排服务。创建与确认是两个独立操作，共用同一份服务商配置。
///
/// # Invariants
/// - 创建后不会自动确认：交易报价可能需要调用方核对后再确认。
/// - 确认只使用调用方提供的报价 ID，不生成新的引用号。
pub struct TradeService {
    provider: Arc<dyn ProviderPort>,
    config: Arc<AppConfig>,
    references: Arc<dyn ReferenceGenerator>,
}

impl TradeService {
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

    async fn create(&self, reference: &Reference, order: &TradeOrder) -> Result<QuoteId, FlowError> {
        let endpoint = Endpoint::trade(&self.config.provider)?;

        let request = CreateTradeRequest {
            side: &order.side,
            asset: &order.asset,
            currency: &order.currency,
            amount: order.amount,
            reference: reference.as_str(),
        };
        let raw = step::call(
            self.provider.as_ref(),
            Step::CreateTrade,
            &endpoint,
            "trade",
            &request,
        )
        .await?;
        tracing::info!("Trade {} created: {}", reference, step::body_text(&raw));

        step::quote_id(Step::CreateTrade, &raw)
    }

    async fn finalize(&self, quote_id: &QuoteId) -> Result<(), FlowError> {
        let endpoint = Endpoint::trade(&self.config.provider)?;

        let request = FinalizeRequest {
            quote_id: quote_id.as_str(),
        };
        let raw = step::call(
            self.provider.as_ref(),
            Step::FinalizeTrade,
            &endpoint,
            "trade/finalize",
            &request,
        )
        .await?;
        tracing::info!("Trade {} finalized: {}", quote_id, step::body_text(&raw));

        Ok(())
    }
}

#[async_trait]
impl TradingPort for TradeService {
    /// # Logic
    /// 1. 校验 side / asset / currency / amount。
    /// 2. 生成引用号。
    /// 3. 调用服务商创建交易并提取报价 ID。
    async fn create_trade(&self, request: TradeRequest) -> Result<TradeCreated, FlowFailure> {
        let order = request.validate().map_err(|e| {
            tracing::warn!("Trade request rejected: {}", e);
            FlowFailure::new(e)
        })?;

        let reference = self.references.next_reference();

        match self.create(&reference, &order).await {
            Ok(quote_id) => Ok(TradeCreated {
                quote_id,
                reference,
            }),
            Err(error) => {
                tracing::error!("Trade {} failed: {}", reference, error);
                Err(FlowFailure::new(error).with_reference(reference))
            }
        }
    }

    async fn finalize_trade(
        &self,
        request: FinalizeTradeRequest,
    ) -> Result<TradeFinalized, FlowFailure> {
        let quote_id = request.validate().map_err(|e| {
            tracing::warn!("Trade finalization rejected: {}", e);
            FlowFailure::new(e)
        })?;

        match self.finalize(&quote_id).await {
            Ok(()) => Ok(TradeFinalized { quote_id }),
            Err(error) => {
                tracing::error!("Trade finalization for {} failed: {}", quote_id, error);
                Err(FlowFailure::new(error).with_quote_id(quote_id))
            }
        }
    }
}
