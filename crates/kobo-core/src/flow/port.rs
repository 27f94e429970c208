use async_trait::async_trait;

use super::entity::{
    FinalizeTradeRequest, PayoutRequest, PayoutStarted, SwapCompleted, TradeCreated,
    TradeFinalized, TradeRequest, TransactionPage, TransactionQuery,
};
use super::error::FlowFailure;

/// # Summary
/// payout 编排服务接口 (quote → initialize → finalize)。
/// API 层只依赖此抽象，具体实现由 DI 容器注入。
///
/// # Invariants
/// - 校验通过之前不得发出任何外部调用。
/// - 引用号在校验通过后立即生成，并随之后的所有结果返回。
/// - 任一步失败立即终止，不回滚已完成的步骤。
#[async_trait]
pub trait PayoutPort: Send + Sync {
    /// 执行一次完整的 payout 调用链
    async fn start_payout(&self, request: PayoutRequest) -> Result<PayoutStarted, FlowFailure>;
}

/// # Summary
/// 交易编排服务接口。
/// 创建与确认刻意解耦，调用方在拿到报价后自行决定是否确认。
#[async_trait]
pub trait TradingPort: Send + Sync {
    /// 创建交易并返回服务商报价 ID
    async fn create_trade(&self, request: TradeRequest) -> Result<TradeCreated, FlowFailure>;

    /// 使用调用方提供的报价 ID 确认交易
    async fn finalize_trade(
        &self,
        request: FinalizeTradeRequest,
    ) -> Result<TradeFinalized, FlowFailure>;
}

/// 固定金额兑换的编排服务接口 (initialize-swap → finalize-swap)
#[async_trait]
pub trait SwapPort: Send + Sync {
    async fn swap(&self) -> Result<SwapCompleted, FlowFailure>;
}

/// 服务商流水查询接口
#[async_trait]
pub trait TransactionsPort: Send + Sync {
    async fn list_transactions(
        &self,
        query: TransactionQuery,
    ) -> Result<TransactionPage, FlowFailure>;
}
