use async_trait::async_trait;
use serde_json::Value;

use super::entity::{CardCommandRequest, CardLookupRequest, CardUpdateRequest};
use crate::flow::error::FlowFailure;

/// # Summary
/// 虚拟卡中继接口。每个动作对应服务商的一次调用，服务商响应原样返回。
///
/// # Invariants
/// - 动作与 ID 校验失败时不发出任何外部调用。
/// - 不生成引用号，失败结果不携带任何标识。
#[async_trait]
pub trait CardsPort: Send + Sync {
    /// 注册用户、开卡、充值、提现、冻结、解冻、注销与模拟交易
    async fn execute(&self, request: CardCommandRequest) -> Result<Value, FlowFailure>;

    /// 更新持卡用户资料或开通航空类消费
    async fn update(&self, request: CardUpdateRequest) -> Result<Value, FlowFailure>;

    /// 查询卡片、用户与流水
    async fn lookup(&self, request: CardLookupRequest) -> Result<Value, FlowFailure>;
}
