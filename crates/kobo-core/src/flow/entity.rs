use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::reference::Reference;
use crate::flow::error::FlowError;

/// # Summary
/// 服务商签发的报价 ID。
///
/// # Invariants
/// - 永远不在本地生成，只从上一步的响应信封 `data.quoteId` 中提取。
/// - 从第 N 步取得后原样传入第 N+1 步，不做任何修改。
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct QuoteId(pub String);

impl QuoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// # Summary
    /// 从服务商响应信封 `{ "data": { "quoteId": "..." } }` 中提取报价 ID。
    ///
    /// # Logic
    /// 1. 将原始字节解析为信封结构 (其余字段忽略)。
    /// 2. 要求 `data.quoteId` 存在且为非空字符串。
    ///
    /// # Returns
    /// * 失败时返回描述原因的字符串，由调用方包装为对应步骤的解析错误。
    pub fn from_envelope(body: &[u8]) -> Result<Self, String> {
        let envelope: ProviderEnvelope =
            serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {}", e))?;

        match envelope.data.and_then(|d| d.quote_id) {
            Some(id) if !id.trim().is_empty() => Ok(QuoteId(id)),
            Some(_) => Err("data.quoteId is empty".to_string()),
            None => Err("missing data.quoteId".to_string()),
        }
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct ProviderEnvelope {
    data: Option<EnvelopeData>,
}

#[derive(Deserialize)]
struct EnvelopeData {
    #[serde(rename = "quoteId")]
    quote_id: Option<String>,
}

/// 空白值视为缺失；通过校验的值原样转发，不做规范化
fn require(field: &str, value: String) -> Result<String, FlowError> {
    if value.trim().is_empty() {
        return Err(FlowError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

// ============================================================
//  Payout
// ============================================================

/// 发起 payout 的原始请求 (尚未校验)
#[derive(Debug, Clone, Default)]
pub struct PayoutRequest {
    pub name: String,
    pub account_number: String,
}

/// 校验通过的收款人信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutBeneficiary {
    pub account_name: String,
    pub account_number: String,
}

impl PayoutRequest {
    /// 要求 `name` 与 `accountNumber` 均非空
    pub fn validate(self) -> Result<PayoutBeneficiary, FlowError> {
        Ok(PayoutBeneficiary {
            account_name: require("name", self.name)?,
            account_number: require("accountNumber", self.account_number)?,
        })
    }
}

/// payout 已被服务商受理，最终结果通过服务商 webhook 异步到达
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutStarted {
    pub reference: Reference,
}

/// # Summary
/// payout 状态机的终止状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutState {
    Succeeded,
    FailedValidation,
    FailedConfiguration,
    FailedAtQuote,
    FailedAtInitialize,
    FailedAtFinalize,
}

impl From<&FlowError> for PayoutState {
    fn from(err: &FlowError) -> Self {
        use crate::flow::error::Step;

        match err {
            FlowError::Validation(_) => PayoutState::FailedValidation,
            FlowError::Configuration(_) => PayoutState::FailedConfiguration,
            _ => match err.step() {
                Some(Step::Initialize) => PayoutState::FailedAtInitialize,
                Some(Step::Finalize) => PayoutState::FailedAtFinalize,
                _ => PayoutState::FailedAtQuote,
            },
        }
    }
}

// ============================================================
//  Trade
// ============================================================

/// 创建交易的原始请求 (尚未校验)
#[derive(Debug, Clone, Default)]
pub struct TradeRequest {
    pub side: String,
    pub asset: String,
    pub currency: String,
    pub amount: Option<Decimal>,
}

/// 校验通过的交易意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOrder {
    pub side: String,
    pub asset: String,
    pub currency: String,
    pub amount: Decimal,
}

impl TradeRequest {
    /// 要求 `side` / `asset` / `currency` 非空，`amount` 存在且不为零。
    /// 金额的符号不在本地判断，交由服务商校验。
    pub fn validate(self) -> Result<TradeOrder, FlowError> {
        let side = require("side", self.side)?;
        let asset = require("asset", self.asset)?;
        let currency = require("currency", self.currency)?;
        let amount = match self.amount {
            Some(a) if !a.is_zero() => a,
            Some(_) => {
                return Err(FlowError::Validation("amount must not be zero".to_string()));
            }
            None => return Err(FlowError::Validation("amount is required".to_string())),
        };

        Ok(TradeOrder {
            side,
            asset,
            currency,
            amount,
        })
    }
}

/// 交易已创建，调用方需使用 `quote_id` 自行确认
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeCreated {
    pub quote_id: QuoteId,
    pub reference: Reference,
}

/// 确认交易的原始请求
#[derive(Debug, Clone, Default)]
pub struct FinalizeTradeRequest {
    pub quote_id: Option<String>,
}

impl FinalizeTradeRequest {
    /// 要求 `quoteId` 为非空字符串
    pub fn validate(self) -> Result<QuoteId, FlowError> {
        match self.quote_id {
            Some(id) if !id.trim().is_empty() => Ok(QuoteId(id)),
            _ => Err(FlowError::Validation("quoteId is required".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeFinalized {
    pub quote_id: QuoteId,
}

// ============================================================
//  Swap
// ============================================================

/// swap 完成。内部生成的引用号不回显给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCompleted;

// ============================================================
//  Transactions
// ============================================================

/// 流水查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<String>,
    pub kind: Option<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            kind: None,
        }
    }
}

impl TransactionQuery {
    /// 转换为出站查询参数；`status` / `type` 仅在非空时附加
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(status) = present(&self.status) {
            params.push(("status".to_string(), status.to_string()));
        }
        if let Some(kind) = present(&self.kind) {
            params.push(("type".to_string(), kind.to_string()));
        }
        params
    }

    /// 把空白过滤条件归一为 `None`
    pub fn with_filters(mut self, status: Option<String>, kind: Option<String>) -> Self {
        self.status = status.filter(|s| !s.trim().is_empty());
        self.kind = kind.filter(|s| !s.trim().is_empty());
        self
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// 服务商返回的一页流水，`data` 原样透传
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    pub data: serde_json::Value,
    pub query: TransactionQuery,
}
