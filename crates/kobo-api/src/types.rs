//! # DTO (Data Transfer Object) 层
//!
//! 定义面向客户端的 JSON 请求与响应结构。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kobo_core::card::entity::{CardCommandRequest, CardLookupRequest, CardUpdateRequest};
use kobo_core::common::reference::Reference;
use kobo_core::flow::entity::{
    FinalizeTradeRequest, PayoutRequest, QuoteId, TradeRequest, TransactionPage, TransactionQuery,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================
//  通用响应 DTO
// ============================================================

/// 所有编排接口共用的响应体。
///
/// 未携带的标识字段直接省略，不输出 `null`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlowReply {
    /// 人类可读的结果或诊断信息
    #[schema(example = "Payout process started. Check the webhook site for final confirmation.")]
    pub message: String,
    /// 服务商报价 ID
    #[serde(rename = "quoteId", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Q-100")]
    pub quote_id: Option<String>,
    /// 本地生成的关联引用号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "1f0c6a7e-3f55-4b3e-9d6b-2c1d2a9f1b2e")]
    pub reference: Option<String>,
}

impl FlowReply {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference.0);
        self
    }

    pub fn with_quote_id(mut self, quote_id: QuoteId) -> Self {
        self.quote_id = Some(quote_id.0);
        self
    }
}

// ============================================================
//  Payout DTO
// ============================================================

/// 发起 payout 请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoutBody {
    /// 收款账户户名
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// 收款银行账号
    #[schema(example = "1234567890")]
    pub account_number: String,
}

impl From<PayoutBody> for PayoutRequest {
    fn from(body: PayoutBody) -> Self {
        Self {
            name: body.name,
            account_number: body.account_number,
        }
    }
}

// ============================================================
//  Trade DTO
// ============================================================

/// 创建交易请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TradeBody {
    /// 方向 (buy / sell)
    #[schema(example = "buy")]
    pub side: String,
    /// 数字资产
    #[schema(example = "BTC")]
    pub asset: String,
    /// 计价货币
    #[schema(example = "USD")]
    pub currency: String,
    /// 金额，不能为零
    #[schema(value_type = Option<f64>, example = 25.5)]
    pub amount: Option<Decimal>,
}

impl From<TradeBody> for TradeRequest {
    fn from(body: TradeBody) -> Self {
        Self {
            side: body.side,
            asset: body.asset,
            currency: body.currency,
            amount: body.amount,
        }
    }
}

/// 确认交易请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FinalizeTradeBody {
    /// 创建交易时返回的报价 ID
    #[serde(rename = "quoteId")]
    #[schema(example = "Q-100")]
    pub quote_id: Option<String>,
}

impl From<FinalizeTradeBody> for FinalizeTradeRequest {
    fn from(body: FinalizeTradeBody) -> Self {
        Self {
            quote_id: body.quote_id,
        }
    }
}

// ============================================================
//  流水查询 DTO
// ============================================================

/// 流水查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionsParams {
    /// 页码，默认 1
    pub page: Option<u32>,
    /// 每页条数，默认 10
    pub limit: Option<u32>,
    /// 按状态过滤
    pub status: Option<String>,
    /// 按类型过滤
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl From<TransactionsParams> for TransactionQuery {
    fn from(params: TransactionsParams) -> Self {
        let defaults = TransactionQuery::default();
        Self {
            page: params.page.unwrap_or(defaults.page),
            limit: params.limit.unwrap_or(defaults.limit),
            ..defaults
        }
        .with_filters(params.status, params.kind)
    }
}

/// 流水过滤条件回显
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionFilters {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// 一页流水
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionsResponse {
    /// 服务商响应原样透传
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    pub filters: TransactionFilters,
}

impl From<TransactionPage> for TransactionsResponse {
    fn from(page: TransactionPage) -> Self {
        Self {
            data: page.data,
            page: page.query.page,
            limit: page.query.limit,
            filters: TransactionFilters {
                status: page.query.status,
                kind: page.query.kind,
            },
        }
    }
}

// ============================================================
//  虚拟卡 DTO
// ============================================================

/// 虚拟卡写操作请求体；`action` 以外的字段原样转发给服务商
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CardActionBody {
    /// register / create / topup / withdraw / freeze / unfreeze / terminate / mock-transaction
    #[schema(example = "topup")]
    pub action: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl From<CardActionBody> for CardCommandRequest {
    fn from(body: CardActionBody) -> Self {
        Self {
            action: body.action,
            payload: body.payload,
        }
    }
}

/// 虚拟卡更新请求体
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CardUpdateBody {
    /// update-user / enable-airlines
    #[schema(example = "update-user")]
    pub action: Option<String>,
    /// `update-user` 必填的用户 ID
    #[schema(example = "U-42")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl From<CardUpdateBody> for CardUpdateRequest {
    fn from(body: CardUpdateBody) -> Self {
        Self {
            action: body.action,
            id: body.id,
            payload: body.payload,
        }
    }
}

/// 虚拟卡查询参数
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CardLookupParams {
    /// cards / users / user / card / transactions
    pub action: Option<String>,
    /// 用户或卡片 ID
    pub id: Option<String>,
}

impl From<CardLookupParams> for CardLookupRequest {
    fn from(params: CardLookupParams) -> Self {
        Self {
            action: params.action,
            id: params.id,
        }
    }
}
