//! # 交易路由控制器
//!
//! 创建与确认分为两个接口，调用方需在两次请求之间自行保存 `quoteId`。

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::server::AppState;
use crate::types::{FinalizeTradeBody, FlowReply, TradeBody};

/// 创建交易并返回报价 ID
#[utoipa::path(
    post,
    path = "/api/v1/trade",
    tag = "交易 (Trade)",
    request_body = TradeBody,
    responses(
        (status = 200, description = "交易已创建", body = FlowReply),
        (status = 400, description = "参数缺失或金额非法", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn create_trade(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TradeBody>,
) -> Result<Json<FlowReply>, ApiError> {
    let created = state.trading.create_trade(body.into()).await?;

    Ok(Json(
        FlowReply::message("Trade created successfully. Use the quoteId to finalize the trade.")
            .with_quote_id(created.quote_id)
            .with_reference(created.reference),
    ))
}

/// 使用报价 ID 确认交易
#[utoipa::path(
    post,
    path = "/api/v1/trade/finalize",
    tag = "交易 (Trade)",
    request_body = FinalizeTradeBody,
    responses(
        (status = 200, description = "交易已确认", body = FlowReply),
        (status = 400, description = "缺少 quoteId", body = FlowReply),
        (status = 500, description = "服务商调用失败，回显 quoteId", body = FlowReply)
    )
)]
pub async fn finalize_trade(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FinalizeTradeBody>,
) -> Result<Json<FlowReply>, ApiError> {
    let finalized = state.trading.finalize_trade(body.into()).await?;

    Ok(Json(
        FlowReply::message("Trade finalized successfully.").with_quote_id(finalized.quote_id),
    ))
}
