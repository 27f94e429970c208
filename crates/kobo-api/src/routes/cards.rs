//! # 虚拟卡路由控制器
//!
//! 同一路径按 HTTP 方法区分写操作、资料更新与查询，成功时原样返回服务商响应。

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::server::AppState;
use crate::types::{CardActionBody, CardLookupParams, CardUpdateBody, FlowReply};

/// 执行虚拟卡写操作 (注册用户、开卡、充值、提现、冻结、解冻、注销、模拟交易)
#[utoipa::path(
    post,
    path = "/api/v1/virtual-cards",
    tag = "虚拟卡 (Virtual Cards)",
    request_body = CardActionBody,
    responses(
        (status = 200, description = "服务商响应原样返回", body = Object),
        (status = 400, description = "缺少或未知的 action", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn run_card_action(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CardActionBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state.cards.execute(body.into()).await?;
    Ok(Json(data))
}

/// 更新持卡用户资料或开通航空类消费
#[utoipa::path(
    put,
    path = "/api/v1/virtual-cards",
    tag = "虚拟卡 (Virtual Cards)",
    request_body = CardUpdateBody,
    responses(
        (status = 200, description = "服务商响应原样返回", body = Object),
        (status = 400, description = "缺少 action 或用户 ID", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn update_card(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CardUpdateBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state.cards.update(body.into()).await?;
    Ok(Json(data))
}

/// 查询卡片、持卡用户与卡片流水
#[utoipa::path(
    get,
    path = "/api/v1/virtual-cards",
    tag = "虚拟卡 (Virtual Cards)",
    params(CardLookupParams),
    responses(
        (status = 200, description = "服务商响应原样返回", body = Object),
        (status = 400, description = "缺少 action 或 ID", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn lookup_cards(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CardLookupParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state.cards.lookup(params.into()).await?;
    Ok(Json(data))
}
