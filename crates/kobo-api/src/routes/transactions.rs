//! # 流水查询路由控制器

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::server::AppState;
use crate::types::{FlowReply, TransactionsParams, TransactionsResponse};

/// 分页查询服务商账户流水
///
/// 服务商返回的 JSON 原样放入 `data`，并回显分页与过滤参数。
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "流水 (Transactions)",
    params(TransactionsParams),
    responses(
        (status = 200, description = "查询成功", body = TransactionsResponse),
        (status = 400, description = "查询参数非法", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TransactionsParams>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let page = state.transactions.list_transactions(params.into()).await?;

    Ok(Json(page.into()))
}
