use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::FlowReply;

/// 以固定金额执行一次 swap
///
/// 请求体被忽略。响应不携带任何标识，内部引用号只写入日志。
#[utoipa::path(
    post,
    path = "/api/v1/swap",
    tag = "兑换 (Swap)",
    responses(
        (status = 200, description = "Swap 已完成", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn swap(State(state): State<AppState>) -> Result<Json<FlowReply>, ApiError> {
    state.swaps.swap().await?;

    Ok(Json(FlowReply::message("Swap completed successfully")))
}
