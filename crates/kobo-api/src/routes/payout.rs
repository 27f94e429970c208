//! # Payout 路由控制器
//!
//! 实现 `POST /api/v1/payouts`：一次请求内完成 quote → initialize → finalize。

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::server::AppState;
use crate::types::{FlowReply, PayoutBody};

/// 发起一笔 USDT → NGN 银行 payout
///
/// 成功仅代表服务商已接受 finalize，最终结算以服务商 webhook 为准。
/// 一旦通过校验，无论成功失败响应中都会带上本次 payout 的引用号。
#[utoipa::path(
    post,
    path = "/api/v1/payouts",
    tag = "Payout",
    request_body = PayoutBody,
    responses(
        (status = 200, description = "Payout 已提交", body = FlowReply),
        (status = 400, description = "缺少收款人姓名或账号", body = FlowReply),
        (status = 500, description = "配置缺失或服务商调用失败", body = FlowReply)
    )
)]
pub async fn start_payout(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PayoutBody>,
) -> Result<Json<FlowReply>, ApiError> {
    let started = state.payouts.start_payout(body.into()).await?;

    Ok(Json(
        FlowReply::message(
            "Payout process started. Check the webhook site for final confirmation.",
        )
        .with_reference(started.reference),
    ))
}
