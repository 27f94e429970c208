//! # API 统一错误处理
//!
//! 将编排层的 `FlowFailure` 映射到 HTTP 状态码与 `FlowReply` 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kobo_core::flow::error::FlowFailure;
use thiserror::Error;

use crate::types::FlowReply;

/// API 层统一错误枚举
///
/// # Invariants
/// - 响应体始终是 `FlowReply`：`message` 必有，`reference` / `quoteId` 仅在已知时出现。
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)，此时未发出任何外部调用
    #[error("{}", .0.message)]
    BadRequest(FlowReply),

    /// 配置、上游或解析错误 (500)
    #[error("{}", .0.message)]
    Internal(FlowReply),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(FlowReply::message(message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(reply) => (StatusCode::BAD_REQUEST, reply),
            ApiError::Internal(reply) => {
                tracing::error!(
                    reference = reply.reference.as_deref(),
                    quote_id = reply.quote_id.as_deref(),
                    "Request failed: {}",
                    reply.message
                );
                (StatusCode::INTERNAL_SERVER_ERROR, reply)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// 从 `FlowFailure` 转换：校验失败为 400，其余一律 500。
impl From<FlowFailure> for ApiError {
    fn from(failure: FlowFailure) -> Self {
        let mut reply = FlowReply::message(failure.error.to_string());
        if let Some(reference) = failure.reference {
            reply = reply.with_reference(reference);
        }
        if let Some(quote_id) = failure.quote_id {
            reply = reply.with_quote_id(quote_id);
        }

        if failure.error.is_validation() {
            ApiError::BadRequest(reply)
        } else {
            ApiError::Internal(reply)
        }
    }
}
