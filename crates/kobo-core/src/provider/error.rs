use thiserror::Error;

/// # Summary
/// 单次出站调用的统一错误。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - `Display` 文本会被原样嵌入返回给调用方的 `message` 字段。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// 请求体无法编码为 JSON
    #[error("failed to marshal request: {0}")]
    Serialization(String),

    /// 网络连接、超时或读取响应失败
    #[error("failed to make request: {0}")]
    Transport(String),

    /// 服务商返回 >= 400 状态码，`body` 为原始响应文本
    #[error("API error ({status}): {body}")]
    Upstream { status: u16, body: String },
}
