use async_trait::async_trait;
use serde::Serialize;

use crate::provider::error::ProviderError;

/// # Summary
/// 外部支付服务商的 HTTP 传输端口。
/// 所有编排流程只通过此接口发出请求，目标地址与 Bearer Token 均作为参数传入。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`，并且无共享可变状态，可跨请求复用。
/// - 成功时返回未解析的原始响应体，解析由调用方负责。
#[async_trait]
pub trait ProviderPort: Send + Sync {
    /// # Summary
    /// 以 JSON 请求体发起一次 POST 调用。
    ///
    /// # Logic
    /// 1. 设置 `Authorization: Bearer <token>` 与 `Content-Type: application/json`。
    /// 2. 发送请求并读取完整响应体。
    /// 3. 状态码 >= 400 时返回 `ProviderError::Upstream`。
    ///
    /// # Arguments
    /// * `url` - 完整目标地址。
    /// * `bearer` - 服务商 secret key。
    /// * `body` - 已编码的 JSON 请求体。
    ///
    /// # Returns
    /// * 成功返回原始响应字节。
    /// * 失败返回 `Err(ProviderError)`。
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, ProviderError>;

    /// 以 JSON 请求体发起一次 PUT 调用，请求头与错误映射规则与 `post_json` 相同。
    async fn put_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, ProviderError>;

    /// # Summary
    /// 以查询参数发起一次 GET 调用，错误映射规则与 `post_json` 相同。
    async fn get_json(
        &self,
        url: &str,
        bearer: &str,
        query: &[(String, String)],
    ) -> Result<Vec<u8>, ProviderError>;
}

/// # Summary
/// 将任意可序列化的请求结构编码后通过端口发送。
///
/// # Returns
/// * 编码失败返回 `ProviderError::Serialization`，此时不会发出任何网络请求。
pub async fn post<T>(
    port: &dyn ProviderPort,
    url: &str,
    bearer: &str,
    body: &T,
) -> Result<Vec<u8>, ProviderError>
where
    T: Serialize + Sync + ?Sized,
{
    let value =
        serde_json::to_value(body).map_err(|e| ProviderError::Serialization(e.to_string()))?;
    port.post_json(url, bearer, &value).await
}
