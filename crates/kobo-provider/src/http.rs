use std::time::Duration;

use async_trait::async_trait;
use kobo_core::provider::error::ProviderError;
use kobo_core::provider::port::ProviderPort;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};

/// # Summary
/// 基于 `reqwest` 的服务商调用实现。
///
/// # Invariants
/// - 内部 `Client` 自带连接池，克隆成本低，可被所有请求并发复用。
/// - 不持有任何可变状态；目标地址与 Token 均由调用方逐次传入。
#[derive(Clone)]
pub struct HttpProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
}

impl HttpProvider {
    /// # Summary
    /// 创建一个新的 HttpProvider 实例。
    ///
    /// # Logic
    /// 1. 确保进程级 rustls 加密后端 (ring) 已安装。
    /// 2. 仅在提供 `timeout` 时设置请求超时，否则沿用客户端默认行为。
    /// 3. 构建 reqwest 客户端。
    ///
    /// # Arguments
    /// * `timeout` - 可选的单次请求超时。
    ///
    /// # Returns
    /// 返回初始化后的 HttpProvider，客户端构建失败时返回 `ProviderError::Transport`。
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProviderError> {
        install_crypto_provider();

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// # Summary
    /// 发送已构建好的请求并按统一规则映射结果。
    ///
    /// # Logic
    /// 1. 附加 Bearer Token 并发送。
    /// 2. 完整读取响应体 (读取失败视为传输错误)。
    /// 3. 状态码 >= 400 时将原始响应文本包装为 `Upstream`。
    async fn execute(
        &self,
        url: &str,
        bearer: &str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ProviderError> {
        let response = request
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(format!("failed to read response: {}", e)))?;

        tracing::debug!("Provider {} responded with {}", url, status);

        if status.as_u16() >= 400 {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    /// 编码 JSON 请求体并设置 `Content-Type`
    fn json_body(
        request: RequestBuilder,
        body: &serde_json::Value,
    ) -> Result<RequestBuilder, ProviderError> {
        let payload =
            serde_json::to_vec(body).map_err(|e| ProviderError::Serialization(e.to_string()))?;
        Ok(request
            .header(CONTENT_TYPE, "application/json")
            .body(payload))
    }
}

/// 安装 ring 加密后端；已有其他组件安装过时保持原状
fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::trace!("rustls crypto provider already installed");
    }
}

#[async_trait]
impl ProviderPort for HttpProvider {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, ProviderError> {
        let request = Self::json_body(self.client.post(url), body)?;
        self.execute(url, bearer, request).await
    }

    async fn put_json(
        &self,
        url: &str,
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<u8>, ProviderError> {
        let request = Self::json_body(self.client.put(url), body)?;
        self.execute(url, bearer, request).await
    }

    async fn get_json(
        &self,
        url: &str,
        bearer: &str,
        query: &[(String, String)],
    ) -> Result<Vec<u8>, ProviderError> {
        let request = self.client.get(url).query(query);
        self.execute(url, bearer, request).await
    }
}
