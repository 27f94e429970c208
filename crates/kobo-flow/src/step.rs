//! 各编排服务共用的单步调用工具。

use kobo_core::config::ProviderConfig;
use kobo_core::flow::entity::QuoteId;
use kobo_core::flow::error::{FlowError, Step};
use kobo_core::provider::port::{self, ProviderPort};
use serde::Serialize;

/// # Summary
/// 一次调用所需的基础地址与 Bearer Token。
///
/// # Invariants
/// - 只有在两者都存在时才能构造，保证缺失配置时不会发出任何外部调用。
pub(crate) struct Endpoint<'a> {
    base: &'a str,
    pub bearer: &'a str,
}

impl<'a> Endpoint<'a> {
    /// payout 使用可配置的 `payout_api_url`
    pub fn payout(config: &'a ProviderConfig) -> Result<Self, FlowError> {
        let bearer = require_secret(config)?;
        let base = config
            .payout_api_url()
            .ok_or_else(|| FlowError::Configuration("payout API URL is not set".to_string()))?;
        Ok(Self { base, bearer })
    }

    /// trade / swap / 流水查询使用独立的 `trade_api_url`
    pub fn trade(config: &'a ProviderConfig) -> Result<Self, FlowError> {
        let bearer = require_secret(config)?;
        let base = config
            .trade_api_url()
            .ok_or_else(|| FlowError::Configuration("trade API URL is not set".to_string()))?;
        Ok(Self { base, bearer })
    }

    /// 虚拟卡使用独立的 `cards_api_url`
    pub fn cards(config: &'a ProviderConfig) -> Result<Self, FlowError> {
        let bearer = require_secret(config)?;
        let base = config
            .cards_api_url()
            .ok_or_else(|| FlowError::Configuration("cards API URL is not set".to_string()))?;
        Ok(Self { base, bearer })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

fn require_secret(config: &ProviderConfig) -> Result<&str, FlowError> {
    config
        .secret_key()
        .ok_or_else(|| FlowError::Configuration("provider secret key is not set".to_string()))
}

/// 执行一步 POST 调用，失败时附加步骤前缀
pub(crate) async fn call<T>(
    provider: &dyn ProviderPort,
    step: Step,
    endpoint: &Endpoint<'_>,
    path: &str,
    body: &T,
) -> Result<Vec<u8>, FlowError>
where
    T: Serialize + Sync,
{
    port::post(provider, &endpoint.url(path), endpoint.bearer, body)
        .await
        .map_err(|source| FlowError::Provider { step, source })
}

/// 从该步骤的响应信封中提取报价 ID
pub(crate) fn quote_id(step: Step, raw: &[u8]) -> Result<QuoteId, FlowError> {
    QuoteId::from_envelope(raw).map_err(|reason| FlowError::Parse { step, reason })
}

/// 日志中原样输出服务商响应体
pub(crate) fn body_text(raw: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(raw)
}
