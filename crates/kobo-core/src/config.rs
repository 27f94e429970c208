use std::fmt;

use serde::{Deserialize, Serialize};

/// 交易/兑换/流水查询使用的服务商基础地址 (与 payout 的可配置地址相互独立)
pub const DEFAULT_TRADE_API_URL: &str = "https://api.bitnob.co/api/v1";

/// 虚拟卡接口的基础地址 (服务商仅在 sandbox 环境开放)
pub const DEFAULT_CARDS_API_URL: &str = "https://sandboxapi.bitnob.co/api/v1/virtual-cards";

/// 全局应用配置
///
/// # Invariants
/// - 进程启动时加载一次，之后以 `Arc<AppConfig>` 只读共享，不在业务逻辑中再读取环境变量。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub payout: PayoutPolicy,
    pub swap: SwapPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 监听地址，如 `"0.0.0.0:8080"`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// # Summary
/// 外部支付服务商的连接配置。
///
/// # Invariants
/// - `payout_api_url` 与 `trade_api_url` 是两个独立的值：payout 走可配置地址，
///   trade/swap 默认指向固定的生产地址。
/// - `cards_api_url` 默认指向服务商沙箱的虚拟卡接口。
/// - 缺失的凭证不会阻止启动，而是在每个请求调用时以配置错误的形式暴露。
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// payout 流程的基础地址 (无默认值)
    pub payout_api_url: Option<String>,
    /// trade / swap / 流水查询的基础地址
    pub trade_api_url: String,
    /// 虚拟卡接口的基础地址
    pub cards_api_url: String,
    /// Bearer Token
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    /// 出站请求超时 (秒)。`None` 表示沿用 HTTP 客户端默认行为
    pub request_timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            payout_api_url: None,
            trade_api_url: DEFAULT_TRADE_API_URL.to_string(),
            cards_api_url: DEFAULT_CARDS_API_URL.to_string(),
            secret_key: None,
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("payout_api_url", &self.payout_api_url)
            .field("trade_api_url", &self.trade_api_url)
            .field("cards_api_url", &self.cards_api_url)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// 去除首尾空白后非空的 secret key
    pub fn secret_key(&self) -> Option<&str> {
        non_blank(self.secret_key.as_deref())
    }

    /// 去除首尾空白后非空的 payout 基础地址 (末尾的 `/` 会被去掉)
    pub fn payout_api_url(&self) -> Option<&str> {
        non_blank(self.payout_api_url.as_deref()).map(|url| url.trim_end_matches('/'))
    }

    pub fn trade_api_url(&self) -> Option<&str> {
        non_blank(Some(self.trade_api_url.as_str())).map(|url| url.trim_end_matches('/'))
    }

    pub fn cards_api_url(&self) -> Option<&str> {
        non_blank(Some(self.cards_api_url.as_str())).map(|url| url.trim_end_matches('/'))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// # Summary
/// payout 报价与受益人信息中的策略常量，不接受调用方输入。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutPolicy {
    pub source: String,
    pub from_asset: String,
    pub to_currency: String,
    pub settlement_amount: u64,
    pub customer_id: String,
    pub country: String,
    pub payment_reason: String,
    pub beneficiary_type: String,
    pub bank_name: String,
}

impl Default for PayoutPolicy {
    fn default() -> Self {
        Self {
            source: "offchain".to_string(),
            from_asset: "usdt".to_string(),
            to_currency: "ngn".to_string(),
            settlement_amount: 100_000,
            customer_id: "e22795d9-23f6-48e6-8b30-be5718abd876".to_string(),
            country: "NG".to_string(),
            payment_reason: "Bitnob Nigeria Faucet".to_string(),
            beneficiary_type: "BANK".to_string(),
            bank_name: "OPAY".to_string(),
        }
    }
}

/// swap 的固定兑换金额
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapPolicy {
    pub amount: u64,
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self { amount: 200 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 默认日志级别，`RUST_LOG` 优先
    pub level: String,
    /// 若设置则额外按天滚动写入该目录
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
