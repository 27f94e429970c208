mod logging;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use kobo_api::server::{AppState, start_server};
use kobo_core::common::reference::UuidReferenceGenerator;
use kobo_flow::{CardService, PayoutService, SwapService, TradeService, TransactionService};
use kobo_provider::http::HttpProvider;
use tracing::{error, info, warn};

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 API 状态中。
///
/// # Logic
/// 1. 读取 `.env` 并加载配置。
/// 2. 初始化全局日志。
/// 3. 实例化基础设施层（HTTP 服务商适配器、引用号生成器）。
/// 4. 构造编排服务层（Payout、Trade、Swap、Transactions）。
/// 5. 启动 HTTP 服务，收到 Ctrl-C 后优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let dotenv = dotenvy::dotenv();
    let config = Arc::new(settings::load()?);

    // 2. 初始化日志
    let _log_guard = logging::init(&config.logging)?;
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to read .env file: {}", e),
    }
    info!("Kobo relay starting...");

    // 凭证缺失不阻止启动，每个请求会单独报告配置错误
    if config.provider.secret_key().is_none() {
        warn!("Provider secret key is not set; every flow will fail with a configuration error");
    }
    if config.provider.payout_api_url().is_none() {
        warn!("Payout API URL is not set; payouts will fail with a configuration error");
    }

    // 3. 实例化基础设施层
    let timeout = config.provider.request_timeout_secs.map(Duration::from_secs);
    let provider = Arc::new(HttpProvider::new(timeout)?);
    let references = Arc::new(UuidReferenceGenerator);

    // 4. 构造编排服务层（注入 Core Trait 抽象）
    let state = AppState {
        payouts: Arc::new(PayoutService::new(
            provider.clone(),
            config.clone(),
            references.clone(),
        )),
        trading: Arc::new(TradeService::new(
            provider.clone(),
            config.clone(),
            references.clone(),
        )),
        swaps: Arc::new(SwapService::new(
            provider.clone(),
            config.clone(),
            references,
        )),
        transactions: Arc::new(TransactionService::new(provider.clone(), config.clone())),
        cards: Arc::new(CardService::new(provider, config.clone())),
    };

    // 5. 启动 HTTP 服务
    start_server(state, &config.server.bind_addr(), shutdown_signal()).await?;
    info!("Kobo relay stopped");

    Ok(())
}

/// 等待外部退出信号
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时保持运行，由进程管理器终止
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}
