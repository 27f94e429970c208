//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/kobo-app` 的 DI 容器持有并调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kobo_core::card::port::CardsPort;
use kobo_core::flow::port::{PayoutPort, SwapPort, TradingPort, TransactionsPort};

use crate::routes::{cards, payout, swap, trade, transactions};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有编排端口在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 各端口实现自身无请求间可变状态，可被任意并发请求共享。
#[derive(Clone)]
pub struct AppState {
    /// Payout 编排端口
    pub payouts: Arc<dyn PayoutPort>,
    /// 交易编排端口
    pub trading: Arc<dyn TradingPort>,
    /// Swap 编排端口
    pub swaps: Arc<dyn SwapPort>,
    /// 流水查询端口
    pub transactions: Arc<dyn TransactionsPort>,
    /// 虚拟卡中继端口
    pub cards: Arc<dyn CardsPort>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kobo 支付中继 API",
        version = "0.1.0",
        description = "在 Bitnob 风格服务商 REST API 之上编排 payout、交易与 swap 的多步调用，并中继虚拟卡操作。",
        contact(name = "Kobo Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "Payout", description = "USDT → NGN 银行 payout，quote / initialize / finalize 三步"),
        (name = "交易 (Trade)", description = "交易创建与确认"),
        (name = "兑换 (Swap)", description = "固定金额的 BTC swap"),
        (name = "流水 (Transactions)", description = "服务商账户流水分页查询"),
        (name = "虚拟卡 (Virtual Cards)", description = "虚拟卡用户、卡片与流水的单步中继")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// 单独暴露以便集成测试在任意端口上挂载同一棵路由树。
pub fn build_router(state: AppState) -> Router {
    // 1. 注册所有业务路由并自动收集 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(payout::start_payout))
        .routes(routes!(trade::create_trade))
        .routes(routes!(trade::finalize_trade))
        .routes(routes!(swap::swap))
        .routes(routes!(transactions::list_transactions))
        .routes(routes!(
            cards::run_card_action,
            cards::update_card,
            cards::lookup_cards
        ))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 构建路由树并启动 HTTP 监听，直到 `shutdown` 完成。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
/// * `shutdown` - 完成时触发优雅停机，进行中的请求会被处理完
///
/// # Returns
/// * TCP 绑定或服务运行失败时返回错误。
pub async fn start_server<F>(
    state: AppState,
    bind_addr: &str,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Kobo API Server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
