//! # `kobo-api` - HTTP API 网关
//!
//! 本 crate 是 Kobo 支付中继的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收客户端的 payout / trade / swap / 流水查询请求
//! - 将请求体反序列化为 DTO 后交给 `kobo-core` 中定义的编排端口
//! - 将编排结果与 `FlowFailure` 映射为统一的 `{message, reference?, quoteId?}` 响应

pub mod error;
pub mod extract;
pub mod routes;
pub mod server;
pub mod types;
