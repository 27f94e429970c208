//! # `kobo-provider` - 支付服务商 HTTP 适配器
//!
//! 基于 `reqwest` 实现 `kobo_core::provider::port::ProviderPort`。

pub mod http;
