//! # `kobo-core` - 领域核心
//!
//! 定义支付中继的全部端口 (trait)、实体与错误类型。
//! 本 crate 不依赖任何具体的 HTTP 客户端或 Web 框架，
//! 上层实现 (`kobo-provider`、`kobo-flow`、`kobo-api`) 只通过这里的抽象互相协作。

pub mod card;
pub mod common;
pub mod config;
pub mod flow;
pub mod provider;
