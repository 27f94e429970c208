//! # `kobo-flow` - 编排服务
//!
//! 把一次客户端请求翻译为对服务商的固定调用序列，并在首个失败处终止、汇报。
//! 各服务分别实现 `kobo_core::flow::port` 中的端口，只依赖 `ProviderPort` 抽象。

pub mod cards;
pub mod payout;
pub mod swap;
pub mod trade;
pub mod transactions;

mod step;
mod wire;

pub use cards::CardService;
pub use payout::PayoutService;
pub use swap::SwapService;
pub use trade::TradeService;
pub use transactions::TransactionService;
