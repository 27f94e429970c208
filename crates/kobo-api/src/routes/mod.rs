pub mod cards;
pub mod payout;
pub mod swap;
pub mod trade;
pub mod transactions;
