//! 发往服务商的请求体结构。字段名与服务商 API 的 camelCase 约定保持一致。

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteRequest<'a> {
    pub source: &'a str,
    pub from_asset: &'a str,
    pub to_currency: &'a str,
    pub settlement_amount: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitializePayoutRequest<'a> {
    pub quote_id: &'a str,
    pub customer_id: &'a str,
    pub country: &'a str,
    pub reference: &'a str,
    pub payment_reason: &'a str,
    pub beneficiary: Beneficiary<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Beneficiary<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub account_name: &'a str,
    pub bank_name: &'a str,
    pub account_number: &'a str,
}

/// payout 确认与交易确认共用：只携带报价 ID
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinalizeRequest<'a> {
    pub quote_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTradeRequest<'a> {
    pub side: &'a str,
    pub asset: &'a str,
    pub currency: &'a str,
    pub amount: Decimal,
    pub reference: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct InitializeSwapRequest {
    pub amount: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinalizeSwapRequest<'a> {
    pub quote_id: &'a str,
    pub reference: &'a str,
}
