use std::sync::Arc;

use async_trait::async_trait;
use kobo_core::common::reference::{Reference, ReferenceGenerator};
use kobo_core::config::AppConfig;
use kobo_core::flow::entity::{PayoutBeneficiary, PayoutRequest, PayoutStarted, PayoutState};
use kobo_core::flow::error::{FlowError, FlowFailure, Step};
use kobo_core::flow::port::PayoutPort;
use kobo_core::provider::port::ProviderPort;

use crate::step::{self, Endpoint};
use crate::wire::{Beneficiary, FinalizeRequest, InitializePayoutRequest, QuoteRequest};

/// # Summary
/// 法币 payout 编排服务：把固定结算金额的 USDT 兑换为尼日利亚银行入账。
///
/// # Invariants
/// - 报价金额、客户 ID、银行名称等均来自 `AppConfig::payout` 策略常量，调用方只提供收款人。
/// - 不做任何补偿：initialize 成功而 finalize 失败时，上游已初始化的 payout 保持原样，
///   仅通过引用号向调用方汇报。
pub struct PayoutService {
    provider: Arc<dyn ProviderPort>,
    config: Arc<AppConfig>,
    references: Arc<dyn ReferenceGenerator>,
}

impl PayoutService {
    pub fn new(
        provider: Arc<dyn ProviderPort>,
        config: Arc<AppConfig>,
        references: Arc<dyn ReferenceGenerator>,
    ) -> Self {
        Self {
            provider,
            config,
            references,
        }
    }

    /// # Summary
    /// 在引用号已生成的前提下依次执行 quote → initialize → finalize。
    ///
    /// # Logic
    /// 1. 检查 payout 基础地址与 secret key。
    /// 2. 以策略常量请求报价，提取 `data.quoteId`。
    /// 3. 携带报价 ID、引用号与收款人信息初始化 payout。
    /// 4. 仅携带报价 ID 确认 payout。
    ///
    /// # Returns
    /// * 任一步失败立即返回带步骤前缀的 `FlowError`。
    async fn run(
        &self,
        reference: &Reference,
        beneficiary: &PayoutBeneficiary,
    ) -> Result<(), FlowError> {
        let endpoint = Endpoint::payout(&self.config.provider)?;
        let policy = &self.config.payout;
        let provider = self.provider.as_ref();

        // 1. 报价
        let quote_request = QuoteRequest {
            source: &policy.source,
            from_asset: &policy.from_asset,
            to_currency: &policy.to_currency,
            settlement_amount: policy.settlement_amount,
        };
        let raw = step::call(provider, Step::Quote, &endpoint, "payouts/quotes", &quote_request)
            .await?;
        let quote_id = step::quote_id(Step::Quote, &raw)?;
        tracing::info!("[STEP 1] Quote generated for {}: {}", reference, step::body_text(&raw));

        // 2. 初始化
        let initialize_request = InitializePayoutRequest {
            quote_id: quote_id.as_str(),
            customer_id: &policy.customer_id,
            country: &policy.country,
            reference: reference.as_str(),
            payment_reason: &policy.payment_reason,
            beneficiary: Beneficiary {
                kind: &policy.beneficiary_type,
                account_name: &beneficiary.account_name,
                bank_name: &policy.bank_name,
                account_number: &beneficiary.account_number,
            },
        };
        let raw = step::call(
            provider,
            Step::Initialize,
            &endpoint,
            "payouts/initialize",
            &initialize_request,
        )
        .await?;
        tracing::info!("[STEP 2] Quote initialized for {}: {}", reference, step::body_text(&raw));

        // 3. 确认
        let finalize_request = FinalizeRequest {
            quote_id: quote_id.as_str(),
        };
        let raw = step::call(
            provider,
            Step::Finalize,
            &endpoint,
            "payouts/finalize",
            &finalize_request,
        )
        .await?;
        tracing::info!("[STEP 3] Quote finalized for {}: {}", reference, step::body_text(&raw));

        Ok(())
    }
}

#[async_trait]
impl PayoutPort for PayoutService {
    /// # Logic
    /// 1. 校验收款人姓名与账号，失败时不生成引用号、不发出调用。
    /// 2. 校验通过后立即生成引用号。
    /// 3. 执行调用链；无论成功失败都返回该引用号。
    async fn start_payout(&self, request: PayoutRequest) -> Result<PayoutStarted, FlowFailure> {
        let beneficiary = request.validate().map_err(|e| {
            tracing::warn!("Payout request rejected: {}", e);
            FlowFailure::new(e)
        })?;

        let reference = self.references.next_reference();

        match self.run(&reference, &beneficiary).await {
            Ok(()) => {
                tracing::info!("Payout {} reached {:?}", reference, PayoutState::Succeeded);
                Ok(PayoutStarted { reference })
            }
            Err(error) => {
                tracing::error!(
                    "Payout {} ended in {:?}: {}",
                    reference,
                    PayoutState::from(&error),
                    error
                );
                Err(FlowFailure::new(error).with_reference(reference))
            }
        }
    }
}
