use std::sync::Arc;

use async_trait::async_trait;
use kobo_core::config::AppConfig;
use kobo_core::flow::entity::{TransactionPage, TransactionQuery};
use kobo_core::flow::error::{FlowError, FlowFailure, Step};
use kobo_core::flow::port::TransactionsPort;
use kobo_core::provider::port::ProviderPort;

use crate::step::Endpoint;

/// # Summary
/// 服务商流水查询，走 trade 基础地址，响应 `data` 原样透传。
pub struct TransactionService {
    provider: Arc<dyn ProviderPort>,
    config: Arc<AppConfig>,
}

impl TransactionService {
    pub fn new(provider: Arc<dyn ProviderPort>, config: Arc<AppConfig>) -> Self {
        Self { provider, config }
    }

    async fn fetch(&self, query: &TransactionQuery) -> Result<serde_json::Value, FlowError> {
        let endpoint = Endpoint::trade(&self.config.provider)?;

        let raw = self
            .provider
            .get_json(&endpoint.url("transactions"), endpoint.bearer, &query.to_params())
            .await
            .map_err(|source| FlowError::Provider {
                step: Step::ListTransactions,
                source,
            })?;

        serde_json::from_slice(&raw).map_err(|e| FlowError::Parse {
            step: Step::ListTransactions,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl TransactionsPort for TransactionService {
    async fn list_transactions(
        &self,
        query: TransactionQuery,
    ) -> Result<TransactionPage, FlowFailure> {
        match self.fetch(&query).await {
            Ok(data) => Ok(TransactionPage { data, query }),
            Err(error) => {
                tracing::error!("Failed to fetch transactions: {}", error);
                Err(FlowFailure::new(error))
            }
        }
    }
}
