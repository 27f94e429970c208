use std::sync::Arc;

use async_trait::async_trait;
use kobo_core::card::entity::{
    CardCommand, CardCommandRequest, CardLookup, CardLookupRequest, CardPayload, CardUpdate,
    CardUpdateRequest,
};
use kobo_core::card::port::CardsPort;
use kobo_core::config::AppConfig;
use kobo_core::flow::error::{FlowError, FlowFailure, Step};
use kobo_core::provider::port::ProviderPort;
use serde_json::Value;

use crate::step::{self, Endpoint};

/// 一次虚拟卡调用：方法、相对路径与可选请求体
enum CardCall {
    Post(&'static str, Value),
    Put(String, Value),
    Get(String),
}

impl CardCall {
    fn path(&self) -> &str {
        match self {
            CardCall::Post(path, _) => *path,
            CardCall::Put(path, _) | CardCall::Get(path) => path.as_str(),
        }
    }
}

/// # Summary
/// 虚拟卡中继服务，走独立的 `cards_api_url`。
///
/// # Logic
/// 每个动作恰好对应一次服务商调用：写操作为 POST，资料更新为 PUT，查询为 GET。
/// 客户端附带的其余字段原样作为请求体转发，服务商响应原样返回。
pub struct CardService {
    provider: Arc<dyn ProviderPort>,
    config: Arc<AppConfig>,
}

impl CardService {
    pub fn new(provider: Arc<dyn ProviderPort>, config: Arc<AppConfig>) -> Self {
        Self { provider, config }
    }

    async fn send(&self, action: &str, call: CardCall) -> Result<Value, FlowError> {
        let endpoint = Endpoint::cards(&self.config.provider)?;
        let url = endpoint.url(call.path());
        tracing::info!("Virtual card {} -> {}", action, call.path());

        let result = match &call {
            CardCall::Post(_, body) => self.provider.post_json(&url, endpoint.bearer, body).await,
            CardCall::Put(_, body) => self.provider.put_json(&url, endpoint.bearer, body).await,
            CardCall::Get(_) => self.provider.get_json(&url, endpoint.bearer, &[]).await,
        };
        let raw = result.map_err(|source| FlowError::Provider {
            step: Step::VirtualCard,
            source,
        })?;
        tracing::info!("Virtual card {} succeeded: {}", action, step::body_text(&raw));

        serde_json::from_slice(&raw).map_err(|e| FlowError::Parse {
            step: Step::VirtualCard,
            reason: e.to_string(),
        })
    }

    async fn relay(
        &self,
        action: &str,
        call: Result<CardCall, FlowError>,
    ) -> Result<Value, FlowFailure> {
        let result = match call {
            Ok(call) => self.send(action, call).await,
            Err(error) => Err(error),
        };
        result.map_err(|error| {
            tracing::error!("Virtual card {} failed: {}", action, error);
            FlowFailure::new(error)
        })
    }
}

fn command_call(command: CardCommand, payload: CardPayload) -> CardCall {
    let path = match command {
        CardCommand::RegisterUser => "registercarduser",
        other => other.action(),
    };
    CardCall::Post(path, Value::Object(payload))
}

fn update_call(update: &CardUpdate, payload: CardPayload) -> CardCall {
    let path = match update {
        CardUpdate::User(id) => format!("users/{}", id),
        CardUpdate::EnableAirlines => "enable-airlines".to_string(),
    };
    CardCall::Put(path, Value::Object(payload))
}

fn lookup_call(lookup: &CardLookup) -> CardCall {
    let path = match lookup {
        CardLookup::Cards => "cards".to_string(),
        CardLookup::Users => "users".to_string(),
        CardLookup::User(id) => format!("users/{}", id),
        CardLookup::Card(id) => format!("cards/{}", id),
        CardLookup::Transactions(Some(id)) => format!("cards/{}/transactions", id),
        CardLookup::Transactions(None) => "cards/transactions".to_string(),
    };
    CardCall::Get(path)
}

#[async_trait]
impl CardsPort for CardService {
    async fn execute(&self, request: CardCommandRequest) -> Result<Value, FlowFailure> {
        let action = request.action.clone().unwrap_or_default();
        let call = request
            .validate()
            .map(|(command, payload)| command_call(command, payload));
        self.relay(&action, call).await
    }

    async fn update(&self, request: CardUpdateRequest) -> Result<Value, FlowFailure> {
        let action = request.action.clone().unwrap_or_default();
        let call = request
            .validate()
            .map(|(update, payload)| update_call(&update, payload));
        self.relay(&action, call).await
    }

    async fn lookup(&self, request: CardLookupRequest) -> Result<Value, FlowFailure> {
        let action = request.action.clone().unwrap_or_default();
        let call = request.validate().map(|lookup| lookup_call(&lookup));
        self.relay(&action, call).await
    }
}
