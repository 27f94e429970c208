#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kobo_core::config::{AppConfig, ProviderConfig};
use kobo_core::provider::error::ProviderError;
use kobo_core::provider::port::ProviderPort;
use serde_json::{Value, json};

pub const PAYOUT_BASE: &str = "https://payout.provider.test/api/v1";
pub const TRADE_BASE: &str = "https://trade.provider.test/api/v1";
pub const CARDS_BASE: &str = "https://sandbox.provider.test/api/v1/virtual-cards";
pub const SECRET: &str = "sk_test_kobo";

/// 一次被记录的出站调用
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub bearer: String,
    pub body: Value,
    pub query: Vec<(String, String)>,
}

/// 按 URL 后缀预置响应的服务商桩，记录所有调用
#[derive(Default)]
pub struct StubProvider {
    script: Mutex<Vec<(String, Result<Vec<u8>, ProviderError>)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, body: Value) -> Self {
        self.respond_raw(path, body.to_string().into_bytes())
    }

    pub fn respond_raw(self, path: &str, body: Vec<u8>) -> Self {
        self.script.lock().unwrap().push((path.to_string(), Ok(body)));
        self
    }

    pub fn fail(self, path: &str, error: ProviderError) -> Self {
        self.script.lock().unwrap().push((path.to_string(), Err(error)));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_to(&self, path: &str) -> Option<RecordedCall> {
        self.calls()
            .into_iter()
            .find(|c| c.url.ends_with(&format!("/{}", path)))
    }

    fn answer(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.script
            .lock()
            .unwrap()
            .iter()
            .find(|(path, _)| url.ends_with(&format!("/{}", path)))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| {
                Err(ProviderError::Upstream {
                    status: 404,
                    body: format!("no stub for {}", url),
                })
            })
    }
}

#[async_trait]
impl ProviderPort for StubProvider {
    async fn post_json(
        &self,
        url: &str,
        bearer: &str,
        body: &Value,
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "POST",
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: body.clone(),
            query: vec![],
        });
        self.answer(url)
    }

    async fn put_json(
        &self,
        url: &str,
        bearer: &str,
        body: &Value,
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "PUT",
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: body.clone(),
            query: vec![],
        });
        self.answer(url)
    }

    async fn get_json(
        &self,
        url: &str,
        bearer: &str,
        query: &[(String, String)],
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "GET",
            url: url.to_string(),
            bearer: bearer.to_string(),
            body: Value::Null,
            query: query.to_vec(),
        });
        self.answer(url)
    }
}

pub fn quote_envelope(quote_id: &str) -> Value {
    json!({ "status": true, "data": { "quoteId": quote_id, "rate": "1580.25" } })
}

pub fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        provider: ProviderConfig {
            payout_api_url: Some(PAYOUT_BASE.to_string()),
            trade_api_url: TRADE_BASE.to_string(),
            cards_api_url: CARDS_BASE.to_string(),
            secret_key: Some(SECRET.to_string()),
            request_timeout_secs: None,
        },
        ..AppConfig::default()
    })
}

pub fn config_without_secret() -> Arc<AppConfig> {
    let mut config = (*test_config()).clone();
    config.provider.secret_key = None;
    Arc::new(config)
}
