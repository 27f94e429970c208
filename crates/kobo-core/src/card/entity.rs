use serde_json::{Map, Value};

use crate::flow::error::FlowError;

/// 随动作一起原样转发给服务商的字段
pub type CardPayload = Map<String, Value>;

/// # Summary
/// 虚拟卡写操作 (服务商侧为 POST)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCommand {
    RegisterUser,
    Create,
    Topup,
    Withdraw,
    Freeze,
    Unfreeze,
    Terminate,
    MockTransaction,
}

impl CardCommand {
    /// 客户端使用的动作名
    pub fn action(&self) -> &'static str {
        match self {
            CardCommand::RegisterUser => "register",
            CardCommand::Create => "create",
            CardCommand::Topup => "topup",
            CardCommand::Withdraw => "withdraw",
            CardCommand::Freeze => "freeze",
            CardCommand::Unfreeze => "unfreeze",
            CardCommand::Terminate => "terminate",
            CardCommand::MockTransaction => "mock-transaction",
        }
    }

    fn parse(action: &str) -> Option<Self> {
        [
            CardCommand::RegisterUser,
            CardCommand::Create,
            CardCommand::Topup,
            CardCommand::Withdraw,
            CardCommand::Freeze,
            CardCommand::Unfreeze,
            CardCommand::Terminate,
            CardCommand::MockTransaction,
        ]
        .into_iter()
        .find(|c| c.action() == action)
    }
}

/// 虚拟卡更新操作 (服务商侧为 PUT)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardUpdate {
    /// 更新持卡用户资料
    User(String),
    /// 开通航空类商户消费
    EnableAirlines,
}

impl CardUpdate {
    pub fn action(&self) -> &'static str {
        match self {
            CardUpdate::User(_) => "update-user",
            CardUpdate::EnableAirlines => "enable-airlines",
        }
    }
}

/// 虚拟卡查询 (服务商侧为 GET)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLookup {
    Cards,
    Users,
    User(String),
    Card(String),
    /// 指定卡片的流水；未指定时为全部卡片流水
    Transactions(Option<String>),
}

impl CardLookup {
    pub fn action(&self) -> &'static str {
        match self {
            CardLookup::Cards => "cards",
            CardLookup::Users => "users",
            CardLookup::User(_) => "user",
            CardLookup::Card(_) => "card",
            CardLookup::Transactions(_) => "transactions",
        }
    }
}

/// 写操作的原始请求
#[derive(Debug, Clone, Default)]
pub struct CardCommandRequest {
    pub action: Option<String>,
    pub payload: CardPayload,
}

impl CardCommandRequest {
    /// 要求 `action` 为已知的写操作；其余字段不做校验
    pub fn validate(self) -> Result<(CardCommand, CardPayload), FlowError> {
        let action = require_action(self.action)?;
        let command = CardCommand::parse(&action).ok_or_else(|| unknown_action(&action))?;
        Ok((command, self.payload))
    }
}

/// 更新操作的原始请求
#[derive(Debug, Clone, Default)]
pub struct CardUpdateRequest {
    pub action: Option<String>,
    pub id: Option<String>,
    pub payload: CardPayload,
}

impl CardUpdateRequest {
    /// `update-user` 额外要求合法的用户 ID
    pub fn validate(self) -> Result<(CardUpdate, CardPayload), FlowError> {
        let action = require_action(self.action)?;
        let update = match action.as_str() {
            "update-user" => CardUpdate::User(require_id("user", self.id)?),
            "enable-airlines" => CardUpdate::EnableAirlines,
            other => return Err(unknown_action(other)),
        };
        Ok((update, self.payload))
    }
}

/// 查询的原始请求
#[derive(Debug, Clone, Default)]
pub struct CardLookupRequest {
    pub action: Option<String>,
    pub id: Option<String>,
}

impl CardLookupRequest {
    /// # Logic
    /// - `user` / `card` 必须携带 ID。
    /// - `transactions` 的 ID 可选，空白 ID 视为未提供。
    /// - `cards` / `users` 忽略 ID。
    pub fn validate(self) -> Result<CardLookup, FlowError> {
        let action = require_action(self.action)?;
        match action.as_str() {
            "cards" => Ok(CardLookup::Cards),
            "users" => Ok(CardLookup::Users),
            "user" => Ok(CardLookup::User(require_id("user", self.id)?)),
            "card" => Ok(CardLookup::Card(require_id("card", self.id)?)),
            "transactions" => {
                let id = match self.id.filter(|id| !id.trim().is_empty()) {
                    Some(id) => Some(require_id("card", Some(id))?),
                    None => None,
                };
                Ok(CardLookup::Transactions(id))
            }
            other => Err(unknown_action(other)),
        }
    }
}

fn require_action(action: Option<String>) -> Result<String, FlowError> {
    match action {
        Some(a) if !a.trim().is_empty() => Ok(a),
        _ => Err(FlowError::Validation("action is required".to_string())),
    }
}

fn unknown_action(action: &str) -> FlowError {
    FlowError::Validation(format!("unknown action '{}'", action))
}

/// ID 会拼接进服务商路径，只接受字母、数字、`-` 与 `_`
fn require_id(kind: &str, id: Option<String>) -> Result<String, FlowError> {
    let id = match id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(FlowError::Validation(format!("{} id is required", kind))),
    };
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FlowError::Validation(format!(
            "{} id contains invalid characters",
            kind
        )));
    }
    Ok(id)
}
