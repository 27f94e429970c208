use std::fmt;

use thiserror::Error;

use crate::common::reference::Reference;
use crate::flow::entity::QuoteId;
use crate::provider::error::ProviderError;

/// # Summary
/// 编排流程中的每一次出站调用。
/// 用于给错误信息加上步骤前缀，使调用方仅凭 `message` 即可定位失败位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// payout 报价
    Quote,
    /// payout 初始化
    Initialize,
    /// payout 确认
    Finalize,
    /// 创建交易
    CreateTrade,
    /// 确认交易
    FinalizeTrade,
    /// 初始化兑换
    InitializeSwap,
    /// 确认兑换
    FinalizeSwap,
    /// 查询流水
    ListTransactions,
    /// 虚拟卡中继
    VirtualCard,
}

impl Step {
    /// 失败信息中的步骤前缀
    pub fn label(&self) -> &'static str {
        match self {
            Step::Quote => "Quote",
            Step::Initialize => "Initialize",
            Step::Finalize => "Finalize",
            Step::CreateTrade => "Trade creation",
            Step::FinalizeTrade => "Trade finalization",
            Step::InitializeSwap => "Swap initialization",
            Step::FinalizeSwap => "Swap finalization",
            Step::ListTransactions => "Transactions query",
            Step::VirtualCard => "Virtual card request",
        }
    }

    /// 解析失败信息中描述响应来源的名词
    pub fn subject(&self) -> &'static str {
        match self {
            Step::Quote => "quote",
            Step::Initialize => "initialize",
            Step::Finalize => "finalize",
            Step::CreateTrade => "trade",
            Step::FinalizeTrade => "trade finalization",
            Step::InitializeSwap => "swap initialization",
            Step::FinalizeSwap => "swap finalization",
            Step::ListTransactions => "transactions",
            Step::VirtualCard => "virtual card",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// # Summary
/// 编排流程的错误分类。
///
/// # Invariants
/// - 单个请求最多只会产生一个 `FlowError`，且总是终止该请求的流程。
/// - 只有 `Validation` 映射为 HTTP 400，其余均为 500。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// 缺失或格式错误的必填输入，尚未发出任何外部调用
    #[error("Invalid request: {0}")]
    Validation(String),

    /// 缺失凭证或基础地址，尚未发出任何外部调用
    #[error("Missing API configuration: {0}")]
    Configuration(String),

    /// 某一步的出站调用失败 (上游 >= 400、传输失败或编码失败)
    #[error("{} failed: {source}", .step.label())]
    Provider {
        step: Step,
        #[source]
        source: ProviderError,
    },

    /// 服务商响应中缺少预期的字段
    #[error("Failed to parse {} response: {reason}", .step.subject())]
    Parse { step: Step, reason: String },
}

impl FlowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }

    /// 发生错误的步骤；校验与配置错误发生在任何调用之前，返回 `None`
    pub fn step(&self) -> Option<Step> {
        match self {
            FlowError::Provider { step, .. } | FlowError::Parse { step, .. } => Some(*step),
            FlowError::Validation(_) | FlowError::Configuration(_) => None,
        }
    }
}

/// # Summary
/// 一次失败的流程结果，携带必须随失败一并回显给调用方的标识。
///
/// # Invariants
/// - payout / trade create 在引用号生成后的任何失败都带有 `reference`。
/// - trade finalize 的失败回显调用方提供的 `quote_id`，不生成引用号。
/// - swap 的失败不携带任何标识。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct FlowFailure {
    pub error: FlowError,
    pub reference: Option<Reference>,
    pub quote_id: Option<QuoteId>,
}

impl FlowFailure {
    pub fn new(error: FlowError) -> Self {
        Self {
            error,
            reference: None,
            quote_id: None,
        }
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_quote_id(mut self, quote_id: QuoteId) -> Self {
        self.quote_id = Some(quote_id);
        self
    }
}

impl From<FlowError> for FlowFailure {
    fn from(error: FlowError) -> Self {
        Self::new(error)
    }
}
