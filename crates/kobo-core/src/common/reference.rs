use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Summary
/// 关联引用号 (Correlation Reference)。
/// 每个 payout / trade / swap 请求在本地生成一次，用于把请求与上游服务商的后续活动对应起来。
///
/// # Invariants
/// - 一经生成在整个请求生命周期内不可变。
/// - 对调用方而言是不透明字符串。
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reference(pub String);

impl Reference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// # Summary
/// 引用号生成器接口，用于隔离随机源。
/// 所有编排流程必须通过此接口获取新的引用号，测试中可注入确定性实现。
pub trait ReferenceGenerator: Send + Sync {
    /// 生成一个新的全局唯一引用号
    fn next_reference(&self) -> Reference;
}

/// # Summary
/// 生产环境使用的生成器：128 位随机 UUID (v4)，以标准连字符格式输出。
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidReferenceGenerator;

impl ReferenceGenerator for UuidReferenceGenerator {
    fn next_reference(&self) -> Reference {
        Reference(Uuid::new_v4().to_string())
    }
}

/// # Summary
/// 测试专用的顺序生成器，依次返回 `<prefix>-1`、`<prefix>-2` ...
///
/// # Invariants
/// - 并发安全：内部计数器由 `Mutex` 保护。
#[cfg(any(test, feature = "test-utils"))]
pub struct SequentialReferenceGenerator {
    prefix: String,
    counter: std::sync::Mutex<u64>,
}

#[cfg(any(test, feature = "test-utils"))]
impl SequentialReferenceGenerator {
    /// 使用指定前缀创建生成器
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: std::sync::Mutex::new(0),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl ReferenceGenerator for SequentialReferenceGenerator {
    fn next_reference(&self) -> Reference {
        let mut counter = match self.counter.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *counter += 1;
        Reference(format!("{}-{}", self.prefix, *counter))
    }
}
