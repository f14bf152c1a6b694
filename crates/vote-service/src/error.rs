//! 投票服务错误类型
//!
//! 定义服务层的业务错误和系统错误。
//!
//! 注意：重复投票和取消不存在的投票都不是错误——投票操作按幂等契约
//! 处理，这两种情况在服务层直接走无操作路径。

use thiserror::Error;

/// 投票服务错误类型
#[derive(Debug, Error)]
pub enum VoteError {
    // === 业务错误 ===
    #[error("未知的实体类型: {0}")]
    UnknownKind(String),

    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 投票服务 Result 类型别名
pub type Result<T> = std::result::Result<T, VoteError>;

impl VoteError {
    /// 检查是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        matches!(self, Self::UnknownKind(_) | Self::Validation(_))
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKind(_) => "UNKNOWN_KIND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
