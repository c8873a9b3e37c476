// ==========================================
// 铁路大亨 - API层错误类型
// ==========================================
// 职责: 将领域/引擎/导入错误转换为面向调用方的错误
// ==========================================

use crate::domain::error::NetworkError;
use crate::engine::line_upgrade::UpgradeError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("余额不足: 需要 {required}, 可用 {available}")]
    InsufficientFunds { required: i64, available: i64 },

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 NetworkError 转换
// ==========================================
impl From<NetworkError> for ApiError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::StationNotFound(id) => ApiError::NotFound(format!("车站(id={})不存在", id)),
            NetworkError::LineNotFound(id) => ApiError::NotFound(format!("线路(id={})不存在", id)),
            NetworkError::UnknownCategory(_)
            | NetworkError::InvalidDate(_)
            | NetworkError::InvalidFacing(_) => ApiError::InvalidInput(err.to_string()),
            NetworkError::IdSpaceExhausted(_) => ApiError::BusinessRuleViolation(err.to_string()),
        }
    }
}

// ==========================================
// 从 UpgradeError 转换
// ==========================================
impl From<UpgradeError> for ApiError {
    fn from(err: UpgradeError) -> Self {
        match err {
            UpgradeError::LineNotFound(id) => ApiError::NotFound(format!("线路(id={})不存在", id)),
            UpgradeError::InsufficientFunds {
                required,
                available,
            } => ApiError::InsufficientFunds {
                required,
                available,
            },
            UpgradeError::DowngradeRejected { .. } => {
                ApiError::BusinessRuleViolation(err.to_string())
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportFailed(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
