// ==========================================
// 铁路大亨 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::error::NetworkError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("车站文件为空")]
    EmptyStationsFile,

    #[error("线路记录格式错误 (行 {row}): {message}")]
    MalformedLine { row: usize, message: String },

    #[error("未知线路等级编码 (行 {row}): {code}")]
    UnknownCategory { row: usize, code: i32 },

    #[error("车站不存在 (行 {row}): {name}")]
    StationNotFound { row: usize, name: String },

    #[error("车站名重复: {0}")]
    DuplicateStation(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 附带行号, 将领域错误映射为导入错误
    pub fn from_network(err: NetworkError, row: usize) -> Self {
        match err {
            NetworkError::UnknownCategory(code) => ImportError::UnknownCategory { row, code },
            other => ImportError::MalformedLine {
                row,
                message: other.to_string(),
            },
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
