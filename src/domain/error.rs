// ==========================================
// 铁路大亨 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 原则: 结构性错误立即上抛, 不重试
// ==========================================

use crate::domain::line::LineId;
use crate::domain::station::StationId;
use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("未知线路等级编码: {0}")]
    UnknownCategory(i32),

    #[error("车站不存在: station_id={0}")]
    StationNotFound(StationId),

    #[error("线路不存在: line_id={0}")]
    LineNotFound(LineId),

    #[error("日期格式错误: 期望 YYYY-MM-DD，实际 {0}")]
    InvalidDate(String),

    #[error("朝向格式错误: {0}")]
    InvalidFacing(String),

    #[error("{0} ID 已耗尽")]
    IdSpaceExhausted(&'static str),
}

/// Result 类型别名
pub type NetworkResult<T> = Result<T, NetworkError>;
