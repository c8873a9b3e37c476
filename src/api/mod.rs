// ==========================================
// 铁路大亨 - API 层
// ==========================================
// 职责: 面向外部协作方的业务接口, 统一错误转换
// ==========================================

pub mod error;
pub mod network_api;

// 重导出
pub use error::{ApiError, ApiResult};
pub use network_api::{NetworkApi, StationRemoval};
