// ==========================================
// 铁路大亨 - 应用层
// ==========================================
// 职责: 组装配置与路网API, 供 CLI 与宿主程序共享
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_config_path, AppState};
