// ==========================================
// 铁路大亨 - 配置层
// ==========================================
// 职责: 系统配置管理, 支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, get_default_config_path, ConfigManager};
