// ==========================================
// 铁路大亨 - 路网拓扑引擎核心库
// ==========================================
// 职责: 路网连通性校验 / 线路升级成本 / 年度养护排期
// 技术栈: Rust + csv + tracing
// 系统定位: 游戏模拟内核 (同步, 单写多读)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 路网计算
pub mod engine;

// 导入层 - 车站/线路数据文件
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// 基准测试
pub mod benchmark;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CategorySet, Facing, GridCell, LineCategory, StationKind};

// 领域实体
pub use domain::{
    NetworkError, NetworkGraph, RailwayLine, Station, StructureDirectory, StructureRef, TimeValue,
};

// 引擎
pub use engine::{
    ConnectivityEngine, Ledger, LineUpgradeService, MaintenanceScheduler, NextMaintenance,
    UpgradeCostModel,
};

// API
pub use api::{ApiError, NetworkApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "铁路大亨 - 路网拓扑引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
