// ==========================================
// 铁路大亨 - 引擎层
// ==========================================
// 职责: 路网连通性 / 升级成本 / 年度养护 的纯计算
// 红线: 引擎不持有全局状态, 只操作调用方传入的 NetworkGraph
// ==========================================

pub mod connectivity;
pub mod line_upgrade;
pub mod maintenance;
pub mod upgrade_cost;

// 重导出核心引擎
pub use connectivity::ConnectivityEngine;
pub use line_upgrade::{Ledger, LineUpgradeService, UpgradeError, UpgradeReceipt};
pub use maintenance::{
    next_maintenance_closed_form, next_maintenance_scan, MaintenanceAlgorithm,
    MaintenanceScheduler, NextMaintenance,
};
pub use upgrade_cost::UpgradeCostModel;
