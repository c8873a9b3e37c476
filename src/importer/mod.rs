// ==========================================
// 铁路大亨 - 导入层
// ==========================================
// 职责: 离线/基准数据文件 → NetworkGraph
// 支持: 车站文件 (逗号分隔) + 线路文件 (分号分隔)
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod network_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{LineRecord, LinesFileParser, StationsFileParser};
pub use network_loader::{write_lines, write_stations, NetworkLoader};
