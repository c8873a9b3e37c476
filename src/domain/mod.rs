// ==========================================
// 铁路大亨 - 领域模型层
// ==========================================
// 职责: 定义车站、线路、路网图与值类型
// 红线: 不含引擎逻辑, 不含 I/O
// ==========================================

pub mod error;
pub mod line;
pub mod network;
pub mod station;
pub mod time;
pub mod types;

// 重导出核心类型
pub use error::{NetworkError, NetworkResult};
pub use line::{LineId, RailwayLine};
pub use network::NetworkGraph;
pub use station::{
    HouseBlockId, IndustryId, Station, StationId, StructureDirectory, StructureRef,
};
pub use time::TimeValue;
pub use types::{CategorySet, Facing, GridCell, LineCategory, StationKind};
