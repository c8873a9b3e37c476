// ==========================================
// 铁路大亨 - 线路实体
// ==========================================
// 说明: 无向多重图的边; 允许同站对多条线路, 允许自环
// ==========================================

use crate::domain::station::StationId;
use crate::domain::time::TimeValue;
use crate::domain::types::{GridCell, LineCategory};
use serde::{Deserialize, Serialize};

/// 线路ID
pub type LineId = u32;

/// 铁路线路 (Railway Line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailwayLine {
    pub id: LineId,
    pub endpoint_a: StationId,
    pub endpoint_b: StationId,
    pub category: LineCategory,
    /// 有序网格路径（长度 ≥ 1）
    pub path: Vec<GridCell>,
    pub construction_date: TimeValue,
}

impl RailwayLine {
    pub fn new(
        id: LineId,
        endpoint_a: StationId,
        endpoint_b: StationId,
        category: LineCategory,
        path: Vec<GridCell>,
        construction_date: TimeValue,
    ) -> Self {
        Self {
            id,
            endpoint_a,
            endpoint_b,
            category,
            path,
            construction_date,
        }
    }

    /// 线路长度 = 路径格子数
    pub fn length(&self) -> usize {
        self.path.len()
    }

    /// 是否与车站相连
    pub fn touches(&self, station_id: StationId) -> bool {
        self.endpoint_a == station_id || self.endpoint_b == station_id
    }

    /// 给定一端, 返回另一端（自环返回自身）
    pub fn opposite(&self, station_id: StationId) -> Option<StationId> {
        if self.endpoint_a == station_id {
            Some(self.endpoint_b)
        } else if self.endpoint_b == station_id {
            Some(self.endpoint_a)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.endpoint_a == self.endpoint_b
    }
}
