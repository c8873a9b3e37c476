// ==========================================
// 铁路大亨 - 路网图 (Network Graph)
// ==========================================
// 职责: 持有一张地图的全部车站与线路
// 红线: 删除不存在的车站/线路为空操作, 不报错
// 约定: remove_station 不级联删除线路, 调用方需先摘除关联线路;
//       需要原子语义时使用 remove_station_cascade
// ==========================================

use crate::domain::error::{NetworkError, NetworkResult};
use crate::domain::line::{LineId, RailwayLine};
use crate::domain::station::{Station, StationId};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkGraph {
    stations: Vec<Station>,
    lines: Vec<RailwayLine>,
    /// 下一个可分配ID; 用 u64 表示 u32::MAX 之后的"已耗尽"状态
    next_station_id: u64,
    next_line_id: u64,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // ID 分配
    // ==========================================

    /// 分配新的车站ID（单调递增, 跳过已被调用方占用的ID）
    ///
    /// # 返回
    /// - Err(IdSpaceExhausted): u32::MAX 已被占用, 不再回绕复用
    pub fn allocate_station_id(&mut self) -> NetworkResult<StationId> {
        let id = StationId::try_from(self.next_station_id)
            .map_err(|_| NetworkError::IdSpaceExhausted("station"))?;
        self.next_station_id += 1;
        Ok(id)
    }

    /// 分配新的线路ID
    pub fn allocate_line_id(&mut self) -> NetworkResult<LineId> {
        let id = LineId::try_from(self.next_line_id)
            .map_err(|_| NetworkError::IdSpaceExhausted("line"))?;
        self.next_line_id += 1;
        Ok(id)
    }

    // ==========================================
    // 变更操作
    // ==========================================

    /// 插入车站（不做唯一性校验）
    pub fn add_station(&mut self, station: Station) {
        debug!(station_id = station.id, name = %station.name, "add_station");
        self.next_station_id = self.next_station_id.max(u64::from(station.id) + 1);
        self.stations.push(station);
    }

    /// 插入线路（不做唯一性校验, 不校验端点存在）
    pub fn add_line(&mut self, line: RailwayLine) {
        debug!(
            line_id = line.id,
            a = line.endpoint_a,
            b = line.endpoint_b,
            category = %line.category,
            "add_line"
        );
        self.next_line_id = self.next_line_id.max(u64::from(line.id) + 1);
        self.lines.push(line);
    }

    /// 删除车站, 不级联删除关联线路
    ///
    /// # 返回
    /// - Some(Station): 被删除的车站
    /// - None: 车站不存在（空操作）
    pub fn remove_station(&mut self, station_id: StationId) -> Option<Station> {
        let idx = self.stations.iter().position(|s| s.id == station_id)?;
        debug!(station_id, "remove_station");
        Some(self.stations.remove(idx))
    }

    /// 原子删除车站及其全部关联线路
    ///
    /// # 返回
    /// - (被删除的车站, 被摘除的线路); 车站不存在时线路也不会被动
    pub fn remove_station_cascade(
        &mut self,
        station_id: StationId,
    ) -> Option<(Station, Vec<RailwayLine>)> {
        let idx = self.stations.iter().position(|s| s.id == station_id)?;

        let (detached, kept): (Vec<RailwayLine>, Vec<RailwayLine>) = self
            .lines
            .drain(..)
            .partition(|line| line.touches(station_id));
        self.lines = kept;

        debug!(station_id, detached = detached.len(), "remove_station_cascade");
        Some((self.stations.remove(idx), detached))
    }

    /// 删除线路
    ///
    /// # 返回
    /// - None: 线路不存在（空操作）
    pub fn remove_line(&mut self, line_id: LineId) -> Option<RailwayLine> {
        let idx = self.lines.iter().position(|l| l.id == line_id)?;
        debug!(line_id, "remove_line");
        Some(self.lines.remove(idx))
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 与车站相连的全部线路（可能为空）
    pub fn lines_incident_to(&self, station_id: StationId) -> Vec<&RailwayLine> {
        self.lines.iter().filter(|l| l.touches(station_id)).collect()
    }

    /// 端点指向已不存在车站的线路（两步删除约定被违反时出现）
    pub fn dangling_lines(&self) -> Vec<&RailwayLine> {
        self.lines
            .iter()
            .filter(|l| !self.contains_station(l.endpoint_a) || !self.contains_station(l.endpoint_b))
            .collect()
    }

    pub fn station(&self, station_id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == station_id)
    }

    pub fn station_mut(&mut self, station_id: StationId) -> Option<&mut Station> {
        self.stations.iter_mut().find(|s| s.id == station_id)
    }

    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    pub fn contains_station(&self, station_id: StationId) -> bool {
        self.station(station_id).is_some()
    }

    pub fn line(&self, line_id: LineId) -> Option<&RailwayLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn line_mut(&mut self, line_id: LineId) -> Option<&mut RailwayLine> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn lines(&self) -> &[RailwayLine] {
        &self.lines
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::TimeValue;
    use crate::domain::types::{GridCell, LineCategory};

    fn station(id: StationId) -> Station {
        Station::new(id, format!("S{}", id), GridCell::new(id as i32, 0))
    }

    fn line(id: LineId, a: StationId, b: StationId) -> RailwayLine {
        RailwayLine::new(
            id,
            a,
            b,
            LineCategory::SingleTrack,
            vec![GridCell::new(0, 0)],
            TimeValue::new(2020, 1, 1),
        )
    }

    fn triangle() -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        for id in 1..=3 {
            graph.add_station(station(id));
        }
        graph.add_line(line(10, 1, 2));
        graph.add_line(line(11, 2, 3));
        graph.add_line(line(12, 3, 1));
        graph
    }

    #[test]
    fn test_lines_incident_to() {
        let graph = triangle();
        let ids: Vec<LineId> = graph.lines_incident_to(1).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert!(graph.lines_incident_to(99).is_empty());
    }

    #[test]
    fn test_parallel_lines_allowed() {
        let mut graph = triangle();
        graph.add_line(line(13, 1, 2));
        assert_eq!(graph.lines_incident_to(2).len(), 3);
        assert_eq!(graph.line_count(), 4);
    }

    #[test]
    fn test_remove_station_does_not_detach_lines() {
        let mut graph = triangle();
        let removed = graph.remove_station(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(graph.station_count(), 2);
        assert_eq!(graph.line_count(), 3);
        assert_eq!(graph.dangling_lines().len(), 2);
    }

    #[test]
    fn test_two_step_removal_leaves_no_dangling_lines() {
        let mut graph = triangle();
        let incident: Vec<LineId> = graph.lines_incident_to(1).iter().map(|l| l.id).collect();
        for line_id in incident {
            graph.remove_line(line_id);
        }
        graph.remove_station(1);
        assert!(graph.dangling_lines().is_empty());
        assert_eq!(graph.line_count(), 1);
    }

    #[test]
    fn test_remove_station_cascade() {
        let mut graph = triangle();
        let (removed, detached) = graph.remove_station_cascade(2).unwrap();
        assert_eq!(removed.id, 2);
        let detached_ids: Vec<LineId> = detached.iter().map(|l| l.id).collect();
        assert_eq!(detached_ids, vec![10, 11]);
        assert_eq!(graph.line_count(), 1);
        assert!(graph.dangling_lines().is_empty());
    }

    #[test]
    fn test_removal_of_absent_items_is_noop() {
        let mut graph = triangle();
        assert!(graph.remove_station(42).is_none());
        assert!(graph.remove_station_cascade(42).is_none());
        assert!(graph.remove_line(42).is_none());
        assert!(graph.remove_line(10).is_some());
        assert!(graph.remove_line(10).is_none());
        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.line_count(), 2);
    }

    #[test]
    fn test_id_allocation_skips_inserted_ids() {
        let mut graph = NetworkGraph::new();
        graph.add_station(station(5));
        assert_eq!(graph.allocate_station_id(), Ok(6));
        graph.add_line(line(3, 5, 5));
        assert_eq!(graph.allocate_line_id(), Ok(4));
        assert_eq!(graph.allocate_line_id(), Ok(5));
    }

    #[test]
    fn test_id_allocation_exhausted_after_max_id() {
        let mut graph = NetworkGraph::new();
        graph.add_station(station(StationId::MAX));
        assert_eq!(
            graph.allocate_station_id(),
            Err(NetworkError::IdSpaceExhausted("station"))
        );
        // 失败不推进计数, 也不回绕到已用ID
        assert!(graph.allocate_station_id().is_err());

        graph.add_line(line(LineId::MAX - 1, 1, 1));
        assert_eq!(graph.allocate_line_id(), Ok(LineId::MAX));
        assert_eq!(
            graph.allocate_line_id(),
            Err(NetworkError::IdSpaceExhausted("line"))
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let graph = triangle();
        assert_eq!(graph.station_by_name("S2").map(|s| s.id), Some(2));
        assert!(graph.station_by_name("S9").is_none());
    }
}
