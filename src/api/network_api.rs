// ==========================================
// 铁路大亨 - 路网 API
// ==========================================
// 职责: 向外部协作方(线路管理/车站管理/财务)暴露路网操作
// 原则: 显式上下文, 不依赖全局注册表; 路网由本对象持有
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::{
    CategorySet, Facing, GridCell, LineCategory, LineId, NetworkError, NetworkGraph,
    RailwayLine, Station, StationId, StationKind, StructureDirectory, StructureRef, TimeValue,
};
use crate::engine::{
    ConnectivityEngine, Ledger, LineUpgradeService, MaintenanceScheduler, NextMaintenance,
    UpgradeCostModel, UpgradeReceipt,
};
use crate::importer::NetworkLoader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// 车站删除结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationRemoval {
    /// 被删除的车站（不存在时为 None）
    pub station: Option<Station>,
    /// 随车站一并摘除的线路
    pub detached_lines: Vec<LineId>,
}

// ==========================================
// NetworkApi - 路网 API
// ==========================================

/// 路网API
///
/// 职责：
/// 1. 车站/线路的增删（含删除顺序保护）
/// 2. 连通性校验（全网 / 两站）
/// 3. 升级报价与升级事务
/// 4. 养护排期查询
pub struct NetworkApi {
    graph: NetworkGraph,
    connectivity: ConnectivityEngine,
    cost_model: UpgradeCostModel,
    scheduler: MaintenanceScheduler,
    upgrade_service: LineUpgradeService,
    cascade_removal: bool,
}

impl NetworkApi {
    /// 创建空路网的API实例
    pub fn new(config: &ConfigManager) -> Self {
        Self::with_graph(NetworkGraph::new(), config)
    }

    /// 接管已有路网
    pub fn with_graph(graph: NetworkGraph, config: &ConfigManager) -> Self {
        Self {
            graph,
            connectivity: ConnectivityEngine::new(),
            cost_model: UpgradeCostModel::new(),
            scheduler: MaintenanceScheduler::new(config.get_maintenance_algorithm()),
            upgrade_service: LineUpgradeService::new(config.get_allow_downgrade()),
            cascade_removal: config.get_cascade_station_removal(),
        }
    }

    /// 从车站/线路文件加载路网
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        stations_path: P,
        lines_path: Q,
        config: &ConfigManager,
    ) -> ApiResult<Self> {
        let loader = NetworkLoader::new(config.get_default_construction_date());
        let graph = loader.load_files(stations_path, lines_path)?;
        Ok(Self::with_graph(graph, config))
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    pub fn into_graph(self) -> NetworkGraph {
        self.graph
    }

    // ==========================================
    // 车站管理
    // ==========================================

    /// 新建车站
    ///
    /// # 返回
    /// - Err(InvalidInput): 车站名为空
    /// - Err(BusinessRuleViolation): 车站名重复
    pub fn create_station(
        &mut self,
        name: &str,
        position: GridCell,
        kind: StationKind,
        facing: Facing,
    ) -> ApiResult<StationId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("车站名不能为空".to_string()));
        }
        if self.graph.station_by_name(name).is_some() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "车站名已存在: {}",
                name
            )));
        }

        let id = self.graph.allocate_station_id()?;
        self.graph.add_station(
            Station::new(id, name, position)
                .with_kind(kind)
                .with_facing(facing),
        );
        Ok(id)
    }

    /// 关联建筑到车站
    pub fn associate_structure(
        &mut self,
        station_id: StationId,
        structure: StructureRef,
    ) -> ApiResult<()> {
        let station = self
            .graph
            .station_mut(station_id)
            .ok_or(NetworkError::StationNotFound(station_id))?;
        station.associate(structure);
        Ok(())
    }

    /// 删除车站
    ///
    /// - 车站不存在: 空操作
    /// - 级联模式: 原子摘除全部关联线路后删除车站
    /// - 非级联模式: 仍有关联线路时拒绝, 避免悬挂线路
    ///
    /// 删除成功后清除关联建筑上的"所属车站"指针
    pub fn remove_station(
        &mut self,
        station_id: StationId,
        directory: &mut dyn StructureDirectory,
    ) -> ApiResult<StationRemoval> {
        if !self.graph.contains_station(station_id) {
            return Ok(StationRemoval::default());
        }

        let (station, detached) = if self.cascade_removal {
            match self.graph.remove_station_cascade(station_id) {
                Some((station, lines)) => (station, lines.into_iter().map(|l| l.id).collect()),
                None => return Ok(StationRemoval::default()),
            }
        } else {
            let incident = self.graph.lines_incident_to(station_id).len();
            if incident > 0 {
                warn!(station_id, incident, "车站仍有关联线路, 拒绝删除");
                return Err(ApiError::BusinessRuleViolation(format!(
                    "车站(id={})仍有{}条关联线路, 请先删除线路",
                    station_id, incident
                )));
            }
            match self.graph.remove_station(station_id) {
                Some(station) => (station, Vec::new()),
                None => return Ok(StationRemoval::default()),
            }
        };

        let mut station = station;
        station.release_associations(directory);

        info!(station_id, detached = detached.len(), "车站已删除");
        Ok(StationRemoval {
            station: Some(station),
            detached_lines: detached,
        })
    }

    // ==========================================
    // 线路管理
    // ==========================================

    /// 新建线路
    ///
    /// # 返回
    /// - Err(NotFound): 端点车站不存在
    /// - Err(InvalidInput): 路径为空
    pub fn build_line(
        &mut self,
        endpoint_a: StationId,
        endpoint_b: StationId,
        category: LineCategory,
        path: Vec<GridCell>,
        construction_date: TimeValue,
    ) -> ApiResult<LineId> {
        for endpoint in [endpoint_a, endpoint_b] {
            if !self.graph.contains_station(endpoint) {
                return Err(NetworkError::StationNotFound(endpoint).into());
            }
        }
        if path.is_empty() {
            return Err(ApiError::InvalidInput("线路路径至少包含一个格子".to_string()));
        }

        let id = self.graph.allocate_line_id()?;
        self.graph.add_line(RailwayLine::new(
            id,
            endpoint_a,
            endpoint_b,
            category,
            path,
            construction_date,
        ));
        Ok(id)
    }

    /// 删除线路（不存在时为空操作）
    pub fn remove_line(&mut self, line_id: LineId) -> Option<RailwayLine> {
        self.graph.remove_line(line_id)
    }

    pub fn lines_incident_to(&self, station_id: StationId) -> Vec<LineId> {
        self.graph
            .lines_incident_to(station_id)
            .iter()
            .map(|l| l.id)
            .collect()
    }

    // ==========================================
    // 连通性
    // ==========================================

    pub fn verify_connectivity(&self, excluded: &[LineCategory]) -> bool {
        self.connectivity
            .verify_connectivity(&self.graph, &CategorySet::from(excluded))
    }

    /// 以外部编码指定排除集
    ///
    /// # 返回
    /// - Err(InvalidInput): 存在未定义的等级编码
    pub fn verify_connectivity_by_codes(&self, excluded_codes: &[i32]) -> ApiResult<bool> {
        let excluded = excluded_codes
            .iter()
            .map(|&code| LineCategory::from_code(code))
            .collect::<Result<CategorySet, NetworkError>>()?;
        Ok(self.connectivity.verify_connectivity(&self.graph, &excluded))
    }

    pub fn is_reachable(
        &self,
        from: StationId,
        to: StationId,
        excluded: &[LineCategory],
    ) -> ApiResult<bool> {
        Ok(self
            .connectivity
            .is_reachable(&self.graph, from, to, &CategorySet::from(excluded))?)
    }

    // ==========================================
    // 升级
    // ==========================================

    /// 纯报价: 不扣款, 不修改线路
    pub fn upgrade_cost(&self, old: LineCategory, new: LineCategory, length: u64) -> i64 {
        self.cost_model.upgrade_cost(old, new, length)
    }

    pub fn quote_upgrade(&self, line_id: LineId, new_category: LineCategory) -> ApiResult<i64> {
        Ok(self.upgrade_service.quote(&self.graph, line_id, new_category)?)
    }

    /// 应用升级（扣款 + 修改线路等级）
    pub fn apply_upgrade(
        &mut self,
        line_id: LineId,
        new_category: LineCategory,
        ledger: &mut dyn Ledger,
    ) -> ApiResult<UpgradeReceipt> {
        Ok(self
            .upgrade_service
            .apply_upgrade(&mut self.graph, line_id, new_category, ledger)?)
    }

    // ==========================================
    // 养护
    // ==========================================

    pub fn next_maintenance(&self, construction: TimeValue, reference: TimeValue) -> NextMaintenance {
        self.scheduler.next_maintenance(construction, reference)
    }

    pub fn next_maintenance_for_line(
        &self,
        line_id: LineId,
        reference: TimeValue,
    ) -> ApiResult<NextMaintenance> {
        let line = self
            .graph
            .line(line_id)
            .ok_or(NetworkError::LineNotFound(line_id))?;
        Ok(self.scheduler.next_maintenance(line.construction_date, reference))
    }

    /// 今天需要养护的线路（触发养护支出由调用方负责）
    pub fn lines_due_for_maintenance(&self, today: TimeValue) -> Vec<LineId> {
        self.scheduler
            .lines_due(&self.graph, today)
            .iter()
            .map(|l| l.id)
            .collect()
    }

    pub fn maintenance_schedule(&self, reference: TimeValue) -> Vec<(LineId, TimeValue)> {
        self.scheduler.upcoming(&self.graph, reference)
    }
}
