// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的路网构建、数据文件落盘、账本/建筑目录桩
// ==========================================

#![allow(dead_code)]

use rail_tycoon::domain::{
    GridCell, HouseBlockId, IndustryId, LineCategory, NetworkGraph, RailwayLine, Station,
    StationId, StructureDirectory, TimeValue,
};
use rail_tycoon::engine::Ledger;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const DEFAULT_CONSTRUCTION: TimeValue = TimeValue::new(2000, 1, 1);

/// 按名称与 (端点下标, 端点下标, 等级) 构建路网
///
/// 车站沿 x 轴排布, 线路路径为两端点格子
pub fn build_graph(names: &[&str], lines: &[(usize, usize, LineCategory)]) -> NetworkGraph {
    let mut graph = NetworkGraph::new();
    let mut ids: Vec<StationId> = Vec::with_capacity(names.len());

    for (idx, name) in names.iter().enumerate() {
        let id = graph.allocate_station_id().unwrap();
        graph.add_station(Station::new(id, *name, GridCell::new(idx as i32, 0)));
        ids.push(id);
    }

    for &(a, b, category) in lines {
        let id = graph.allocate_line_id().unwrap();
        graph.add_line(RailwayLine::new(
            id,
            ids[a],
            ids[b],
            category,
            vec![GridCell::new(a as i32, 0), GridCell::new(b as i32, 0)],
            DEFAULT_CONSTRUCTION,
        ));
    }

    graph
}

/// 三站链: S1 –X– S2 –Y– S3
pub fn three_station_chain(x: LineCategory, y: LineCategory) -> NetworkGraph {
    build_graph(&["S1", "S2", "S3"], &[(0, 1, x), (1, 2, y)])
}

pub fn station_id(graph: &NetworkGraph, name: &str) -> StationId {
    graph
        .station_by_name(name)
        .map(|s| s.id)
        .unwrap_or_else(|| panic!("station {} missing", name))
}

/// 将车站/线路文件写入临时目录
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - PathBuf: 车站文件路径
/// - PathBuf: 线路文件路径
pub fn write_network_files(
    stations: &str,
    lines: &str,
) -> Result<(TempDir, PathBuf, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let stations_path = dir.path().join("stations.txt");
    let lines_path = dir.path().join("lines.txt");
    fs::write(&stations_path, stations)?;
    fs::write(&lines_path, lines)?;
    Ok((dir, stations_path, lines_path))
}

// ==========================================
// 桩实现
// ==========================================

/// 内存账本
#[derive(Debug, Default)]
pub struct MemoryLedger {
    pub balance: i64,
    pub entries: Vec<(i64, String)>,
}

impl MemoryLedger {
    pub fn with_balance(balance: i64) -> Self {
        Self {
            balance,
            entries: Vec::new(),
        }
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self) -> i64 {
        self.balance
    }

    fn record_expense(&mut self, amount: i64, memo: &str) {
        self.balance -= amount;
        self.entries.push((amount, memo.to_string()));
    }
}

/// 记录被清除的建筑指针
#[derive(Debug, Default)]
pub struct RecordingDirectory {
    pub industries: Vec<IndustryId>,
    pub house_blocks: Vec<HouseBlockId>,
}

impl StructureDirectory for RecordingDirectory {
    fn clear_industry_station(&mut self, id: IndustryId) {
        self.industries.push(id);
    }

    fn clear_house_block_station(&mut self, id: HouseBlockId) {
        self.house_blocks.push(id);
    }
}
