// ==========================================
// 铁路大亨 - 连通性校验引擎
// ==========================================
// 职责: 在"排除若干线路等级"的约束下判断路网是否连通
// 输入: NetworkGraph 快照 + 排除等级集合
// 输出: bool / 可达车站集合 / 连通分量数
// 复杂度: O(|车站| + |过滤后线路|), 单次 BFS
// 红线: 纯函数, 不修改路网
// ==========================================

use crate::domain::error::{NetworkError, NetworkResult};
use crate::domain::network::NetworkGraph;
use crate::domain::station::StationId;
use crate::domain::types::CategorySet;
use crate::perf::{self, PerfGuard};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::instrument;

// ==========================================
// 邻接视图 (按排除集过滤后的无向邻接表)
// ==========================================
// 车站按 graph.stations() 顺序映射为稠密下标
struct Adjacency {
    index: HashMap<StationId, usize>,
    ids: Vec<StationId>,
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    fn build(graph: &NetworkGraph, excluded: &CategorySet) -> Self {
        // 重复ID视为同一车站
        let mut ids = Vec::with_capacity(graph.station_count());
        let mut index = HashMap::with_capacity(graph.station_count());
        for station in graph.stations() {
            if !index.contains_key(&station.id) {
                index.insert(station.id, ids.len());
                ids.push(station.id);
            }
        }
        let mut neighbors = vec![Vec::new(); ids.len()];

        for line in graph.lines() {
            if excluded.contains(line.category) {
                continue;
            }
            // 端点缺失的悬挂线路忽略
            let (Some(&a), Some(&b)) = (index.get(&line.endpoint_a), index.get(&line.endpoint_b))
            else {
                continue;
            };
            if a == b {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }

        Self {
            index,
            ids,
            neighbors,
        }
    }

    /// 从 start 出发 BFS, 标记 visited, 返回本次新访问的车站数
    fn bfs(&self, start: usize, visited: &mut [bool]) -> usize {
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for &next in &self.neighbors[current] {
                if !visited[next] {
                    visited[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        perf::record_visits(reached as u64);
        reached
    }
}

// ==========================================
// ConnectivityEngine - 连通性校验引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectivityEngine;

impl ConnectivityEngine {
    pub fn new() -> Self {
        Self
    }

    /// 全网连通性校验
    ///
    /// 规则:
    /// 1) 车站数为 0 或 1 → true
    /// 2) 仅使用等级 ∉ excluded 的线路建立邻接
    /// 3) 任取起点 BFS, 可达集合 == 全部车站 → true
    #[instrument(
        skip(self, graph, excluded),
        fields(stations = graph.station_count(), lines = graph.line_count(), excluded = %excluded)
    )]
    pub fn verify_connectivity(&self, graph: &NetworkGraph, excluded: &CategorySet) -> bool {
        let _perf = PerfGuard::new("verify_connectivity");

        if graph.station_count() <= 1 {
            return true;
        }

        let adjacency = Adjacency::build(graph, excluded);
        let mut visited = vec![false; adjacency.ids.len()];
        let reached = adjacency.bfs(0, &mut visited);

        reached == adjacency.ids.len()
    }

    /// 两站可达性（排除集约束下）
    ///
    /// # 返回
    /// - Err(StationNotFound): 任一端车站不存在
    pub fn is_reachable(
        &self,
        graph: &NetworkGraph,
        from: StationId,
        to: StationId,
        excluded: &CategorySet,
    ) -> NetworkResult<bool> {
        let adjacency = Adjacency::build(graph, excluded);
        let start = *adjacency
            .index
            .get(&from)
            .ok_or(NetworkError::StationNotFound(from))?;
        let target = *adjacency
            .index
            .get(&to)
            .ok_or(NetworkError::StationNotFound(to))?;

        if start == target {
            return Ok(true);
        }

        let mut visited = vec![false; adjacency.ids.len()];
        adjacency.bfs(start, &mut visited);
        Ok(visited[target])
    }

    /// 从某站出发可达的全部车站（含自身）
    pub fn reachable_from(
        &self,
        graph: &NetworkGraph,
        start: StationId,
        excluded: &CategorySet,
    ) -> NetworkResult<HashSet<StationId>> {
        let adjacency = Adjacency::build(graph, excluded);
        let start_idx = *adjacency
            .index
            .get(&start)
            .ok_or(NetworkError::StationNotFound(start))?;

        let mut visited = vec![false; adjacency.ids.len()];
        adjacency.bfs(start_idx, &mut visited);

        Ok(adjacency
            .ids
            .iter()
            .zip(visited)
            .filter_map(|(id, seen)| seen.then_some(*id))
            .collect())
    }

    /// 连通分量数（空图为 0）
    pub fn component_count(&self, graph: &NetworkGraph, excluded: &CategorySet) -> usize {
        let adjacency = Adjacency::build(graph, excluded);
        let mut visited = vec![false; adjacency.ids.len()];
        let mut components = 0;

        for start in 0..adjacency.ids.len() {
            if !visited[start] {
                adjacency.bfs(start, &mut visited);
                components += 1;
            }
        }

        components
    }
}
