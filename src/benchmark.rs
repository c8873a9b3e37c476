// ==========================================
// 铁路大亨 - 连通性基准测试
// ==========================================
// 职责: 按递增规模生成路网, 计时 verify_connectivity, 输出 CSV
// CSV: 表头 `size, time`, 行 `<车站数>,<秒, 3位小数>`
// ==========================================

use crate::domain::error::NetworkResult;
use crate::domain::line::RailwayLine;
use crate::domain::network::NetworkGraph;
use crate::domain::station::{Station, StationId};
use crate::domain::time::TimeValue;
use crate::domain::types::{CategorySet, GridCell, LineCategory};
use crate::engine::connectivity::ConnectivityEngine;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

// ==========================================
// NetworkGenerator - 合成路网生成器
// ==========================================
// 结构: 一条贯穿全部车站的链 (保证连通) + 稀疏弦线
// 等级: 链上按序轮换, 弦线固定为电气化复线
#[derive(Debug, Clone, Copy)]
pub struct NetworkGenerator {
    /// 每隔多少个车站加一条弦线（0 表示不加）
    pub chord_every: usize,
    pub construction_date: TimeValue,
}

impl Default for NetworkGenerator {
    fn default() -> Self {
        Self {
            chord_every: 5,
            construction_date: TimeValue::new(2000, 1, 1),
        }
    }
}

impl NetworkGenerator {
    pub fn generate(&self, size: usize) -> NetworkResult<NetworkGraph> {
        let mut graph = NetworkGraph::new();

        for i in 0..size {
            let id = graph.allocate_station_id()?;
            graph.add_station(Station::new(id, format!("S{}", i), GridCell::new(i as i32, 0)));
        }

        let ids: Vec<_> = graph.stations().iter().map(|s| s.id).collect();
        for (i, pair) in ids.windows(2).enumerate() {
            let category = LineCategory::ALL[i % LineCategory::ALL.len()];
            self.push_line(&mut graph, pair[0], pair[1], category)?;
        }

        if self.chord_every > 0 && size > 2 {
            for i in (0..size).step_by(self.chord_every) {
                let j = (i * 31 + 17) % size;
                if j != i {
                    self.push_line(&mut graph, ids[i], ids[j], LineCategory::ElectrifiedDoubleTrack)?;
                }
            }
        }

        Ok(graph)
    }

    fn push_line(
        &self,
        graph: &mut NetworkGraph,
        a: StationId,
        b: StationId,
        category: LineCategory,
    ) -> NetworkResult<()> {
        let (pos_a, pos_b) = match (graph.station(a), graph.station(b)) {
            (Some(sa), Some(sb)) => (sa.position, sb.position),
            _ => return Ok(()),
        };
        let id = graph.allocate_line_id()?;
        graph.add_line(RailwayLine::new(
            id,
            a,
            b,
            category,
            vec![pos_a, pos_b],
            self.construction_date,
        ));
        Ok(())
    }
}

// ==========================================
// 基准结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSample {
    /// 车站数
    pub size: usize,
    /// 平均耗时
    pub elapsed: Duration,
    /// 校验结果（用于确认基准没有走捷径）
    pub connected: bool,
}

// ==========================================
// ConnectivityBenchmark - 连通性基准
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectivityBenchmark {
    generator: NetworkGenerator,
    engine: ConnectivityEngine,
}

impl ConnectivityBenchmark {
    pub fn new(generator: NetworkGenerator) -> Self {
        Self {
            generator,
            engine: ConnectivityEngine::new(),
        }
    }

    /// 对每个规模生成路网并计时
    #[instrument(skip(self))]
    pub fn run(&self, sizes: &[usize], repetitions: usize) -> NetworkResult<Vec<BenchmarkSample>> {
        sizes
            .iter()
            .map(|&size| {
                let graph = self.generator.generate(size)?;
                let sample = self.measure(&graph, &CategorySet::empty(), repetitions);
                info!(
                    size = sample.size,
                    elapsed_ms = sample.elapsed.as_secs_f64() * 1000.0,
                    connected = sample.connected,
                    "基准规模完成"
                );
                Ok(sample)
            })
            .collect()
    }

    /// 对给定路网重复计时, 取平均
    pub fn measure(
        &self,
        graph: &NetworkGraph,
        excluded: &CategorySet,
        repetitions: usize,
    ) -> BenchmarkSample {
        let repetitions = repetitions.max(1);
        let mut total = Duration::ZERO;
        let mut connected = false;

        for _ in 0..repetitions {
            let start = Instant::now();
            connected = self.engine.verify_connectivity(graph, excluded);
            total += start.elapsed();
        }

        BenchmarkSample {
            size: graph.station_count(),
            elapsed: total / repetitions as u32,
            connected,
        }
    }
}

// ==========================================
// CSV 输出
// ==========================================

/// 写出基准结果 CSV
pub fn write_results_csv<W: Write>(writer: W, samples: &[BenchmarkSample]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(["size", " time"])?;
    for sample in samples {
        writer.write_record([
            sample.size.to_string(),
            format!("{:.3}", sample.elapsed.as_secs_f64()),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// 写出基准结果 CSV 文件
pub fn write_results_file<P: AsRef<Path>>(path: P, samples: &[BenchmarkSample]) -> csv::Result<()> {
    let file = File::create(path.as_ref())?;
    write_results_csv(file, samples)
}
