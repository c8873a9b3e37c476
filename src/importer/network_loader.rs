// ==========================================
// 铁路大亨 - 路网加载器
// ==========================================
// 职责: 车站文件 + 线路文件 → NetworkGraph, 以及反向写出
// 约定: 车站按文件顺序分配ID, 坐标 (序号, 0); 线路路径为两端坐标
// ==========================================

use crate::domain::line::RailwayLine;
use crate::domain::network::NetworkGraph;
use crate::domain::station::{Station, StationId};
use crate::domain::time::TimeValue;
use crate::domain::types::GridCell;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{LineRecord, LinesFileParser, StationsFileParser};
use csv::WriterBuilder;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

pub struct NetworkLoader {
    construction_date: TimeValue,
}

impl NetworkLoader {
    /// # 参数
    /// - construction_date: 文件格式不含建成日期, 统一使用此值
    pub fn new(construction_date: TimeValue) -> Self {
        Self { construction_date }
    }

    /// 从文件加载路网
    #[instrument(skip(self, stations_path, lines_path))]
    pub fn load_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        stations_path: P,
        lines_path: Q,
    ) -> ImportResult<NetworkGraph> {
        let names = StationsFileParser.parse_file(stations_path)?;
        let records = LinesFileParser.parse_file(lines_path)?;
        let graph = self.build(&names, &records)?;

        info!(
            stations = graph.station_count(),
            lines = graph.line_count(),
            "路网加载完成"
        );
        Ok(graph)
    }

    /// 由已解析的记录构建路网
    pub fn build(&self, names: &[String], records: &[LineRecord]) -> ImportResult<NetworkGraph> {
        let mut graph = NetworkGraph::new();
        let mut by_name: HashMap<&str, (StationId, GridCell)> = HashMap::with_capacity(names.len());

        for (idx, name) in names.iter().enumerate() {
            // 车站文件只有一行
            let id = graph
                .allocate_station_id()
                .map_err(|e| ImportError::from_network(e, 1))?;
            let position = GridCell::new(idx as i32, 0);
            if by_name.insert(name.as_str(), (id, position)).is_some() {
                return Err(ImportError::DuplicateStation(name.clone()));
            }
            graph.add_station(Station::new(id, name.clone(), position));
        }

        for record in records {
            let lookup = |name: &str| {
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| ImportError::StationNotFound {
                        row: record.row,
                        name: name.to_string(),
                    })
            };
            let (a, pos_a) = lookup(&record.station_a)?;
            let (b, pos_b) = lookup(&record.station_b)?;

            let id = graph
                .allocate_line_id()
                .map_err(|e| ImportError::from_network(e, record.row))?;
            graph.add_line(RailwayLine::new(
                id,
                a,
                b,
                record.category,
                vec![pos_a, pos_b],
                self.construction_date,
            ));
        }

        Ok(graph)
    }
}

// ==========================================
// 反向写出（基准数据生成用）
// ==========================================

/// 写出车站文件（单行逗号分隔）
pub fn write_stations<W: Write>(graph: &NetworkGraph, writer: W) -> ImportResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(graph.stations().iter().map(|s| s.name.as_str()))?;
    writer.flush()?;
    Ok(())
}

/// 写出线路文件（每行 `a;b;code`）; 端点缺失的线路报 StationNotFound
pub fn write_lines<W: Write>(graph: &NetworkGraph, writer: W) -> ImportResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .from_writer(writer);

    for (idx, line) in graph.lines().iter().enumerate() {
        let name_of = |id: StationId| {
            graph
                .station(id)
                .map(|s| s.name.clone())
                .ok_or_else(|| ImportError::StationNotFound {
                    row: idx + 1,
                    name: id.to_string(),
                })
        };
        let code = line.category.code().to_string();
        writer.write_record([name_of(line.endpoint_a)?, name_of(line.endpoint_b)?, code])?;
    }

    writer.flush()?;
    Ok(())
}
