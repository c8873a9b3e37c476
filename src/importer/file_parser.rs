// ==========================================
// 铁路大亨 - 文件解析器实现
// ==========================================
// 车站文件: 单行, 逗号分隔的车站名
// 线路文件: 每行 `<车站1>;<车站2>;<等级编码>`
// ==========================================

use crate::domain::types::LineCategory;
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn open_existing(path: &Path) -> ImportResult<File> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(File::open(path)?)
}

// ==========================================
// 车站文件解析
// ==========================================
pub struct StationsFileParser;

impl StationsFileParser {
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<String>> {
        let file = open_existing(file_path.as_ref())?;
        self.parse_reader(file)
    }

    /// 解析车站名列表（取第一条非空记录, 去空白, 跳过空名）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<String>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        for result in reader.records() {
            let record = result?;
            let names: Vec<String> = record
                .iter()
                .filter(|name| !name.is_empty())
                .map(|name| name.to_string())
                .collect();

            // 跳过完全空白的行
            if names.is_empty() {
                continue;
            }

            let mut seen = HashSet::with_capacity(names.len());
            for name in &names {
                if !seen.insert(name.as_str()) {
                    return Err(ImportError::DuplicateStation(name.clone()));
                }
            }
            return Ok(names);
        }

        Err(ImportError::EmptyStationsFile)
    }
}

// ==========================================
// 线路文件解析
// ==========================================

/// 线路原始记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// 源文件行号（从 1 开始）
    pub row: usize,
    pub station_a: String,
    pub station_b: String,
    pub category: LineCategory,
}

pub struct LinesFileParser;

impl LinesFileParser {
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<LineRecord>> {
        let file = open_existing(file_path.as_ref())?;
        self.parse_reader(file)
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<LineRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b';')
            .flexible(true) // 字段数由下方逐行校验
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);

            // 跳过完全空白的行
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            if record.len() != 3 {
                return Err(ImportError::MalformedLine {
                    row,
                    message: format!("期望 3 个字段, 实际 {}", record.len()),
                });
            }

            let code: i32 = record[2].parse().map_err(|_| ImportError::MalformedLine {
                row,
                message: format!("等级编码不是整数: {}", &record[2]),
            })?;
            let category =
                LineCategory::from_code(code).map_err(|e| ImportError::from_network(e, row))?;

            records.push(LineRecord {
                row,
                station_a: record[0].to_string(),
                station_b: record[1].to_string(),
                category,
            });
        }

        Ok(records)
    }
}
