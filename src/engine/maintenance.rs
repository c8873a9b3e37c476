// ==========================================
// 铁路大亨 - 年度养护排期
// ==========================================
// 规则: 养护在建成日的周年日进行, 每年一次
// - 参考日早于建成日 → 不适用
// - 否则取第一个"不早于参考日"的周年日; 恰逢周年日时返回当天
// 实现: 闭式计算(默认) / 逐年扫描(参考语义), 两者结果必须一致
// ==========================================

use crate::domain::line::{LineId, RailwayLine};
use crate::domain::network::NetworkGraph;
use crate::domain::time::TimeValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

// ==========================================
// 下次养护结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "date", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextMaintenance {
    Scheduled(TimeValue), // 已排期
    NotApplicable,        // 尚未建成
}

impl NextMaintenance {
    pub fn date(&self) -> Option<TimeValue> {
        match self {
            NextMaintenance::Scheduled(date) => Some(*date),
            NextMaintenance::NotApplicable => None,
        }
    }
}

impl fmt::Display for NextMaintenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextMaintenance::Scheduled(date) => write!(f, "{}", date),
            NextMaintenance::NotApplicable => write!(f, "N/A"),
        }
    }
}

// ==========================================
// 算法选择
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceAlgorithm {
    #[default]
    ClosedForm, // 直接计算年份差
    LinearScan, // 逐年推进
}

impl FromStr for MaintenanceAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "closed_form" => Ok(MaintenanceAlgorithm::ClosedForm),
            "linear_scan" => Ok(MaintenanceAlgorithm::LinearScan),
            other => Err(format!("未知养护算法: {}", other)),
        }
    }
}

impl fmt::Display for MaintenanceAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceAlgorithm::ClosedForm => write!(f, "closed_form"),
            MaintenanceAlgorithm::LinearScan => write!(f, "linear_scan"),
        }
    }
}

// ==========================================
// MaintenanceScheduler - 养护排期器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct MaintenanceScheduler {
    algorithm: MaintenanceAlgorithm,
}

impl MaintenanceScheduler {
    pub fn new(algorithm: MaintenanceAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> MaintenanceAlgorithm {
        self.algorithm
    }

    /// 下次养护日期
    pub fn next_maintenance(&self, construction: TimeValue, reference: TimeValue) -> NextMaintenance {
        match self.algorithm {
            MaintenanceAlgorithm::ClosedForm => next_maintenance_closed_form(construction, reference),
            MaintenanceAlgorithm::LinearScan => next_maintenance_scan(construction, reference),
        }
    }

    /// 今天是否为养护日（建成后的周年日, 建成当天不算）
    pub fn is_maintenance_day(&self, construction: TimeValue, today: TimeValue) -> bool {
        today > construction
            && self.next_maintenance(construction, today) == NextMaintenance::Scheduled(today)
    }

    /// 今天需要养护的线路（用于触发线路养护支出）
    #[instrument(skip(self, graph), fields(lines = graph.line_count()))]
    pub fn lines_due<'a>(&self, graph: &'a NetworkGraph, today: TimeValue) -> Vec<&'a RailwayLine> {
        graph
            .lines()
            .iter()
            .filter(|line| self.is_maintenance_day(line.construction_date, today))
            .collect()
    }

    /// 各线路下次养护日期, 按 (日期, 线路ID) 升序; 未建成的线路不列出
    pub fn upcoming(&self, graph: &NetworkGraph, reference: TimeValue) -> Vec<(LineId, TimeValue)> {
        let mut schedule: Vec<(LineId, TimeValue)> = graph
            .lines()
            .iter()
            .filter_map(|line| {
                self.next_maintenance(line.construction_date, reference)
                    .date()
                    .map(|date| (line.id, date))
            })
            .collect();
        schedule.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        schedule
    }
}

/// 参考语义: 从建成日起逐年推进, 直到不早于参考日
///
/// 下一个周年日超出 i32 年份范围时返回 NotApplicable。
pub fn next_maintenance_scan(construction: TimeValue, reference: TimeValue) -> NextMaintenance {
    if reference < construction {
        return NextMaintenance::NotApplicable;
    }

    let mut candidate = construction;
    while candidate < reference {
        match candidate.year.checked_add(1) {
            Some(year) => candidate = candidate.with_year(year),
            None => return NextMaintenance::NotApplicable,
        }
    }
    NextMaintenance::Scheduled(candidate)
}

/// 闭式计算: 参考年的周年日若早于参考日则顺延一年
///
/// reference ≥ construction 保证 reference.year ≥ construction.year,
/// 因此结果年份不会早于建成年。顺延年份溢出时与逐年推进一致, 返回 NotApplicable。
pub fn next_maintenance_closed_form(construction: TimeValue, reference: TimeValue) -> NextMaintenance {
    if reference < construction {
        return NextMaintenance::NotApplicable;
    }

    let anniversary = construction.with_year(reference.year);
    if anniversary < reference {
        reference
            .year
            .checked_add(1)
            .map_or(NextMaintenance::NotApplicable, |year| {
                NextMaintenance::Scheduled(construction.with_year(year))
            })
    } else {
        NextMaintenance::Scheduled(anniversary)
    }
}
