// ==========================================
// 铁路大亨 - 线路升级成本模型
// ==========================================
// 公式: cost = length × (new.unit_cost − old.unit_cost)
// 红线: 纯计算, 不扣款、不修改线路; 降级得到负值, 不拒绝
// ==========================================

use crate::domain::line::RailwayLine;
use crate::domain::types::LineCategory;

#[derive(Debug, Default, Clone, Copy)]
pub struct UpgradeCostModel;

impl UpgradeCostModel {
    pub fn new() -> Self {
        Self
    }

    /// 升级成本
    ///
    /// length 为 0 时恒为 0; 单价下降时结果为负
    pub fn upgrade_cost(&self, old: LineCategory, new: LineCategory, length: u64) -> i64 {
        let delta = new.unit_cost() - old.unit_cost();
        i64::try_from(length)
            .unwrap_or(i64::MAX)
            .saturating_mul(delta)
    }

    /// 对已有线路报价
    pub fn quote(&self, line: &RailwayLine, new: LineCategory) -> i64 {
        self.upgrade_cost(line.category, new, line.length() as u64)
    }
}
