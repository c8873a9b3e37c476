// ==========================================
// 铁路大亨 - 线路升级事务
// ==========================================
// 职责: 报价之后的显式"应用升级"事务
// 顺序: 报价 → 策略校验 → 余额校验 → 扣款 → 修改线路等级
// 红线: 任一校验失败时不修改线路, 不动账本
// ==========================================

use crate::domain::line::LineId;
use crate::domain::network::NetworkGraph;
use crate::domain::types::LineCategory;
use crate::engine::upgrade_cost::UpgradeCostModel;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 账本接口（外部协作方提供）
// ==========================================
pub trait Ledger {
    /// 当前余额
    fn balance(&self) -> i64;

    /// 记一笔支出（负数即退款）
    fn record_expense(&mut self, amount: i64, memo: &str);
}

/// 升级事务错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("线路不存在: line_id={0}")]
    LineNotFound(LineId),

    #[error("余额不足: 需要 {required}, 可用 {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("不允许降级: {from} → {to}")]
    DowngradeRejected { from: LineCategory, to: LineCategory },
}

/// 升级回执
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeReceipt {
    pub transaction_id: String,
    pub line_id: LineId,
    pub old_category: LineCategory,
    pub new_category: LineCategory,
    pub length: usize,
    pub cost: i64,
}

// ==========================================
// LineUpgradeService - 线路升级服务
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct LineUpgradeService {
    cost_model: UpgradeCostModel,
    allow_downgrade: bool,
}

impl Default for LineUpgradeService {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LineUpgradeService {
    pub fn new(allow_downgrade: bool) -> Self {
        Self {
            cost_model: UpgradeCostModel::new(),
            allow_downgrade,
        }
    }

    /// 仅报价, 不产生任何副作用
    pub fn quote(
        &self,
        graph: &NetworkGraph,
        line_id: LineId,
        new_category: LineCategory,
    ) -> Result<i64, UpgradeError> {
        let line = graph
            .line(line_id)
            .ok_or(UpgradeError::LineNotFound(line_id))?;
        Ok(self.cost_model.quote(line, new_category))
    }

    /// 应用升级（扣款 + 修改线路等级）
    #[instrument(skip(self, graph, ledger))]
    pub fn apply_upgrade(
        &self,
        graph: &mut NetworkGraph,
        line_id: LineId,
        new_category: LineCategory,
        ledger: &mut dyn Ledger,
    ) -> Result<UpgradeReceipt, UpgradeError> {
        let line = graph
            .line_mut(line_id)
            .ok_or(UpgradeError::LineNotFound(line_id))?;

        let old_category = line.category;
        let cost = self.cost_model.quote(line, new_category);

        // 1. 策略校验: 单价下降视为降级
        if !self.allow_downgrade && new_category.unit_cost() < old_category.unit_cost() {
            warn!(line_id, from = %old_category, to = %new_category, "降级被拒绝");
            return Err(UpgradeError::DowngradeRejected {
                from: old_category,
                to: new_category,
            });
        }

        // 2. 余额校验（退款无需校验）
        let available = ledger.balance();
        if cost > available && cost > 0 {
            warn!(line_id, cost, available, "余额不足");
            return Err(UpgradeError::InsufficientFunds {
                required: cost,
                available,
            });
        }

        // 3. 扣款, 4. 修改等级
        let memo = format!("line {} upgrade {} -> {}", line_id, old_category, new_category);
        ledger.record_expense(cost, &memo);
        line.category = new_category;

        let receipt = UpgradeReceipt {
            transaction_id: Uuid::new_v4().to_string(),
            line_id,
            old_category,
            new_category,
            length: line.length(),
            cost,
        };
        info!(
            transaction_id = %receipt.transaction_id,
            line_id,
            cost,
            "线路升级完成"
        );
        Ok(receipt)
    }
}
