// ==========================================
// 缝制产线负荷排产系统 - KPI 计算
// ==========================================
// 纯聚合, 不修改任何输入
// - 加权平均效率 = Σ(数量 × 效率) / Σ数量
// - 产能利用率   = 已分配 / 初始总产能 × 100
// - 模型得分     = Σ(数量 × 效率/100) / (已分配 × 最高组平均效率/100) × 100
// - 换款次数     = Σ 各组 (不同款式数 − 1)
// - 未分配量     = 全部需求行剩余量之和
// ==========================================

use crate::domain::group::ProductionGroup;
use crate::domain::plan::{Allocation, KpiSummary};
use crate::engine::allocation::AllocationState;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

pub struct KpiCalculator;

impl KpiCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算 KPI 汇总
    ///
    /// # 参数
    /// - total_demand: 初始需求总量
    /// - groups: 参与分配的产线组（初始产能）
    /// - allocations: 分配记录
    /// - state: 分配结束后的状态表
    #[instrument(skip_all, fields(allocations = allocations.len()))]
    pub fn calculate(
        &self,
        total_demand: f64,
        groups: &[ProductionGroup],
        allocations: &[Allocation],
        state: &AllocationState,
    ) -> KpiSummary {
        let total_allocated: f64 = allocations.iter().map(|a| a.quantity).sum();
        let total_capacity: f64 = groups.iter().map(|g| g.total_capacity).sum();

        let weighted_avg_eff = if total_allocated > 0.0 {
            allocations
                .iter()
                .map(|a| a.quantity * a.efficiency)
                .sum::<f64>()
                / total_allocated
        } else {
            0.0
        };

        let cap_utilization = if total_capacity > 0.0 {
            total_allocated / total_capacity * 100.0
        } else {
            0.0
        };

        let kpi = KpiSummary {
            total_demand,
            total_allocated,
            weighted_avg_eff,
            cap_utilization,
            model_score: Self::model_score(groups, allocations, total_allocated),
            changeovers: Self::changeovers(allocations),
            unallocated_qty: state.total_unallocated(),
        };

        debug!(
            total_allocated = kpi.total_allocated,
            cap_utilization = kpi.cap_utilization,
            changeovers = kpi.changeovers,
            "KPI 计算完成"
        );

        kpi
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn model_score(
        groups: &[ProductionGroup],
        allocations: &[Allocation],
        total_allocated: f64,
    ) -> f64 {
        let max_eff = groups
            .iter()
            .map(|g| g.avg_efficiency)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max_eff.is_finite() {
            return 0.0;
        }

        let effective_output: f64 = allocations
            .iter()
            .map(|a| a.quantity * (a.efficiency / 100.0))
            .sum();
        let theoretical_max_output = total_allocated * (max_eff / 100.0);

        if theoretical_max_output > 0.0 {
            effective_output / theoretical_max_output * 100.0
        } else {
            0.0
        }
    }

    /// 各组不同款式数 − 1（下限 0）之和
    pub fn changeovers(allocations: &[Allocation]) -> usize {
        let mut styles_by_group: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for a in allocations {
            styles_by_group
                .entry(a.group_id.as_str())
                .or_default()
                .insert(a.style.as_str());
        }
        styles_by_group
            .values()
            .map(|styles| styles.len().saturating_sub(1))
            .sum()
    }
}

impl Default for KpiCalculator {
    fn default() -> Self {
        Self::new()
    }
}
