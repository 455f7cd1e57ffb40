// ==========================================
// 缝制产线负荷排产系统 - 产能模型
// ==========================================
// 基准速率 = 参考产量 / 参考人数 / 班次时长  (件 / 人·小时, 100% 效率)
// 总产能   = 人数 × (班次时长 × 每天班次 × 每周天数 × 计划周数) × 基准速率 × 效率/100
// 产线组顺序: 总产能降序, 并列按 group_id 升序
// ==========================================

use crate::config::PlanningParams;
use crate::domain::group::{GroupIdx, GroupPerformanceRecord, ProductionGroup};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct CapacityModel {
    params: PlanningParams,
}

impl CapacityModel {
    pub fn new(params: PlanningParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PlanningParams {
        &self.params
    }

    /// 基准速率（件 / 人·小时）
    pub fn base_rate(&self) -> f64 {
        self.params.base_rate()
    }

    /// 计划期工作小时数（单人）
    pub fn hours_per_horizon(&self, horizon_weeks: usize) -> f64 {
        self.params.shift_hours
            * f64::from(self.params.shifts_per_day)
            * f64::from(self.params.working_days_per_week)
            * horizon_weeks as f64
    }

    /// 计划期总产能
    pub fn total_capacity(&self, headcount: f64, efficiency: f64, horizon_weeks: usize) -> f64 {
        headcount * self.hours_per_horizon(horizon_weeks) * self.base_rate() * (efficiency / 100.0)
    }

    /// 单班产能
    pub fn shift_capacity(&self, headcount: f64, efficiency: f64) -> f64 {
        headcount * self.params.shift_hours * self.base_rate() * (efficiency / 100.0)
    }

    /// 单周产能
    pub fn weekly_capacity(&self, headcount: f64, efficiency: f64) -> f64 {
        self.shift_capacity(headcount, efficiency) * f64::from(self.params.shifts_per_week())
    }

    /// 由历史绩效行构建产线组
    ///
    /// 规则:
    /// - 按 group_id 聚合, 人数与效率取算术平均
    /// - 按总产能降序排列, 并列按 group_id 升序
    /// - GroupIdx 为排序后的下标
    #[instrument(skip_all, fields(records = records.len(), horizon_weeks = horizon_weeks))]
    pub fn build_groups(
        &self,
        records: &[GroupPerformanceRecord],
        horizon_weeks: usize,
    ) -> Vec<ProductionGroup> {
        // group_id → (效率和, 人数和, 行数)
        let mut stats: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
        for record in records {
            let entry = stats.entry(record.group_id.as_str()).or_insert((0.0, 0.0, 0));
            entry.0 += record.efficiency;
            entry.1 += record.headcount;
            entry.2 += 1;
        }

        let mut groups: Vec<ProductionGroup> = stats
            .into_iter()
            .map(|(group_id, (eff_sum, hc_sum, count))| {
                let avg_efficiency = eff_sum / count as f64;
                let headcount = hc_sum / count as f64;
                ProductionGroup {
                    idx: GroupIdx(0),
                    group_id: group_id.to_string(),
                    headcount,
                    avg_efficiency,
                    total_capacity: self.total_capacity(headcount, avg_efficiency, horizon_weeks),
                }
            })
            .collect();

        // BTreeMap 已按 group_id 升序, 稳定排序保证并列次序
        groups.sort_by(|a, b| b.total_capacity.total_cmp(&a.total_capacity));
        for (i, group) in groups.iter_mut().enumerate() {
            group.idx = GroupIdx(i);
        }

        debug!(
            groups = groups.len(),
            total_capacity = groups.iter().map(|g| g.total_capacity).sum::<f64>(),
            "产线组产能计算完成"
        );

        groups
    }
}
