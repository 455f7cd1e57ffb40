// ==========================================
// 缝制产线负荷排产系统 - 结果报表
// ==========================================
// 1) 产线组汇总: 每个 (产线组, 采用效率) 一行, 产能按该效率重算
// 2) 需求明细: 按需求数量降序
// 3) 组周效率序列: 每个 (产线组, 周) 取首班效率
// ==========================================

use crate::domain::demand::DemandLine;
use crate::domain::plan::{
    Allocation, DemandDetailRow, GroupSummaryRow, ScheduleSlot, WeeklyEfficiencyPoint,
};
use crate::engine::capacity_model::CapacityModel;
use std::collections::BTreeMap;

pub struct ReportBuilder {
    model: CapacityModel,
}

impl ReportBuilder {
    pub fn new(model: CapacityModel) -> Self {
        Self { model }
    }

    /// 产线组汇总表
    ///
    /// 排序: 已分配量降序, 并列按 group_id, 再按效率
    pub fn group_summary(
        &self,
        allocations: &[Allocation],
        horizon_weeks: usize,
    ) -> Vec<GroupSummaryRow> {
        let mut rows: Vec<GroupSummaryRow> = Vec::new();

        for a in allocations {
            let existing = rows
                .iter_mut()
                .find(|r| r.group_id == a.group_id && r.efficiency == a.efficiency);
            match existing {
                Some(row) => row.allocated_units += a.quantity,
                None => {
                    let total_capacity =
                        self.model.total_capacity(a.headcount, a.efficiency, horizon_weeks);
                    let weekly_capacity = if horizon_weeks > 0 {
                        total_capacity / horizon_weeks as f64
                    } else {
                        0.0
                    };
                    rows.push(GroupSummaryRow {
                        group_id: a.group_id.clone(),
                        average_headcount: a.headcount,
                        efficiency: a.efficiency,
                        weekly_capacity,
                        total_capacity,
                        allocated_units: a.quantity,
                    });
                }
            }
        }

        rows.sort_by(|a, b| {
            b.allocated_units
                .total_cmp(&a.allocated_units)
                .then_with(|| a.group_id.cmp(&b.group_id))
                .then_with(|| a.efficiency.total_cmp(&b.efficiency))
        });
        rows
    }

    /// 需求明细表（数量降序, 并列按原始行号）
    pub fn demand_details(&self, demand: &[DemandLine]) -> Vec<DemandDetailRow> {
        let mut lines: Vec<&DemandLine> = demand.iter().collect();
        lines.sort_by(|a, b| {
            b.quantity
                .total_cmp(&a.quantity)
                .then_with(|| a.row_index.cmp(&b.row_index))
        });

        lines
            .into_iter()
            .map(|d| DemandDetailRow {
                style: d.style.clone(),
                sell_style: d.attributes.sell_style.clone(),
                sell_color: d.attributes.sell_color.clone(),
                sell_size: d.attributes.sell_size.clone(),
                pack_style: d.attributes.pack_style.clone(),
                demand_qty: d.quantity,
            })
            .collect()
    }

    /// 组周效率序列（按 group_id, 周 升序）
    pub fn weekly_efficiency(&self, schedule: &[ScheduleSlot]) -> Vec<WeeklyEfficiencyPoint> {
        let mut first_shift: BTreeMap<(&str, u32), &ScheduleSlot> = BTreeMap::new();
        for slot in schedule {
            first_shift
                .entry((slot.group_id.as_str(), slot.week))
                .and_modify(|current| {
                    if slot.shift < current.shift {
                        *current = slot;
                    }
                })
                .or_insert(slot);
        }

        first_shift
            .into_iter()
            .map(|((group_id, week), slot)| WeeklyEfficiencyPoint {
                group_id: group_id.to_string(),
                week,
                efficiency: slot.efficiency,
            })
            .collect()
    }
}
