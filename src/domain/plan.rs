// ==========================================
// 缝制产线负荷排产系统 - 排产结果领域模型
// ==========================================
// 用途: 分配记录 / 班次排程 / KPI / 汇总表
// 红线: 每次运行全新构造, 运行结束即交付, 不跨运行持久化
// ==========================================

use crate::domain::demand::{DemandAttributes, DemandLineId};
use crate::domain::group::GroupIdx;
use crate::domain::types::{AllocationPhase, SlotAssignment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Allocation - 分配记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub seq_no: usize,               // 产生顺序（从 1 开始）
    pub demand_id: DemandLineId,
    pub group_idx: GroupIdx,
    pub group_id: String,
    pub style: String,
    pub attributes: DemandAttributes,
    pub quantity: f64,               // 分配数量
    pub efficiency: f64,             // 采用效率（%）
    pub headcount: f64,
    pub group_capacity_before: f64,  // 分配前该组剩余产能
    pub phase: AllocationPhase,
}

// ==========================================
// ScheduleSlot - 班次排程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub week: u32,
    pub group_id: String,
    pub shift: u8,                   // 1..=每周班次数
    pub assignment: SlotAssignment,  // 款式 或 IDLE
    pub attributes: DemandAttributes,
    pub quantity: f64,
    pub shift_capacity: f64,
    pub headcount: f64,
    pub efficiency: f64,
}

impl ScheduleSlot {
    pub fn is_idle(&self) -> bool {
        self.assignment.is_idle()
    }
}

// ==========================================
// KpiSummary - 指标汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_demand: f64,
    pub total_allocated: f64,
    pub weighted_avg_eff: f64,   // 数量加权平均效率（%）
    pub cap_utilization: f64,    // 产能利用率（%）
    pub model_score: f64,        // 有效产出 / 理论最大产出（%）
    pub changeovers: usize,
    pub unallocated_qty: f64,
}

// ==========================================
// GroupSummaryRow - 产线组汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummaryRow {
    pub group_id: String,
    pub average_headcount: f64,
    pub efficiency: f64,
    pub weekly_capacity: f64,
    pub total_capacity: f64,
    pub allocated_units: f64,
}

// ==========================================
// DemandDetailRow - 需求明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandDetailRow {
    pub style: String,
    pub sell_style: String,
    pub sell_color: String,
    pub sell_size: String,
    pub pack_style: String,
    pub demand_qty: f64,
}

// ==========================================
// WeeklyEfficiencyPoint - 组周效率序列点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEfficiencyPoint {
    pub group_id: String,
    pub week: u32,
    pub efficiency: f64,
}

// ==========================================
// PlanResult - 单次排产运行结果
// ==========================================
// 全有或全无: 出错时不返回本结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub kpi: KpiSummary,
    pub summary: Vec<GroupSummaryRow>,
    pub demand_details: Vec<DemandDetailRow>,
    pub detailed_plan: Vec<ScheduleSlot>,
    pub planning_horizon: usize,
    pub weekly_group_efficiency: Vec<WeeklyEfficiencyPoint>,
    pub allocations: Vec<Allocation>,
}
