// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
#![allow(dead_code)]

use line_loading_aps::domain::demand::{DemandAttributes, DemandLine, DemandLineId};
use line_loading_aps::domain::group::{GroupIdx, GroupPerformanceRecord, ProductionGroup};
use line_loading_aps::importer::{RawTable, DEMAND_TABLE, GROUP_TABLE};

// ==========================================
// 需求表构建器
// ==========================================

pub struct DemandTableBuilder {
    rows: Vec<[String; 5]>,
}

impl DemandTableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// 追加一行需求（无尺码）
    pub fn line(self, style: &str, qty: &str, sew_week: &str) -> Self {
        self.sized_line(style, "-", qty, sew_week)
    }

    /// 追加一行带尺码的需求
    pub fn sized_line(mut self, style: &str, size: &str, qty: &str, sew_week: &str) -> Self {
        self.rows.push([
            style.to_string(),
            qty.to_string(),
            sew_week.to_string(),
            size.to_string(),
            format!("SELL-{}", style),
        ]);
        self
    }

    pub fn build(self) -> RawTable {
        let rows: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|v| v.as_str()).collect())
            .collect();
        RawTable::from_rows(
            DEMAND_TABLE,
            &["style_construction_detail", "QTY", "SEW_WEEK", "SELL_SIZE", "SELL_STYLE"],
            &rows,
        )
    }
}

// ==========================================
// 产线组绩效表构建器
// ==========================================

pub struct GroupTableBuilder {
    rows: Vec<[String; 6]>,
}

impl GroupTableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// 追加一行无历史款式的绩效记录
    pub fn group(self, groupline: &str, eff: &str, hc: &str) -> Self {
        self.history(groupline, eff, hc, "", "", "")
    }

    /// 追加一行带历史款式 / 尺码 / 产量的绩效记录
    pub fn history(
        mut self,
        groupline: &str,
        eff: &str,
        hc: &str,
        style: &str,
        size: &str,
        output: &str,
    ) -> Self {
        self.rows.push([
            groupline.to_string(),
            eff.to_string(),
            hc.to_string(),
            style.to_string(),
            size.to_string(),
            output.to_string(),
        ]);
        self
    }

    pub fn build(self) -> RawTable {
        let rows: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(|v| v.as_str()).collect())
            .collect();
        RawTable::from_rows(
            GROUP_TABLE,
            &["groupline", "eff", "HC", "style construction", "size", "output"],
            &rows,
        )
    }
}

// ==========================================
// 领域对象构建函数（直接驱动引擎）
// ==========================================

pub fn demand_line(idx: usize, style: &str, size: &str, qty: f64) -> DemandLine {
    DemandLine {
        id: DemandLineId(idx),
        row_index: idx,
        style: style.to_string(),
        quantity: qty,
        week_num: Some(38),
        attributes: DemandAttributes {
            sell_size: size.to_string(),
            ..DemandAttributes::default()
        },
    }
}

pub fn production_group(idx: usize, group_id: &str, capacity: f64, eff: f64) -> ProductionGroup {
    ProductionGroup {
        idx: GroupIdx(idx),
        group_id: group_id.to_string(),
        headcount: 38.0,
        avg_efficiency: eff,
        total_capacity: capacity,
    }
}

pub fn history_record(
    group_id: &str,
    style: &str,
    size: &str,
    output: f64,
    eff: f64,
) -> GroupPerformanceRecord {
    GroupPerformanceRecord {
        row_index: 0,
        group_id: group_id.to_string(),
        efficiency: eff,
        headcount: 38.0,
        history_style: Some(style.to_string()),
        history_size: Some(size.to_string()),
        output,
    }
}

/// 参考产线组（38 人, 100% 效率）单周产能
pub const REFERENCE_WEEKLY_CAPACITY: f64 = 480.0 * 12.0;
