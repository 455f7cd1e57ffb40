// ==========================================
// 缝制产线负荷排产系统 - 输入规范化
// ==========================================
// 职责:
// 1) 校验必需字段（按表报告缺失字段）
// 2) 数量宽松转换（非数值 → 0）
// 3) 周号提取, 计算计划期（不同周号个数）
// 输出: 需求行 + 产线组绩效记录 + 升序周号
// ==========================================

use crate::domain::demand::DemandLine;
use crate::domain::group::GroupPerformanceRecord;
use crate::engine::error::PlanError;
use crate::importer::field_mapper::{columns, FieldMapper};
use crate::importer::raw_table::RawTable;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// 规范化后的输入
#[derive(Debug, Clone)]
pub struct NormalizedInput {
    pub demand_lines: Vec<DemandLine>,
    pub group_records: Vec<GroupPerformanceRecord>,
    /// 升序去重的周号
    pub weeks: Vec<u32>,
}

impl NormalizedInput {
    /// 计划期（周数）
    pub fn horizon(&self) -> usize {
        self.weeks.len()
    }

    /// 需求总量（含非正数量行）
    pub fn total_demand(&self) -> f64 {
        self.demand_lines.iter().map(|d| d.quantity).sum()
    }
}

pub struct InputNormalizer {
    mapper: FieldMapper,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self {
            mapper: FieldMapper::new(),
        }
    }

    /// 规范化两张输入表
    ///
    /// # 错误
    /// - PlanError::Validation: 任一表缺少必需字段（需求表先校验）
    /// - PlanError::Horizon: 没有任何有效周值
    #[instrument(skip_all, fields(
        demand_rows = demand.len(),
        group_rows = groups.len()
    ))]
    pub fn normalize(
        &self,
        demand: &RawTable,
        groups: &RawTable,
    ) -> Result<NormalizedInput, PlanError> {
        Self::require_columns(demand, &columns::DEMAND_REQUIRED)?;
        Self::require_columns(groups, &columns::GROUP_REQUIRED)?;

        let demand_lines: Vec<DemandLine> = demand
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_demand_row(row, idx))
            .collect();

        let weeks: Vec<u32> = demand_lines
            .iter()
            .filter_map(|d| d.week_num)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if weeks.is_empty() {
            return Err(PlanError::Horizon);
        }

        let mut skipped_groups = 0usize;
        let group_records: Vec<GroupPerformanceRecord> = groups
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.mapper.map_group_row(row, idx))
            .filter(|r| {
                let keep = !r.group_id.is_empty();
                if !keep {
                    skipped_groups += 1;
                }
                keep
            })
            .collect();

        debug!(
            demand_lines = demand_lines.len(),
            group_records = group_records.len(),
            skipped_groups,
            horizon = weeks.len(),
            "输入规范化完成"
        );

        Ok(NormalizedInput {
            demand_lines,
            group_records,
            weeks,
        })
    }

    fn require_columns(table: &RawTable, required: &[&str]) -> Result<(), PlanError> {
        let missing = table.missing_columns(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PlanError::Validation {
                table: table.name.clone(),
                missing,
            })
        }
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
