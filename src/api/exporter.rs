// ==========================================
// 缝制产线负荷排产系统 - 结果导出
// ==========================================
// 职责: 排产结果 → CSV（班次排程 / 产线组汇总）/ JSON
// 说明: 导出列名沿用业务报表表头
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::plan::{GroupSummaryRow, PlanResult, ScheduleSlot};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

// ==========================================
// 导出行结构
// ==========================================

/// 班次排程导出行
#[derive(Debug, Serialize)]
struct ScheduleCsvRow<'a> {
    #[serde(rename = "Week")]
    week: u32,
    #[serde(rename = "Group")]
    group: &'a str,
    #[serde(rename = "Shift")]
    shift: String,
    #[serde(rename = "Style")]
    style: String,
    #[serde(rename = "SELL_STYLE")]
    sell_style: &'a str,
    #[serde(rename = "PACK_STYLE")]
    pack_style: &'a str,
    #[serde(rename = "SELL_COLOR")]
    sell_color: &'a str,
    #[serde(rename = "SELL_SIZE")]
    sell_size: &'a str,
    #[serde(rename = "SELL_PACK")]
    sell_pack: &'a str,
    #[serde(rename = "PRIMARY_DC")]
    primary_dc: &'a str,
    #[serde(rename = "Allocated Qty")]
    allocated_qty: f64,
    #[serde(rename = "Shift Capacity")]
    shift_capacity: f64,
    #[serde(rename = "HC")]
    headcount: f64,
    #[serde(rename = "Eff")]
    efficiency: f64,
}

impl<'a> From<&'a ScheduleSlot> for ScheduleCsvRow<'a> {
    fn from(slot: &'a ScheduleSlot) -> Self {
        Self {
            week: slot.week,
            group: &slot.group_id,
            shift: format!("s{}", slot.shift),
            style: slot.assignment.to_string(),
            sell_style: &slot.attributes.sell_style,
            pack_style: &slot.attributes.pack_style,
            sell_color: &slot.attributes.sell_color,
            sell_size: &slot.attributes.sell_size,
            sell_pack: &slot.attributes.sell_pack,
            primary_dc: &slot.attributes.primary_dc,
            allocated_qty: slot.quantity,
            shift_capacity: slot.shift_capacity,
            headcount: slot.headcount,
            efficiency: slot.efficiency,
        }
    }
}

/// 产线组汇总导出行
#[derive(Debug, Serialize)]
struct SummaryCsvRow<'a> {
    #[serde(rename = "Group")]
    group: &'a str,
    #[serde(rename = "Average HC")]
    average_headcount: f64,
    #[serde(rename = "Efficiency (%)")]
    efficiency: f64,
    #[serde(rename = "Weekly Capacity (Units)")]
    weekly_capacity: f64,
    #[serde(rename = "Total Capacity (Units)")]
    total_capacity: f64,
    #[serde(rename = "Allocated Units")]
    allocated_units: f64,
}

impl<'a> From<&'a GroupSummaryRow> for SummaryCsvRow<'a> {
    fn from(row: &'a GroupSummaryRow) -> Self {
        Self {
            group: &row.group_id,
            average_headcount: row.average_headcount,
            efficiency: row.efficiency,
            weekly_capacity: row.weekly_capacity,
            total_capacity: row.total_capacity,
            allocated_units: row.allocated_units,
        }
    }
}

// ==========================================
// ResultExporter
// ==========================================

pub struct ResultExporter;

impl ResultExporter {
    /// 班次排程写入 CSV
    pub fn write_schedule_csv<W: Write>(writer: W, slots: &[ScheduleSlot]) -> ApiResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for slot in slots {
            wtr.serialize(ScheduleCsvRow::from(slot))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 产线组汇总写入 CSV
    pub fn write_summary_csv<W: Write>(writer: W, rows: &[GroupSummaryRow]) -> ApiResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in rows {
            wtr.serialize(SummaryCsvRow::from(row))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// 完整结果写入 JSON
    pub fn write_json<W: Write>(writer: W, result: &PlanResult) -> ApiResult<()> {
        serde_json::to_writer_pretty(writer, result)?;
        Ok(())
    }

    pub fn export_schedule_csv<P: AsRef<Path>>(path: P, result: &PlanResult) -> ApiResult<()> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        Self::write_schedule_csv(file, &result.detailed_plan)?;
        info!(path = %path.as_ref().display(), rows = result.detailed_plan.len(), "班次排程已导出");
        Ok(())
    }

    pub fn export_summary_csv<P: AsRef<Path>>(path: P, result: &PlanResult) -> ApiResult<()> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        Self::write_summary_csv(file, &result.summary)?;
        info!(path = %path.as_ref().display(), rows = result.summary.len(), "产线组汇总已导出");
        Ok(())
    }

    pub fn export_json<P: AsRef<Path>>(path: P, result: &PlanResult) -> ApiResult<()> {
        let mut file = BufWriter::new(File::create(path.as_ref())?);
        Self::write_json(&mut file, result)?;
        file.flush()?;
        info!(path = %path.as_ref().display(), run_id = %result.run_id, "排产结果已导出");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demand::DemandAttributes;
    use crate::domain::types::SlotAssignment;

    fn slot(shift: u8, assignment: SlotAssignment, qty: f64) -> ScheduleSlot {
        ScheduleSlot {
            week: 38,
            group_id: "G1".to_string(),
            shift,
            assignment,
            attributes: DemandAttributes::default(),
            quantity: qty,
            shift_capacity: 480.0,
            headcount: 38.0,
            efficiency: 100.0,
        }
    }

    #[test]
    fn test_schedule_csv_headers_and_labels() {
        let slots = vec![
            slot(1, SlotAssignment::Style("BX Boy".to_string()), 10.0),
            slot(2, SlotAssignment::Idle, 0.0),
        ];
        let mut buf = Vec::new();
        ResultExporter::write_schedule_csv(&mut buf, &slots).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Week,Group,Shift,Style,SELL_STYLE,PACK_STYLE,SELL_COLOR,SELL_SIZE,SELL_PACK,PRIMARY_DC,Allocated Qty,Shift Capacity,HC,Eff"
        );
        assert!(lines[1].starts_with("38,G1,s1,BX Boy,-"));
        assert!(lines[2].starts_with("38,G1,s2,IDLE"));
    }

    #[test]
    fn test_summary_csv_headers() {
        let rows = vec![GroupSummaryRow {
            group_id: "G1".to_string(),
            average_headcount: 38.0,
            efficiency: 100.0,
            weekly_capacity: 5760.0,
            total_capacity: 11520.0,
            allocated_units: 300.0,
        }];
        let mut buf = Vec::new();
        ResultExporter::write_summary_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            "Group,Average HC,Efficiency (%),Weekly Capacity (Units),Total Capacity (Units),Allocated Units"
        ));
        assert!(text.contains("G1,38.0,100.0,5760.0,11520.0,300.0"));
    }
}
