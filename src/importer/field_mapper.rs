// ==========================================
// 缝制产线负荷排产系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射 + 宽松类型转换
// ==========================================

use crate::domain::demand::{DemandAttributes, DemandLine, DemandLineId, MISSING_ATTR};
use crate::domain::group::GroupPerformanceRecord;
use crate::importer::data_cleaner::DataCleaner;
use std::collections::HashMap;

// ==========================================
// 源字段名
// ==========================================
pub mod columns {
    // 需求表
    pub const STYLE: &str = "style_construction_detail";
    pub const QTY: &str = "QTY";
    pub const SEW_WEEK: &str = "SEW_WEEK";
    pub const SELL_STYLE: &str = "SELL_STYLE";
    pub const SELL_COLOR: &str = "SELL_COLOR";
    pub const SELL_SIZE: &str = "SELL_SIZE";
    pub const PACK_STYLE: &str = "PACK_STYLE";
    pub const SELL_PACK: &str = "SELL_PACK";
    pub const PRIMARY_DC: &str = "PRIMARY_DC";

    // 产线组绩效表
    pub const GROUPLINE: &str = "groupline";
    pub const EFF: &str = "eff";
    pub const HC: &str = "HC";
    pub const HISTORY_STYLE: &str = "style construction";
    pub const HISTORY_SIZE: &str = "size";
    pub const OUTPUT: &str = "output";

    /// 需求表必需字段
    pub const DEMAND_REQUIRED: [&str; 3] = [STYLE, QTY, SEW_WEEK];
    /// 产线组绩效表必需字段
    pub const GROUP_REQUIRED: [&str; 3] = [GROUPLINE, EFF, HC];
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 映射需求行
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_index: 行号（同时作为 arena 下标）
    pub fn map_demand_row(&self, row: &HashMap<String, String>, row_index: usize) -> DemandLine {
        let style = self
            .get_string(row, columns::STYLE)
            .unwrap_or_default();

        DemandLine {
            id: DemandLineId(row_index),
            row_index,
            style,
            quantity: self.cleaner.coerce_f64(self.get_raw(row, columns::QTY)),
            week_num: self.cleaner.parse_week_num(self.get_raw(row, columns::SEW_WEEK)),
            attributes: DemandAttributes {
                sell_style: self.get_attr(row, columns::SELL_STYLE),
                sell_color: self.get_attr(row, columns::SELL_COLOR),
                sell_size: self.get_attr(row, columns::SELL_SIZE),
                pack_style: self.get_attr(row, columns::PACK_STYLE),
                sell_pack: self.get_attr(row, columns::SELL_PACK),
                primary_dc: self.get_attr(row, columns::PRIMARY_DC),
            },
        }
    }

    /// 映射产线组绩效行
    pub fn map_group_row(
        &self,
        row: &HashMap<String, String>,
        row_index: usize,
    ) -> GroupPerformanceRecord {
        GroupPerformanceRecord {
            row_index,
            group_id: self
                .get_string(row, columns::GROUPLINE)
                .unwrap_or_default(),
            efficiency: self.cleaner.coerce_f64(self.get_raw(row, columns::EFF)),
            headcount: self.cleaner.coerce_f64(self.get_raw(row, columns::HC)),
            history_style: self.get_string(row, columns::HISTORY_STYLE),
            history_size: self.get_string(row, columns::HISTORY_SIZE),
            output: self.cleaner.coerce_f64(self.get_raw(row, columns::OUTPUT)),
        }
    }

    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            columns::HISTORY_STYLE => &["style construction", "style_construction", "style"],
            columns::PRIMARY_DC => &["PRIMARY_DC", "DC"],
            columns::STYLE => &["style_construction_detail"],
            columns::QTY => &["QTY"],
            columns::SEW_WEEK => &["SEW_WEEK"],
            columns::SELL_STYLE => &["SELL_STYLE"],
            columns::SELL_COLOR => &["SELL_COLOR"],
            columns::SELL_SIZE => &["SELL_SIZE"],
            columns::PACK_STYLE => &["PACK_STYLE"],
            columns::SELL_PACK => &["SELL_PACK"],
            columns::GROUPLINE => &["groupline"],
            columns::EFF => &["eff"],
            columns::HC => &["HC"],
            columns::HISTORY_SIZE => &["size"],
            columns::OUTPUT => &["output"],
            _ => &[],
        }
    }

    /// 取第一个非空别名列的原始值
    fn get_raw<'a>(&self, row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.as_str())
            .find(|v| !v.trim().is_empty())
    }

    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        self.cleaner.normalize_null(self.get_raw(row, key))
    }

    fn get_attr(&self, row: &HashMap<String, String>, key: &str) -> String {
        self.get_string(row, key)
            .unwrap_or_else(|| MISSING_ATTR.to_string())
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}
