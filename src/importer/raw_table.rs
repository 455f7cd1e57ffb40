// ==========================================
// 缝制产线负荷排产系统 - 原始表
// ==========================================
// 职责: 文件解析器与规范化器之间的中立表结构
// ==========================================

use std::collections::HashMap;

/// 需求表（工作表名）
pub const DEMAND_TABLE: &str = "demand_forecast";
/// 产线组绩效表（工作表名）
pub const GROUP_TABLE: &str = "Output_forecast";

/// 原始表：表头 + 行（列名 → 文本值）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// 由表头与按列顺序给出的行构造（测试与内存数据源使用）
    pub fn from_rows(name: impl Into<String>, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let mut table = Self::new(name, headers.clone());
        for row in rows {
            let map = headers
                .iter()
                .zip(row.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();
            table.rows.push(map);
        }
        table
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// 返回 required 中缺失的列（保持 required 的顺序）
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
