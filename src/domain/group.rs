// ==========================================
// 缝制产线负荷排产系统 - 产线组领域模型
// ==========================================
// 用途: 历史绩效记录 → 产线组产能
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// GroupPerformanceRecord - 产线组历史绩效行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPerformanceRecord {
    pub row_index: usize,               // 原始行号
    pub group_id: String,               // 产线组（groupline）
    pub efficiency: f64,                // 效率（%）
    pub headcount: f64,                 // 人数
    pub history_style: Option<String>,  // 历史生产款式
    pub history_size: Option<String>,   // 历史尺码（可缺省）
    pub output: f64,                    // 历史产量
}

// ==========================================
// GroupIdx - 产线组稳定标识（arena 下标）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupIdx(pub usize);

impl GroupIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

// ==========================================
// ProductionGroup - 产线组
// ==========================================
// 红线: total_capacity 为初始产能, 剩余产能由分配状态表承载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionGroup {
    pub idx: GroupIdx,
    pub group_id: String,
    pub headcount: f64,       // 平均人数
    pub avg_efficiency: f64,  // 平均历史效率（%）
    pub total_capacity: f64,  // 计划期总产能（件）
}
