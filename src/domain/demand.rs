// ==========================================
// 缝制产线负荷排产系统 - 需求领域模型
// ==========================================
// 用途: 输入规范化后生成, 分配引擎只读
// 红线: 剩余数量不在实体上改写, 由分配状态表承载
// ==========================================

use serde::{Deserialize, Serialize};

/// 缺省展示属性占位
pub const MISSING_ATTR: &str = "-";

// ==========================================
// DemandLineId - 需求行稳定标识（arena 下标）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DemandLineId(pub usize);

impl DemandLineId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ==========================================
// DemandAttributes - 展示属性
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandAttributes {
    pub sell_style: String,  // 销售款号
    pub sell_color: String,  // 颜色
    pub sell_size: String,   // 尺码（原始值）
    pub pack_style: String,  // 包装款号
    pub sell_pack: String,   // 包装规格
    pub primary_dc: String,  // 配送中心
}

impl Default for DemandAttributes {
    fn default() -> Self {
        Self {
            sell_style: MISSING_ATTR.to_string(),
            sell_color: MISSING_ATTR.to_string(),
            sell_size: MISSING_ATTR.to_string(),
            pack_style: MISSING_ATTR.to_string(),
            sell_pack: MISSING_ATTR.to_string(),
            primary_dc: MISSING_ATTR.to_string(),
        }
    }
}

impl DemandAttributes {
    /// 用于尺码分档的尺码值（缺省占位视为无尺码）
    pub fn size_for_lookup(&self) -> &str {
        if self.sell_size == MISSING_ATTR {
            ""
        } else {
            &self.sell_size
        }
    }
}

// ==========================================
// DemandLine - 需求行
// ==========================================
// 身份即输入行, 不做聚合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandLine {
    pub id: DemandLineId,          // arena 下标
    pub row_index: usize,          // 原始行号（并列时的稳定次序）
    pub style: String,             // 工艺款式描述
    pub quantity: f64,             // 原始需求数量
    pub week_num: Option<u32>,     // 缝制周（编码值末两位）
    pub attributes: DemandAttributes,
}

impl DemandLine {
    pub fn is_allocatable(&self) -> bool {
        self.quantity > 0.0
    }
}
