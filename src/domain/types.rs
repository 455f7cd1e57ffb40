// ==========================================
// 缝制产线负荷排产系统 - 领域类型定义
// ==========================================
// 职责: 分配阶段 / 尺码分档 / 班次占用 等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 分配阶段 (Allocation Phase)
// ==========================================
// 顺序: Affinity 先于 Greedy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationPhase {
    Affinity, // 历史亲和优先
    Greedy,   // 按剩余产能贪心补位
}

impl fmt::Display for AllocationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationPhase::Affinity => write!(f, "affinity"),
            AllocationPhase::Greedy => write!(f, "greedy"),
        }
    }
}

// ==========================================
// 尺码分档 (Size Class)
// ==========================================
// 数字尺码映射为粗粒度档位代码 (R1/R2/R3)，其余原样透传
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SizeClass {
    Mapped(String),   // 命中分档规则
    Unmapped(String), // 未命中，保留原值（已 TRIM）
}

impl SizeClass {
    /// 亲和索引中使用的尺码键
    pub fn key(&self) -> &str {
        match self {
            SizeClass::Mapped(code) => code,
            SizeClass::Unmapped(original) => original,
        }
    }

    /// 是否为"无尺码"（空键）
    pub fn is_unsized(&self) -> bool {
        self.key().is_empty()
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ==========================================
// 班次占用 (Slot Assignment)
// ==========================================
// 序列化为单个字符串: 款式名 或 "IDLE"
pub const IDLE_MARKER: &str = "IDLE";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SlotAssignment {
    Style(String),
    Idle,
}

impl SlotAssignment {
    pub fn is_idle(&self) -> bool {
        matches!(self, SlotAssignment::Idle)
    }
}

impl fmt::Display for SlotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotAssignment::Style(s) => write!(f, "{}", s),
            SlotAssignment::Idle => write!(f, "{}", IDLE_MARKER),
        }
    }
}

impl From<SlotAssignment> for String {
    fn from(value: SlotAssignment) -> Self {
        value.to_string()
    }
}

impl From<String> for SlotAssignment {
    fn from(value: String) -> Self {
        if value == IDLE_MARKER {
            SlotAssignment::Idle
        } else {
            SlotAssignment::Style(value)
        }
    }
}
