// ==========================================
// 缝制产线负荷排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑, 不含引擎逻辑
// ==========================================

pub mod demand;
pub mod group;
pub mod plan;
pub mod types;

// 重导出核心类型
pub use demand::{DemandAttributes, DemandLine, DemandLineId, MISSING_ATTR};
pub use group::{GroupIdx, GroupPerformanceRecord, ProductionGroup};
pub use plan::{
    Allocation, DemandDetailRow, GroupSummaryRow, KpiSummary, PlanResult, ScheduleSlot,
    WeeklyEfficiencyPoint,
};
pub use types::{AllocationPhase, SizeClass, SlotAssignment, IDLE_MARKER};
