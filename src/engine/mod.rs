// ==========================================
// 缝制产线负荷排产系统 - 引擎层
// ==========================================
// 职责: 需求规范化 / 亲和索引 / 产能 / 分配 / KPI / 排程
// 红线: 引擎同步执行, 不做 IO, 输出经观测者接口发出
// ==========================================

pub mod affinity;
pub mod allocation;
pub mod capacity_model;
pub mod error;
pub mod events;
pub mod kpi;
pub mod normalizer;
pub mod orchestrator;
pub mod report;
pub mod schedule;
pub mod size_classifier;

// 重导出核心引擎
pub use affinity::{AffinityCandidate, AffinityIndex, AffinityIndexBuilder};
pub use allocation::{AllocationEngine, AllocationOutcome, AllocationState, PhaseStats};
pub use capacity_model::CapacityModel;
pub use error::PlanError;
pub use events::{
    NoOpObserver, PlanningEvent, PlanningObserver, RecordingObserver, TracingObserver,
};
pub use kpi::KpiCalculator;
pub use normalizer::{InputNormalizer, NormalizedInput};
pub use orchestrator::PlanOrchestrator;
pub use report::ReportBuilder;
pub use schedule::ScheduleGenerator;
pub use size_classifier::classify_size;
