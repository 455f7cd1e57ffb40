// ==========================================
// 缝制产线负荷排产系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（配置存储）
// 系统定位: 需求 → 产线组分配 → 周 × 班次排程
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配与排程
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 排产参数
pub mod config;

// 数据库基础设施（配置库连接与表结构）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AllocationPhase, SizeClass, SlotAssignment};

// 领域实体
pub use domain::{
    Allocation, DemandLine, GroupSummaryRow, KpiSummary, PlanResult, ProductionGroup,
    ScheduleSlot,
};

// 引擎
pub use engine::{
    AffinityIndexBuilder, AllocationEngine, CapacityModel, InputNormalizer, KpiCalculator,
    PlanError, PlanOrchestrator, PlanningObserver, ScheduleGenerator,
};

// 配置
pub use config::{ConfigManager, PlanningConfigReader, PlanningParams, StaticConfig};

// API
pub use api::{ApiError, PlanApi, ResultExporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "缝制产线负荷排产系统";
